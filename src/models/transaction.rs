use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fixed expense catalog. "Other" is a placeholder the input boundary swaps
/// for a user-supplied category before anything is stored.
pub const EXPENSE_CATEGORIES: [&str; 9] = [
    "Cafe&Restaurants",
    "Entertainment",
    "Education",
    "Subscriptions",
    "Government&Taxes",
    "Supermarkets",
    "Fuel",
    "PersonalTransfers",
    "Other",
];

pub const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Stipend", "DepositInterest", "Other"];

/// Stored when the user leaves the description blank.
pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    pub fn categories(self) -> &'static [&'static str] {
        match self {
            TransactionType::Income => &INCOME_CATEGORIES,
            TransactionType::Expense => &EXPENSE_CATEGORIES,
        }
    }
}

/// A record as captured at the input boundary, before the store assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}
