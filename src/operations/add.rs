use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::db::repository;
use crate::errors::LedgerError;
use crate::models::transaction::{DEFAULT_DESCRIPTION, NewTransaction, Transaction, TransactionType};
use crate::operations::prompt;

/// Walks the user through one record and inserts it. All input validation
/// happens here, before the store is touched.
pub fn prompt_and_add(conn: &Connection) -> Result<Transaction, LedgerError> {
    let kind_input = prompt("Type (income/expense): ")?;
    let kind = TransactionType::parse(&kind_input).ok_or_else(|| {
        LedgerError::Validation(format!("unknown transaction type {kind_input:?}"))
    })?;

    println!("Categories: {}", kind.categories().join(", "));
    let choice = prompt("Category: ")?;
    let custom = if choice.trim() == "Other" {
        Some(prompt("Custom category: ")?)
    } else {
        None
    };
    let amount = prompt("Amount: ")?;
    let description = prompt("Description (blank for none): ")?;
    let date = prompt("Date (YYYY-MM-DD): ")?;

    let draft = build_transaction(kind, &choice, custom.as_deref(), &amount, &description, &date)?;
    repository::insert(conn, &draft)
}

/// Turns raw field inputs into a storable record, applying the catalog
/// check, the "Other" substitution and the blank-description default.
pub fn build_transaction(
    kind: TransactionType,
    category_choice: &str,
    custom_category: Option<&str>,
    amount_input: &str,
    description_input: &str,
    date_input: &str,
) -> Result<NewTransaction, LedgerError> {
    let amount_input = amount_input.trim();
    if amount_input.is_empty() {
        return Err(LedgerError::Validation("amount must not be empty".to_string()));
    }
    let amount = Decimal::from_str(amount_input).map_err(|_| {
        LedgerError::Validation(format!("amount {amount_input:?} is not a number"))
    })?;

    let category = resolve_category(kind, category_choice, custom_category)?;

    let description = description_input.trim();
    let description = if description.is_empty() {
        DEFAULT_DESCRIPTION.to_string()
    } else {
        description.to_string()
    };

    let date = NaiveDate::parse_from_str(date_input.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("date {:?} must be YYYY-MM-DD", date_input.trim()))
    })?;

    Ok(NewTransaction {
        transaction_type: kind,
        amount,
        category,
        description,
        date,
    })
}

/// "Other" is never stored as-is: it requires a non-empty custom category,
/// which replaces it.
fn resolve_category(
    kind: TransactionType,
    choice: &str,
    custom: Option<&str>,
) -> Result<String, LedgerError> {
    let choice = choice.trim();
    if !kind.categories().contains(&choice) {
        return Err(LedgerError::Validation(format!(
            "unknown {} category {choice:?}",
            kind.as_str().to_lowercase()
        )));
    }
    if choice == "Other" {
        let custom = custom.map(str::trim).unwrap_or("");
        if custom.is_empty() {
            return Err(LedgerError::Validation(
                "a custom category is required for Other".to_string(),
            ));
        }
        return Ok(custom.to_string());
    }
    Ok(choice.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use crate::db::repository::list_all;

    #[test]
    fn builds_a_record_from_valid_fields() {
        let draft = build_transaction(
            TransactionType::Income,
            "Salary",
            None,
            "1500.50",
            "March payroll",
            "2024-03-01",
        )
        .unwrap();

        assert_eq!(draft.category, "Salary");
        assert_eq!(draft.description, "March payroll");
        assert_eq!(draft.amount, Decimal::from_str("1500.50").unwrap());
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn other_substitutes_the_custom_category() {
        let draft = build_transaction(
            TransactionType::Expense,
            "Other",
            Some("Pet supplies"),
            "12",
            "",
            "2024-05-01",
        )
        .unwrap();

        assert_eq!(draft.category, "Pet supplies");
        assert_eq!(draft.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn other_requires_a_custom_category() {
        for custom in [None, Some(""), Some("   ")] {
            let err = build_transaction(
                TransactionType::Income,
                "Other",
                custom,
                "10",
                "x",
                "2024-05-01",
            )
            .unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
    }

    #[test]
    fn category_must_come_from_the_catalog_for_the_type() {
        // Fuel is an expense category, not an income one
        let err = build_transaction(
            TransactionType::Income,
            "Fuel",
            None,
            "10",
            "x",
            "2024-05-01",
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn amount_must_be_strictly_numeric() {
        for amount in ["", "  ", "12,50", "ten"] {
            let err = build_transaction(
                TransactionType::Expense,
                "Fuel",
                None,
                amount,
                "x",
                "2024-05-01",
            )
            .unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
    }

    #[test]
    fn negative_and_zero_amounts_are_accepted() {
        for amount in ["-5", "0"] {
            build_transaction(TransactionType::Expense, "Fuel", None, amount, "x", "2024-05-01")
                .unwrap();
        }
    }

    #[test]
    fn date_must_be_iso() {
        let err = build_transaction(
            TransactionType::Expense,
            "Fuel",
            None,
            "10",
            "x",
            "05/01/2024",
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn built_record_persists_with_substitutions() {
        let conn = establish_test_connection().unwrap();
        let draft = build_transaction(
            TransactionType::Expense,
            "Other",
            Some("Pet supplies"),
            "42.25",
            "",
            "2024-05-01",
        )
        .unwrap();
        repository::insert(&conn, &draft).unwrap();

        let all = list_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category, "Pet supplies");
        assert_eq!(all[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(all[0].amount, Decimal::from_str("42.25").unwrap());
    }
}
