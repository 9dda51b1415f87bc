use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::errors::LedgerError;
use crate::models::transaction::{NewTransaction, Transaction, TransactionType};

/// Inserts a validated record and returns it with its freshly assigned id.
///
/// Input validation happens at the boundary; the checks here only guard
/// against callers bypassing it.
pub fn insert(conn: &Connection, record: &NewTransaction) -> Result<Transaction, LedgerError> {
    if record.category.trim().is_empty() {
        return Err(LedgerError::Validation(
            "category must not be empty".to_string(),
        ));
    }
    if record.description.trim().is_empty() {
        return Err(LedgerError::Validation(
            "description must not be empty".to_string(),
        ));
    }
    let amount = record.amount.to_f64().ok_or_else(|| {
        LedgerError::Validation(format!("amount {} is not representable", record.amount))
    })?;

    conn.execute(
        "INSERT INTO finance (type, amount, category, description, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![
            record.transaction_type.as_str(),
            amount,
            &record.category,
            &record.description,
            record.date.to_string(),
        ],
    )?;

    Ok(Transaction {
        id: conn.last_insert_rowid(),
        transaction_type: record.transaction_type,
        amount: record.amount,
        category: record.category.clone(),
        description: record.description.clone(),
        date: record.date,
    })
}

/// Deletes every row whose five fields equal the arguments and returns the
/// count removed. Duplicate rows share the same tuple, so they all go at
/// once; zero matches is not an error.
pub fn delete_matching(
    conn: &Connection,
    kind: TransactionType,
    amount: Decimal,
    category: &str,
    description: &str,
    date: NaiveDate,
) -> Result<usize, LedgerError> {
    let amount = amount
        .to_f64()
        .ok_or_else(|| LedgerError::Validation(format!("amount {amount} is not representable")))?;

    let removed = conn.execute(
        "DELETE FROM finance
         WHERE type = ?1 AND amount = ?2 AND category = ?3 AND description = ?4 AND date = ?5",
        rusqlite::params![kind.as_str(), amount, category, description, date.to_string()],
    )?;
    Ok(removed)
}

/// Full snapshot of the ledger in insertion order (id ascending).
pub fn list_all(conn: &Connection) -> Result<Vec<Transaction>, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT id, type, amount, category, description, date
         FROM finance ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        let kind: String = row.get(1)?;
        let amount: f64 = row.get(2)?;
        let date: String = row.get(5)?;

        Ok(Transaction {
            id: row.get(0)?,
            transaction_type: TransactionType::parse(&kind).ok_or_else(|| {
                rusqlite::Error::InvalidParameterName(format!("unknown transaction type {kind:?}"))
            })?,
            amount: Decimal::from_f64(amount).ok_or_else(|| {
                rusqlite::Error::InvalidParameterName(format!("unreadable amount {amount}"))
            })?,
            category: row.get(3)?,
            description: row.get(4)?,
            date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
        })
    })?;

    let mut records = Vec::new();
    for record in rows {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::establish_test_connection;
    use std::str::FromStr;

    fn draft(
        kind: TransactionType,
        amount: &str,
        category: &str,
        description: &str,
        date: &str,
    ) -> NewTransaction {
        NewTransaction {
            transaction_type: kind,
            amount: Decimal::from_str(amount).unwrap(),
            category: category.to_string(),
            description: description.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn insert_then_list_contains_the_record() {
        let conn = establish_test_connection().unwrap();
        let stored = insert(
            &conn,
            &draft(
                TransactionType::Expense,
                "250.75",
                "Supermarkets",
                "weekly groceries",
                "2024-02-10",
            ),
        )
        .unwrap();

        let all = list_all(&conn).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], stored);
        assert_eq!(all[0].category, "Supermarkets");
        assert_eq!(all[0].amount, Decimal::from_str("250.75").unwrap());
    }

    #[test]
    fn ids_are_assigned_in_insertion_order() {
        let conn = establish_test_connection().unwrap();
        let first = insert(
            &conn,
            &draft(TransactionType::Income, "100", "Salary", "a", "2024-01-01"),
        )
        .unwrap();
        let second = insert(
            &conn,
            &draft(TransactionType::Expense, "20", "Fuel", "b", "2024-01-02"),
        )
        .unwrap();
        assert!(second.id > first.id);

        let all = list_all(&conn).unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn insert_rejects_empty_category() {
        let conn = establish_test_connection().unwrap();
        let err = insert(
            &conn,
            &draft(TransactionType::Expense, "10", "  ", "x", "2024-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(list_all(&conn).unwrap().is_empty());
    }

    #[test]
    fn insert_rejects_blank_description() {
        let conn = establish_test_connection().unwrap();
        let err = insert(
            &conn,
            &draft(TransactionType::Expense, "10", "Fuel", "", "2024-01-01"),
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn delete_matching_without_matches_returns_zero_and_keeps_rows() {
        let conn = establish_test_connection().unwrap();
        insert(
            &conn,
            &draft(TransactionType::Expense, "10", "Fuel", "petrol", "2024-01-01"),
        )
        .unwrap();

        let removed = delete_matching(
            &conn,
            TransactionType::Expense,
            Decimal::from_str("99").unwrap(),
            "Fuel",
            "petrol",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap();

        assert_eq!(removed, 0);
        assert_eq!(list_all(&conn).unwrap().len(), 1);
    }

    #[test]
    fn delete_matching_removes_every_duplicate() {
        let conn = establish_test_connection().unwrap();
        let twin = draft(TransactionType::Expense, "12.5", "Fuel", "petrol", "2024-01-05");
        insert(&conn, &twin).unwrap();
        insert(&conn, &twin).unwrap();
        insert(
            &conn,
            &draft(TransactionType::Income, "500", "Salary", "payday", "2024-01-05"),
        )
        .unwrap();

        let removed = delete_matching(
            &conn,
            twin.transaction_type,
            twin.amount,
            &twin.category,
            &twin.description,
            twin.date,
        )
        .unwrap();

        assert_eq!(removed, 2);
        let survivors = list_all(&conn).unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].category, "Salary");
    }
}
