use rusqlite::Connection;

use crate::db::repository;
use crate::errors::LedgerError;
use crate::operations::{list, prompt};

/// Lets the user pick a row from the listing and deletes it. Deletion
/// matches on the full field tuple, so duplicate rows go with it; the
/// returned count makes that visible to the caller.
pub fn prompt_and_remove(conn: &Connection) -> Result<usize, LedgerError> {
    let records = repository::list_all(conn)?;
    if records.is_empty() {
        println!("The ledger is empty.");
        return Ok(0);
    }
    list::print_table(&records);

    let input = prompt("Row number to delete: ")?;
    let row: usize = input
        .parse()
        .map_err(|_| LedgerError::Validation(format!("{input:?} is not a row number")))?;
    if row == 0 || row > records.len() {
        return Err(LedgerError::Validation(format!("row {row} is out of range")));
    }

    let record = &records[row - 1];
    repository::delete_matching(
        conn,
        record.transaction_type,
        record.amount,
        &record.category,
        &record.description,
        record.date,
    )
}
