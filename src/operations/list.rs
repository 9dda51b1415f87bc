use rusqlite::Connection;

use crate::db::repository;
use crate::errors::LedgerError;
use crate::models::transaction::Transaction;

pub fn run_list(conn: &Connection) -> Result<(), LedgerError> {
    let records = repository::list_all(conn)?;
    if records.is_empty() {
        println!("The ledger is empty.");
    } else {
        print_table(&records);
    }
    Ok(())
}

pub fn print_table(records: &[Transaction]) {
    println!(
        "{:>4}  {:<8}  {:>12}  {:<22}  {:<28}  {:<10}",
        "#", "Type", "Amount", "Category", "Description", "Date"
    );
    for (index, record) in records.iter().enumerate() {
        println!(
            "{:>4}  {:<8}  {:>12}  {:<22}  {:<28}  {}",
            index + 1,
            record.transaction_type.as_str(),
            record.amount.to_string(),
            record.category,
            record.description,
            record.date,
        );
    }
}
