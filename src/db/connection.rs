use rusqlite::Connection;

use crate::errors::LedgerError;

pub const DB_PATH: &str = "finance.db";

/// Opens the ledger database and makes sure the schema is in place. Any
/// failure here is fatal for the process; callers must not proceed without
/// a working connection.
pub fn open_ledger(path: &str) -> Result<Connection, LedgerError> {
    let conn = Connection::open(path).map_err(|source| LedgerError::Unavailable {
        path: path.to_string(),
        source,
    })?;
    if let Err(err) = ensure_schema(&conn) {
        return Err(match err {
            LedgerError::Storage(source) => LedgerError::Unavailable {
                path: path.to_string(),
                source,
            },
            other => other,
        });
    }
    Ok(conn)
}

/// Idempotent schema setup: creates the `finance` table when absent and
/// migrates databases written before the `type` column existed.
pub fn ensure_schema(conn: &Connection) -> Result<(), LedgerError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS finance (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            type TEXT,
            amount REAL,
            category TEXT,
            description TEXT,
            date TEXT
        )",
        [],
    )?;

    let mut stmt = conn.prepare("PRAGMA table_info(finance)")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    if !columns.iter().any(|column| column == "type") {
        conn.execute("ALTER TABLE finance ADD COLUMN type TEXT", [])?;
    }

    // Rows written before the column existed carry NULL; they predate income
    // tracking, so they are expenses. Runs unconditionally because older
    // databases may have gained the column without a backfill.
    conn.execute(
        "UPDATE finance SET type = 'Expense' WHERE type IS NULL",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection, LedgerError> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}
