//! Read-only summaries over the ledger. Every query recomputes from the live
//! table; nothing is cached between calls.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::errors::LedgerError;
use crate::models::transaction::TransactionType;

/// Per-category totals for one transaction type. Categories without records
/// do not appear; an empty ledger yields an empty map.
pub fn sum_by_category(
    conn: &Connection,
    kind: TransactionType,
) -> Result<BTreeMap<String, Decimal>, LedgerError> {
    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount) FROM finance WHERE type = ?1 GROUP BY category",
    )?;
    let rows = stmt.query_map([kind.as_str()], |row| {
        let category: String = row.get(0)?;
        let total: f64 = row.get(1)?;
        let total = Decimal::from_f64(total).ok_or_else(|| {
            rusqlite::Error::InvalidParameterName(format!("unreadable total {total}"))
        })?;
        Ok((category, total))
    })?;

    let mut totals = BTreeMap::new();
    for row in rows {
        let (category, total) = row?;
        totals.insert(category, total);
    }
    Ok(totals)
}

/// Per-date totals for one transaction type, keyed by calendar date.
pub fn sum_by_date(
    conn: &Connection,
    kind: TransactionType,
) -> Result<BTreeMap<NaiveDate, Decimal>, LedgerError> {
    let mut stmt =
        conn.prepare("SELECT date, SUM(amount) FROM finance WHERE type = ?1 GROUP BY date")?;
    let rows = stmt.query_map([kind.as_str()], |row| {
        let date: String = row.get(0)?;
        let total: f64 = row.get(1)?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;
        let total = Decimal::from_f64(total).ok_or_else(|| {
            rusqlite::Error::InvalidParameterName(format!("unreadable total {total}"))
        })?;
        Ok((date, total))
    })?;

    let mut totals = BTreeMap::new();
    for row in rows {
        let (date, total) = row?;
        totals.insert(date, total);
    }
    Ok(totals)
}

/// Grand total for one transaction type; zero when no records exist.
pub fn total(conn: &Connection, kind: TransactionType) -> Result<Decimal, LedgerError> {
    let total: f64 = conn.query_row(
        "SELECT IFNULL(SUM(amount), 0) FROM finance WHERE type = ?1",
        [kind.as_str()],
        |row| row.get(0),
    )?;
    Decimal::from_f64(total)
        .ok_or_else(|| rusqlite::Error::InvalidParameterName(format!("unreadable total {total}")).into())
}

/// Sorted union of the dates present in either summary. A date missing on
/// one side reads as zero once the caller lines the two series up.
pub fn union_dates(
    a: &BTreeMap<NaiveDate, Decimal>,
    b: &BTreeMap<NaiveDate, Decimal>,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = a.keys().chain(b.keys()).copied().collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

/// Totals aligned to `dates`, with missing dates filled in as zero.
pub fn series_values(
    dates: &[NaiveDate],
    totals: &BTreeMap<NaiveDate, Decimal>,
) -> Vec<Decimal> {
    dates
        .iter()
        .map(|date| totals.get(date).copied().unwrap_or(Decimal::ZERO))
        .collect()
}
