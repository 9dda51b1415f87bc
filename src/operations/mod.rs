pub mod add;
pub mod chart;
pub mod list;
pub mod remove;

use std::io::{self, Write};

use crate::errors::LedgerError;

pub(crate) fn prompt(label: &str) -> Result<String, LedgerError> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
