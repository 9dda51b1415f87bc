mod db;
mod errors;
mod models;
mod operations;

use std::io;

use errors::LedgerError;
use operations::chart;

enum UserCommand {
    Add,
    List,
    Delete,
    Chart,
    Exit,
    Unknown,
}

fn main() {
    println!("Personal finance ledger");
    let conn = match db::connection::open_ledger(db::connection::DB_PATH) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    loop {
        println!("Enter a command (add, list, delete, chart, exit):");
        let input = match read_user_input() {
            Ok(input) => input,
            Err(err) => {
                println!("Error reading input: {err}");
                continue;
            }
        };

        match parse_command(&input) {
            UserCommand::Add => match operations::add::prompt_and_add(&conn) {
                Ok(record) => println!("Added record #{}.", record.id),
                Err(err) => println!("Error adding record: {err}"),
            },
            UserCommand::List => {
                if let Err(err) = operations::list::run_list(&conn) {
                    println!("Error listing records: {err}");
                }
            }
            UserCommand::Delete => match operations::remove::prompt_and_remove(&conn) {
                Ok(0) => println!("No records removed."),
                Ok(removed) => println!("Removed {removed} record(s)."),
                Err(err) => println!("Error deleting record: {err}"),
            },
            UserCommand::Chart => {
                println!("Chart (expense-categories, income-categories, by-date, compare, all):");
                let choice = match read_user_input() {
                    Ok(choice) => choice,
                    Err(err) => {
                        println!("Error reading input: {err}");
                        continue;
                    }
                };
                match chart::parse_choice(&choice) {
                    Some(kinds) => {
                        for kind in kinds {
                            if let Err(err) = chart::run_chart(&conn, kind) {
                                println!("Error rendering chart: {err}");
                                break;
                            }
                        }
                    }
                    None => println!("Unknown chart {:?}.", choice.trim()),
                }
            }
            UserCommand::Exit => {
                println!("Bye.");
                break;
            }
            UserCommand::Unknown => println!("Unknown command."),
        }
    }
}

fn read_user_input() -> Result<String, LedgerError> {
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

fn parse_command(input: &str) -> UserCommand {
    match input {
        "add" => UserCommand::Add,
        "list" => UserCommand::List,
        "delete" => UserCommand::Delete,
        "chart" => UserCommand::Chart,
        "exit" => UserCommand::Exit,
        _ => UserCommand::Unknown,
    }
}
