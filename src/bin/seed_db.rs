use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{initialize_db, parse_seed, replace_all_transactions};

/// A utility for loading seed transactions into a database for the sales dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path of the SQLite database. Created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// File path of a JSON array of transactions.
    #[arg(long)]
    seed_file: String,
}

/// Replace every transaction in a database with the contents of a seed file.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let seed_file = Path::new(&args.seed_file);

    if !seed_file.is_file() {
        eprintln!("No seed file at {seed_file:#?}!");
        exit(1);
    }

    println!("Reading seed data from {seed_file:#?}");
    let transactions = parse_seed(&fs::read(seed_file)?)?;

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;

    initialize_db(&conn)?;

    println!("Replacing transactions...");
    let count = replace_all_transactions(&transactions, &conn)?;

    println!("Success! Loaded {count} transactions.");

    Ok(())
}
