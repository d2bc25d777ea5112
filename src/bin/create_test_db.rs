use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use product_transactions::{initialize_db, insert_transactions, parse_seed_documents};

/// A utility for creating a test database from a local copy of the product transaction dataset.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// File path to a JSON array of product transactions.
    #[arg(long, short)]
    input_path: String,
}

/// Create a database and fill it with the transactions from a JSON file.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Reading transactions from {:#?}", args.input_path);
    let documents: Vec<serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&args.input_path)?)?;
    let transactions = parse_seed_documents(documents)?;

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let count = insert_transactions(&transactions, &conn)?;

    println!("Inserted {count} transactions. Success!");

    Ok(())
}
