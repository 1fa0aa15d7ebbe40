use std::{
    error::Error,
    sync::{Arc, Mutex},
};

use clap::Parser;
use rusqlite::Connection;

use transaction_dashboard::{
    DEFAULT_SEED_URL, Readiness, SeedSource, SeedState, initialize_db, load_seed_data,
    seed_source_from_location,
};

/// A utility for loading the seed data into a database ahead of time, so the
/// server can be started with `--skip-seed`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long, env = "DB_PATH", default_value = "transactions.db")]
    db_path: String,

    /// The URL or file path of the JSON seed data.
    #[arg(long, env = "SEED_SOURCE", default_value = DEFAULT_SEED_URL)]
    seed_source: String,
}

/// Replace the transactions in a database with the seed data.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let seed_source = seed_source_from_location(&args.seed_source)?;
    println!("Loading seed data from {}...", seed_source.location());

    let state = SeedState {
        db_connection: Arc::new(Mutex::new(conn)),
        seed_source,
        readiness: Readiness::default(),
    };
    let count = load_seed_data(&state).await?;

    println!("Success! Stored {count} transactions.");

    Ok(())
}
