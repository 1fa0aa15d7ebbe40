//! Loads the transaction data from a seed source.
//!
//! This module contains:
//! - The `SeedSource` trait with HTTP and file implementations
//! - Validation and conversion of seed records into transactions
//! - The loader that replaces the stored transactions and the endpoint that triggers it

mod endpoint;
mod prepare;
mod source;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::OffsetDateTime;

pub use endpoint::initialize_endpoint;
pub use prepare::prepare_transactions;
pub use source::{
    DEFAULT_SEED_URL, FileSeedSource, HttpSeedSource, SeedPrice, SeedRecord, SeedSource,
    seed_source_from_location,
};

use crate::{
    AppState, Error, db::lock_connection, readiness::Readiness,
    transaction::replace_all_transactions,
};

/// The state needed for loading the seed data.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection for storing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// Where the seed data is fetched from.
    pub seed_source: Arc<dyn SeedSource>,
    /// Set once the seed data has been stored.
    pub readiness: Readiness,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            seed_source: state.seed_source.clone(),
            readiness: state.readiness.clone(),
        }
    }
}

/// Fetch the seed data, replace every stored transaction with it and mark the
/// data as ready to be served.
///
/// The seed data is fetched and checked before the database is locked, so
/// requests are served from the previous data in the meantime. If any step
/// fails the stored transactions and the readiness flag are left unchanged.
///
/// Returns the number of transactions stored.
///
/// # Errors
/// Returns:
/// - [Error::SeedSourceUnavailable] if the seed data cannot be fetched,
/// - [Error::InvalidSeedRecord] if a seed record is not a valid transaction,
/// - [Error::DatabaseLockError] or [Error::SqlError] if the transactions cannot be stored.
pub async fn load_seed_data(state: &SeedState) -> Result<usize, Error> {
    let location = state.seed_source.location();
    tracing::info!("Loading seed data from {location}");

    let records = state.seed_source.fetch().await?;
    tracing::debug!("Fetched {} seed records from {location}", records.len());

    let transactions = prepare_transactions(records, OffsetDateTime::now_utc())?;

    let count = {
        let connection = lock_connection(&state.db_connection)?;
        replace_all_transactions(&transactions, &connection)?
    };

    state.readiness.mark_ready();
    tracing::info!("Loaded {count} transactions from {location}");

    Ok(count)
}
