//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db::initialize, pagination::PaginationConfig, readiness::Readiness, seed::SeedSource,
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Where the transaction data is loaded from on start up and on request.
    pub seed_source: Arc<dyn SeedSource>,

    /// Whether the transaction data has been loaded and can be queried.
    pub readiness: Readiness,

    /// The defaults for paging through transactions.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// The returned state is not ready to serve transaction queries until the seed data
    /// has been loaded, see [crate::load_seed_data].
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        seed_source: Arc<dyn SeedSource>,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            seed_source,
            readiness: Readiness::default(),
            pagination_config,
        })
    }
}
