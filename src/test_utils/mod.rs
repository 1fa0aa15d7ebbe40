#![allow(missing_docs)]

use std::sync::{Arc, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    db::initialize,
    pagination::PaginationConfig,
    seed::{SeedPrice, SeedRecord, SeedSource},
    transaction::{TRANSACTION_COLUMNS, Transaction, insert_transaction, map_transaction_row},
};

/// An initialized in-memory database.
pub(crate) fn get_test_connection() -> Connection {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");
    initialize(&connection).expect("Could not initialize database.");
    connection
}

/// An app state over an empty in-memory database that is not yet ready.
pub(crate) fn get_test_state(seed_source: Arc<dyn SeedSource>) -> AppState {
    AppState::new(
        Connection::open_in_memory().expect("Could not open database in memory."),
        seed_source,
        PaginationConfig::default(),
    )
    .expect("Could not create app state.")
}

/// An app state over an empty in-memory database that is ready to serve requests.
pub(crate) fn get_ready_test_state() -> AppState {
    let state = get_test_state(Arc::new(StaticSeedSource::new(Vec::new())));
    state.readiness.mark_ready();
    state
}

pub(crate) fn lock_test_connection(state: &AppState) -> MutexGuard<'_, Connection> {
    state
        .db_connection
        .lock()
        .expect("Could not acquire database lock.")
}

pub(crate) fn insert_test_transaction(
    connection: &Connection,
    price: f64,
    sold: bool,
    category: &str,
    date_of_sale: OffsetDateTime,
) -> Transaction {
    let transaction = Transaction::build("Test product", price, date_of_sale)
        .description("A product for testing")
        .category(category)
        .sold(sold)
        .image("https://example.com/product.jpg")
        .finalize();

    insert_transaction(&transaction, connection).expect("Could not insert transaction.");

    transaction
}

pub(crate) fn select_all_transactions(connection: &Connection) -> Vec<Transaction> {
    connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM product_transaction ORDER BY date_of_sale, id"
        ))
        .expect("Could not prepare query.")
        .query_map([], map_transaction_row)
        .expect("Could not query transactions.")
        .collect::<Result<Vec<_>, _>>()
        .expect("Could not read transaction rows.")
}

/// A valid seed record sold in January 2022.
pub(crate) fn seed_record(title: &str, price: f64) -> SeedRecord {
    SeedRecord {
        id: None,
        title: title.to_owned(),
        description: format!("The description of {title}"),
        price: SeedPrice::Number(price),
        category: "electronics".to_owned(),
        sold: Some(false),
        date_of_sale: Some("2022-01-15T10:00:00Z".to_owned()),
        image: "https://example.com/product.jpg".to_owned(),
    }
}

/// A seed source that returns a fixed set of records.
#[derive(Debug, Clone)]
pub(crate) struct StaticSeedSource {
    records: Vec<SeedRecord>,
}

impl StaticSeedSource {
    pub(crate) fn new(records: Vec<SeedRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> Result<Vec<SeedRecord>, Error> {
        Ok(self.records.clone())
    }

    fn location(&self) -> &str {
        "static test data"
    }
}

/// A seed source that can never be reached.
#[derive(Debug, Clone)]
pub(crate) struct FailingSeedSource;

#[async_trait]
impl SeedSource for FailingSeedSource {
    async fn fetch(&self) -> Result<Vec<SeedRecord>, Error> {
        Err(Error::SeedSourceUnavailable(
            "the test source is unavailable".to_owned(),
        ))
    }

    fn location(&self) -> &str {
        "failing test source"
    }
}
