//! The endpoint for listing and searching the transactions sold in a month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    response::Response,
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    db::lock_connection,
    month::SaleMonth,
    pagination::{Page, PaginationConfig},
    transaction::search::{TransactionPage, TransactionSearch, search_transactions},
};

const ERROR_SUMMARY: &str = "Error fetching transactions.";

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionListState {
    /// The database connection for querying transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The defaults for paging through transactions.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for listing transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListParams {
    /// The month name or number to list transactions for, defaults to January.
    pub month: Option<String>,
    /// The page number, starting from 1.
    pub page: Option<u64>,
    /// The maximum number of transactions on a page.
    pub per_page: Option<u64>,
    /// Text to search for in the title and description.
    pub search: Option<String>,
}

/// A route handler for getting a page of the transactions sold in a month.
///
/// Responds with the transactions on the page and the total number of matching
/// transactions so that clients can work out the number of pages.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionListState>,
    params: Result<Query<TransactionListParams>, QueryRejection>,
) -> Result<Json<TransactionPage>, Response> {
    list_transactions(&state, params)
        .map(Json)
        .map_err(|error| error.into_api_response(ERROR_SUMMARY))
}

fn list_transactions(
    state: &TransactionListState,
    params: Result<Query<TransactionListParams>, QueryRejection>,
) -> Result<TransactionPage, Error> {
    let Query(params) = params.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;

    let search = TransactionSearch {
        month: SaleMonth::parse_or_default(params.month.as_deref())?,
        page: Page::from_params(params.page, params.per_page, &state.pagination_config)?,
        text: params.search.unwrap_or_default(),
    };

    let connection = lock_connection(&state.db_connection)?;

    search_transactions(&search, &connection)
}
