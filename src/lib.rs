//! A JSON REST API for a product transaction dashboard.
//!
//! Transactions are imported once from a seed source and then queried by the
//! month of their sale: a paginated, searchable listing, summary statistics,
//! a price range histogram and a breakdown by category.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod dashboard;
mod db;
mod endpoints;
mod health;
mod month;
mod pagination;
mod readiness;
mod routing;
mod seed;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{
    CategoryCount, DashboardSummary, PRICE_RANGES, PriceRange, PriceRangeCount, SalesStatistics,
    get_category_counts, get_dashboard_summary, get_price_range_counts, get_sales_statistics,
};
pub use db::initialize as initialize_db;
pub use month::SaleMonth;
pub use pagination::{Page, PaginationConfig};
pub use readiness::Readiness;
pub use routing::build_router;
pub use seed::{
    DEFAULT_SEED_URL, FileSeedSource, HttpSeedSource, SeedPrice, SeedRecord, SeedSource,
    SeedState, load_seed_data, prepare_transactions, seed_source_from_location,
};
pub use transaction::{
    Transaction, TransactionBuilder, TransactionPage, TransactionSearch, count_transactions,
    replace_all_transactions, search_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month used to filter transactions is not a month name (e.g.,
    /// "March") or a month number from 1 to 12.
    #[error("\"{0}\" is not a valid month, expected a month name such as \"March\" or a number from 1 to 12")]
    InvalidMonth(String),

    /// The requested page number or page size was zero.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// The query string could not be parsed, e.g. a page number that is not a number.
    #[error("invalid query parameters: {0}")]
    InvalidQuery(String),

    /// The transaction data has not finished loading from the seed source.
    ///
    /// Clients should retry later, or trigger a reload via the initialize endpoint.
    #[error("the transaction data has not been loaded yet, try again shortly")]
    NotReady,

    /// The seed data could not be fetched or decoded.
    #[error("failed to fetch data from the seed source: {0}")]
    SeedSourceUnavailable(String),

    /// A record from the seed source did not describe a valid transaction.
    ///
    /// `index` is the zero-based position of the record in the seed data.
    #[error("seed record #{index} is invalid: {reason}")]
    InvalidSeedRecord {
        /// The position of the record in the seed data.
        index: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// A short summary of what the server was trying to do.
    pub error: String,
    /// The reason the request failed.
    pub details: String,
}

impl Error {
    /// The HTTP status code that best describes this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_) | Error::InvalidPagination(_) | Error::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            Error::SeedSourceUnavailable(_)
            | Error::InvalidSeedRecord { .. }
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into a JSON response with `summary` as the error
    /// message and the error's description as the details.
    pub(crate) fn into_api_response(self, summary: &str) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{summary} {self}");
        } else {
            tracing::debug!("{summary} {self}");
        }

        (
            status,
            Json(ErrorResponse {
                error: summary.to_owned(),
                details: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_api_response("Something went wrong!")
    }
}
