//! Dashboard route handlers.
//!
//! Each handler reads the month from the query string, defaulting to January,
//! and responds with JSON.

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
    dashboard::{
        category::{CategoryCount, get_category_counts},
        combined::{DashboardSummary, get_dashboard_summary},
        price_range::{PriceRangeCount, get_price_range_counts},
        statistics::{SalesStatistics, get_sales_statistics},
    },
    db::lock_connection,
    month::SaleMonth,
};

/// The state needed for the dashboard endpoints.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for querying transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The query parameters shared by the dashboard endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    /// The month name or number, defaults to January.
    pub month: Option<String>,
}

/// Run `query` for the requested month while holding the database lock.
fn query_month<T>(
    state: &DashboardState,
    params: Result<Query<MonthParams>, QueryRejection>,
    query: impl FnOnce(SaleMonth, &Connection) -> Result<T, Error>,
) -> Result<T, Error> {
    let Query(params) = params.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;
    let month = SaleMonth::parse_or_default(params.month.as_deref())?;

    let connection = lock_connection(&state.db_connection)?;

    query(month, &connection)
}

/// A route handler for the sales totals of a month.
pub async fn get_statistics_endpoint(
    State(state): State<DashboardState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<SalesStatistics>, Response> {
    query_month(&state, params, get_sales_statistics)
        .map(Json)
        .map_err(|error| error.into_api_response("Error fetching statistics."))
}

/// A route handler for the price histogram of a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<DashboardState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Response> {
    query_month(&state, params, get_price_range_counts)
        .map(Json)
        .map_err(|error| error.into_api_response("Error fetching bar chart data."))
}

/// A route handler for the category breakdown of a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<DashboardState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Response> {
    query_month(&state, params, get_category_counts)
        .map(Json)
        .map_err(|error| error.into_api_response("Error fetching pie chart data."))
}

/// A route handler for the statistics, price histogram and category breakdown
/// of a month in a single response.
pub async fn get_combined_endpoint(
    State(state): State<DashboardState>,
    params: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<DashboardSummary>, Response> {
    query_month(&state, params, get_dashboard_summary)
        .map(Json)
        .map_err(|error| error.into_api_response("Error fetching combined response."))
}
