//! The health check endpoint, which reports whether the transaction data has loaded.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::readiness::Readiness;

/// The body of the health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always "ok" if the server can respond.
    pub status: String,
    /// Whether the transaction data has been loaded.
    pub ready: bool,
}

/// A route handler that reports the server is up and whether it can serve transaction data.
pub async fn get_health(State(readiness): State<Readiness>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_owned(),
        ready: readiness.is_ready(),
    })
}
