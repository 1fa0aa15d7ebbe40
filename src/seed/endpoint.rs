//! The endpoint that reloads the transactions from the seed source.

use axum::{Json, extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::seed::{SeedState, load_seed_data};

/// The body of a successful response from [initialize_endpoint].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// A message confirming the data was loaded.
    pub message: String,
    /// The number of transactions loaded.
    pub count: usize,
}

/// A route handler that reloads the transactions from the seed source,
/// replacing every stored transaction.
pub async fn initialize_endpoint(
    State(state): State<SeedState>,
) -> Result<Json<InitializeResponse>, Response> {
    let count = load_seed_data(&state)
        .await
        .map_err(|error| error.into_api_response("Error initializing database."))?;

    Ok(Json(InitializeResponse {
        message: "Database initialized successfully!".to_owned(),
        count,
    }))
}
