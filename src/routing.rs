//! Application router configuration with gated and ungated route definitions.

use axum::{
    Router,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, ErrorResponse,
    dashboard::{
        get_bar_chart_endpoint, get_combined_endpoint, get_pie_chart_endpoint,
        get_statistics_endpoint,
    },
    endpoints,
    health::get_health,
    readiness::readiness_guard,
    seed::initialize_endpoint,
    transaction::get_transactions_endpoint,
};

/// Return a router with all the app's routes.
///
/// Routes that read transactions respond with 503 Service Unavailable until
/// the seed data has been loaded.
pub fn build_router(state: AppState) -> Router {
    let ungated_routes = Router::new()
        .route(endpoints::INITIALIZE, get(initialize_endpoint))
        .route(endpoints::HEALTH, get(get_health));

    let gated_routes = Router::new()
        .route(endpoints::TRANSACTIONS, get(get_transactions_endpoint))
        .route(
            endpoints::TRANSACTIONS_TRAILING_SLASH,
            get(get_transactions_endpoint),
        )
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::BAR_CHART, get(get_bar_chart_endpoint))
        .route(endpoints::PIE_CHART, get(get_pie_chart_endpoint))
        .route(endpoints::COMBINED_RESPONSE, get(get_combined_endpoint))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            readiness_guard,
        ));

    gated_routes
        .merge(ungated_routes)
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found(uri: Uri) -> Response {
    tracing::debug!("No route for {uri}");

    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found.".to_owned(),
            details: format!("there is no endpoint at {}", uri.path()),
        }),
    )
        .into_response()
}
