//! Middleware that holds back requests for transaction data until the data has been loaded.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{AppState, Error};

/// A flag shared between the seed loader and request handlers that is set once
/// the transaction data has been loaded.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct Readiness(Arc<AtomicBool>);

impl Readiness {
    /// Whether the transaction data has been loaded.
    pub fn is_ready(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Allow requests for transaction data to be served.
    ///
    /// Once set the flag is never cleared, so later reloads keep serving the
    /// previous data until the new data replaces it.
    pub fn mark_ready(&self) {
        if !self.0.swap(true, Ordering::AcqRel) {
            tracing::info!("Transaction data loaded, now serving requests");
        }
    }
}

impl FromRef<AppState> for Readiness {
    fn from_ref(state: &AppState) -> Self {
        state.readiness.clone()
    }
}

/// Middleware function that only runs the request if the transaction data has been loaded,
/// otherwise a 503 Service Unavailable response is returned.
pub async fn readiness_guard(
    State(readiness): State<Readiness>,
    request: Request,
    next: Next,
) -> Response {
    if readiness.is_ready() {
        next.run(request).await
    } else {
        Error::NotReady.into_api_response("Transaction data is still loading.")
    }
}

#[cfg(test)]
mod readiness_guard_tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;

    use crate::ErrorResponse;

    use super::{Readiness, readiness_guard};

    const TEST_GUARDED_ROUTE: &str = "/guarded";
    const TEST_OPEN_ROUTE: &str = "/open";

    async fn test_handler() -> &'static str {
        "Hello, World!"
    }

    fn get_test_server(readiness: Readiness) -> TestServer {
        let app = Router::new()
            .route(TEST_GUARDED_ROUTE, get(test_handler))
            .route_layer(middleware::from_fn_with_state(
                readiness.clone(),
                readiness_guard,
            ))
            .route(TEST_OPEN_ROUTE, get(test_handler))
            .with_state(readiness);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[test]
    fn starts_not_ready() {
        assert!(!Readiness::default().is_ready());
    }

    #[test]
    fn clones_share_flag() {
        let readiness = Readiness::default();
        let clone = readiness.clone();

        clone.mark_ready();

        assert!(readiness.is_ready());
    }

    #[tokio::test]
    async fn guarded_route_is_unavailable_before_ready() {
        let server = get_test_server(Readiness::default());

        let response = server.get(TEST_GUARDED_ROUTE).await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = response.json::<ErrorResponse>();
        assert_eq!(body.error, "Transaction data is still loading.");
    }

    #[tokio::test]
    async fn open_route_is_available_before_ready() {
        let server = get_test_server(Readiness::default());

        server.get(TEST_OPEN_ROUTE).await.assert_status_ok();
    }

    #[tokio::test]
    async fn guarded_route_is_available_after_ready() {
        let readiness = Readiness::default();
        let server = get_test_server(readiness.clone());

        readiness.mark_ready();

        let response = server.get(TEST_GUARDED_ROUTE).await;
        response.assert_status_ok();
        response.assert_text("Hello, World!");
    }
}
