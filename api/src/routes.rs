use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cron_auth_middleware;
use crate::state::AppState;

/// Create the main application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Trigger route, reachable only by the trusted scheduler
    let cron_routes = Router::new()
        .route("/update", get(handlers::update::update))
        .layer(axum::middleware::from_fn(cron_auth_middleware));

    // Public routes (no authorization)
    let public_routes = Router::new().route("/health", get(handlers::health::health_check));

    Router::new()
        .merge(public_routes)
        .merge(cron_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
