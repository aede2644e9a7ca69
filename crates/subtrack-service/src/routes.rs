//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, subscriptions, totals};
use crate::state::AppState;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Subscriptions (concurrency-limited)
/// - `POST /subs` - Create a subscription
/// - `GET /subs` - List subscriptions
/// - `GET /subs/total` - Total price over the matching subscriptions
/// - `GET /subs/:id` - Get a subscription
/// - `PUT /subs/:id` - Replace a subscription
/// - `DELETE /subs/:id` - Delete a subscription
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;
    let max_concurrent_requests = state.config.max_concurrent_requests;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let subscription_routes = Router::new()
        .route(
            "/subs",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/subs/total", get(totals::total_cost))
        .route(
            "/subs/:id",
            get(subscriptions::get_subscription)
                .put(subscriptions::update_subscription)
                .delete(subscriptions::delete_subscription),
        )
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests));

    Router::new()
        .route("/health", get(health::health))
        .merge(subscription_routes)
        // Global middleware. The timeout drops the handler future, which
        // abandons any in-flight store query with it.
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
///
/// `CORS_ORIGINS` defaults to `*`: the API carries no credentials or
/// sessions, so any origin may read totals. A concrete origin list narrows
/// it; entries that are not valid header values are skipped with a warning.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE]);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(methods)
        .allow_headers([CONTENT_TYPE])
}
