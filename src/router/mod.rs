//! Routing module for the widget apps server

pub mod service;

use std::time::Duration;

use crate::state::SharedState;
use axum::{
    extract::Request,
    http::{header, HeaderName, Method},
    middleware::Next,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(86_400);

/// Answers `OPTIONS` on every path, before routing, and stamps
/// `Access-Control-Allow-Origin: *` on all other responses.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static("mcp-session-id"),
            HeaderName::from_static("mcp-protocol-version"),
        ])
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Creates and configures the application router with all routes and middleware
pub fn create_app_router(state: SharedState) -> Router {
    // Middleware: Log requests
    let log_layer = axum::middleware::from_fn(|req: Request, next: Next| async move {
        let method = req.method().clone();
        let uri = req.uri().clone();
        let res = next.run(req).await;
        let status = res.status().as_u16();
        if res.status().is_success() {
            info!(%method, %uri, status, "request handled");
        } else {
            warn!(%method, %uri, status, "request failed");
        }
        res
    });

    // Routes
    Router::new()
        .merge(crate::mcp::routes())
        .merge(service::routes())
        .fallback(service::not_found)
        .layer(log_layer)
        .layer(cors_layer())
        .with_state(state)
}
