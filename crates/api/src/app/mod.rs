//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the operations handlers call
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use potionshop_auth::StaticApiKey;
use potionshop_infra::store::InventoryStore;

use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(store: Arc<dyn InventoryStore>, api_key: impl Into<String>) -> Router {
    let auth_state = middleware::AuthState {
        validator: Arc::new(StaticApiKey::new(api_key)),
    };
    let services = Arc::new(services::AppServices::new(store));

    // Protected routes: require a valid API key.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::api_key_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
