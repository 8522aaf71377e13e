use axum::Router;

pub mod bottler;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new().nest("/bottler", bottler::router())
}
