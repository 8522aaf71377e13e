use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use potionshop_auth::ApiKeyValidator;

use crate::app::errors;

/// Header carrying the shop's shared API key.
pub const API_KEY_HEADER: &str = "access_token";

#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn ApiKeyValidator>,
}

pub async fn api_key_middleware(
    State(state): State<AuthState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    if let Err(e) = state.validator.validate(extract_api_key(req.headers())) {
        tracing::warn!(reason = %e, path = %req.uri().path(), "request rejected");
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string());
    }

    next.run(req).await
}

fn extract_api_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok())
}
