use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use potionshop_inventory::PotionComposition;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/plan", post(plan))
        .route("/deliver", post(deliver))
}

/// Go from barrel to bottle. Called by the shop scheduler a few times a day.
pub async fn plan(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.plan_bottles().await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "bottle plan failed");
            errors::store_error_to_response(e)
        }
    }
}

pub async fn deliver(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Vec<PotionComposition>>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "delivery body rejected");
            return errors::json_rejection_to_response(rejection);
        }
    };

    match services.record_delivery(&body) {
        Ok(()) => (StatusCode::OK, Json("OK")).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "delivery rejected");
            errors::invalid_composition(e.to_string())
        }
    }
}
