use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use potionshop_infra::store::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Unavailable { .. } => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_unavailable",
            err.to_string(),
        ),
        StoreError::MissingInventory | StoreError::Corrupt(_) | StoreError::Domain(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
        }
    }
}

pub fn invalid_composition(message: impl Into<String>) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_composition", message)
}

/// Body that failed to parse as compositions gets the same shape as one that
/// parsed but failed validation; transport problems keep axum's status.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    match rejection {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            invalid_composition(rejection.body_text())
        }
        other => json_error(other.status(), "invalid_request", other.body_text()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
