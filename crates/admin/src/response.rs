//! Success envelope helpers.
//!
//! Every successful JSON response is wrapped as `{"success":true,"data":...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Serialize)]
struct SuccessEnvelope<T: Serialize> {
    success: bool,
    data: T,
}

/// 200 OK with the success envelope.
pub fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(SuccessEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// 201 Created with the success envelope.
pub fn created<T: Serialize>(data: T) -> Response {
    (
        StatusCode::CREATED,
        Json(SuccessEnvelope {
            success: true,
            data,
        }),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_status() {
        let response = ok(serde_json::json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_created_status() {
        let response = created(serde_json::json!({"id": 1}));
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = SuccessEnvelope {
            success: true,
            data: serde_json::json!({"updated": 3}),
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["updated"], 3);
    }
}
