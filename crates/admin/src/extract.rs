//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, FieldErrors};

/// JSON body extractor that also runs `validator` rules.
///
/// Deserialization failures become `400 BAD_REQUEST`; rule violations become
/// `400 VALIDATION_ERROR` with per-field messages in `details`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;

        value.validate().map_err(|errors| {
            let mut details = FieldErrors::new();
            for (field, errs) in errors.field_errors() {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map_or_else(|| e.code.to_string(), ToString::to_string)
                    })
                    .collect();
                details.insert(field.to_string(), messages);
            }
            AppError::Validation(details)
        })?;

        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from(body.to_owned()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let req = json_request(r#"{"title":"hello"}"#);
        let ValidJson(body) = ValidJson::<TestBody>::from_request(req, &()).await.unwrap();
        assert_eq!(body.title, "hello");
    }

    #[tokio::test]
    async fn test_rule_violation_yields_field_details() {
        let req = json_request(r#"{"title":""}"#);
        let err = ValidJson::<TestBody>::from_request(req, &())
            .await
            .unwrap_err();
        match err {
            AppError::Validation(details) => {
                assert_eq!(details["title"], vec!["must not be empty".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = json_request("not json");
        let err = ValidJson::<TestBody>::from_request(req, &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
