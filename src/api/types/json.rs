//! JSON body extractor whose rejections use the API error envelope

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::{de::DeserializeOwned, Serialize};

use super::error::ApiError;

/// Drop-in for `axum::Json`.
///
/// Malformed bodies, missing fields and a wrong content type come back as
/// `invalid_request_error` with code `json_parse_error` instead of plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match AxumJson::<T>::from_request(req, state).await {
            Ok(AxumJson(value)) => Ok(Json(value)),
            Err(rejection) => {
                let mut error = ApiError::bad_request(rejection_message(&rejection))
                    .with_code("json_parse_error");
                error.status = rejection.status();

                Err(error)
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(err) => format!("Invalid request body: {}", err.body_text()),
        JsonRejection::JsonSyntaxError(err) => format!("Invalid JSON: {}", err.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            "Expected 'Content-Type: application/json'".to_string()
        }
        other => other.body_text(),
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, StatusCode},
    };
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Slot {
        start_time: String,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<Json<Slot>, ApiError> {
        let mut builder = Request::builder().method("POST").uri("/");

        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        let request = builder.body(Body::from(body.to_string())).unwrap();
        Json::<Slot>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_valid_body() {
        let Json(slot) = extract(Some("application/json"), r#"{"start_time":"09:00"}"#)
            .await
            .unwrap();

        assert_eq!(slot.start_time, "09:00");
    }

    #[tokio::test]
    async fn test_missing_field() {
        let err = extract(Some("application/json"), "{}").await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.response.error.code.as_deref(), Some("json_parse_error"));
        assert!(err.response.error.message.contains("start_time"));
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let err = extract(None, r#"{"start_time":"09:00"}"#).await.unwrap_err();

        assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let err = extract(Some("application/json"), "{").await.unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
