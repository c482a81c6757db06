use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

pub const APP_NAME: &str = "retirementApp";

/// Failures of the REST API, rendered as problem-JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{title}")]
    BadRequest {
        title: String,
        entity: &'static str,
        key: &'static str,
    },
    #[error("Not Found")]
    NotFound,
    #[error("Unsupported Media Type")]
    UnsupportedMediaType,
    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn bad_request(title: impl Into<String>, entity: &'static str, key: &'static str) -> Self {
        ApiError::BadRequest {
            title: title.into(),
            entity,
            key,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<String> for ApiError {
    fn from(e: String) -> Self {
        ApiError::Storage(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        let body = match &self {
            ApiError::BadRequest { title, entity, key } => {
                headers.insert(
                    header_name("error"),
                    header_value(&format!("error.{key}")),
                );
                headers.insert(header_name("params"), header_value(entity));
                json!({
                    "title": title,
                    "status": status.as_u16(),
                    "entityName": entity,
                    "errorKey": key,
                    "message": format!("error.{key}"),
                    "params": entity,
                })
            }
            ApiError::Storage(e) => {
                tracing::error!("storage failure: {e}");
                json!({
                    "title": "Internal Server Error",
                    "status": status.as_u16(),
                    "detail": e,
                    "message": format!("error.http.{}", status.as_u16()),
                })
            }
            other => json!({
                "title": other.to_string(),
                "status": status.as_u16(),
                "message": format!("error.http.{}", status.as_u16()),
            }),
        };

        (status, headers, body.to_string()).into_response()
    }
}

/// `X-retirementApp-{suffix}`
pub fn header_name(suffix: &str) -> header::HeaderName {
    header::HeaderName::from_bytes(format!("x-{APP_NAME}-{suffix}").as_bytes())
        .unwrap_or_else(|_| header::HeaderName::from_static("x-app-alert"))
}

pub fn header_value(v: &str) -> HeaderValue {
    HeaderValue::from_str(v).unwrap_or_else(|_| HeaderValue::from_static(""))
}

/// Alert headers attached to successful writes, e.g. `retirementApp.security.created`.
pub fn entity_alert(entity: &str, action: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header_name("alert"),
        header_value(&format!("{APP_NAME}.{entity}.{action}")),
    );
    headers.insert(header_name("params"), header_value(param));
    headers
}
