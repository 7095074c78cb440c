use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the service layer. Everything except a missing
/// player maps to 400, with the message passed through to the caller.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Player with id {0} not found.")]
    PlayerNotFound(i64),
    #[error("Unknown player field: '{0}'.")]
    UnknownField(String),
    #[error("Player field '{0}' cannot be modified.")]
    ImmutableField(String),
    #[error("Invalid value for player field '{0}': {1}")]
    InvalidFieldValue(String, String),
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("{0}")]
    Database(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

/// Body returned for every failed request.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub timestamp: String,
    pub status_code: u16,
    pub path: String,
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, path: &str, message: String) -> Self {
        ErrorBody {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            status_code: status.as_u16(),
            path: path.to_string(),
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // render_errors re-stamps the body with the request path, which is
        // not reachable from here
        let status = self.status_code();
        let mut response =
            (status, Json(ErrorBody::new(status, "", self.to_string()))).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Boundary middleware translating every failure into the shared error body.
///
/// Typed errors carry themselves out of the handler in a response extension
/// and get the final body here. Extractor rejections (malformed JSON, wrong
/// content type, bad path params) arrive as plain-text 4xx responses and are
/// rewrapped as 400 with the message passed through. Unrouted paths keep the
/// framework's plain 404.
pub async fn render_errors(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    let (mut parts, body) = response.into_parts();
    if let Some(err) = parts.extensions.remove::<ApiError>() {
        let status = err.status_code();
        return (status, Json(ErrorBody::new(status, &path, err.to_string()))).into_response();
    }

    if parts.status == StatusCode::BAD_REQUEST
        || parts.status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        || parts.status == StatusCode::UNPROCESSABLE_ENTITY
    {
        let message = match axum::body::to_bytes(body, 64 * 1024).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => err.to_string(),
        };
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody::new(StatusCode::BAD_REQUEST, &path, message)),
        )
            .into_response();
    }

    Response::from_parts(parts, body)
}
