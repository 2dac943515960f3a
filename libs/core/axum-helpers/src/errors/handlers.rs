use std::any::Any;

use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Fallback for requests that match no route.
pub async fn not_found(uri: Uri) -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::RouteNotFound,
        format!("Route not found: {}", uri.path()),
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

/// Turns a handler panic into a 500 error body.
///
/// Plugged into `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        ErrorCode::Panic.default_message().to_string()
    };

    tracing::error!(error_code = ErrorCode::Panic.code(), "Handler panicked: {}", detail);

    let body = Json(ErrorResponse::new(ErrorCode::Panic, detail));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}
