use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid product fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    /// A specification entry on create could not be decoded
    #[error("Invalid specification: {0}")]
    InvalidSpecification(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound(format!("Product not found: {}", id)),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::InvalidFields(errors) => AppError::ValidationError(errors),
            ProductError::InvalidSpecification(msg) => {
                AppError::InternalServerError(format!("Invalid specification: {}", msg))
            }
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ProductError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (ProductError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                ProductError::InvalidSpecification("expected value".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProductError::Database("timeout".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
