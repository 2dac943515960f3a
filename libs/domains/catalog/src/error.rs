use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Server code for a unique index violation
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Brand not found: {0}")]
    BrandNotFound(Uuid),

    /// Unique name or slug already taken
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Invalid fields: {0}")]
    InvalidFields(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category not found: {}", id))
            }
            CatalogError::BrandNotFound(id) => AppError::NotFound(format!("Brand not found: {}", id)),
            CatalogError::Duplicate(msg) => AppError::Conflict(msg),
            CatalogError::InvalidFields(errors) => AppError::ValidationError(errors),
            CatalogError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY => {
                CatalogError::Duplicate(write.message.clone())
            }
            _ => CatalogError::Database(err.to_string()),
        }
    }
}
