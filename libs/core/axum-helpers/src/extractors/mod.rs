//! Custom extractors for Axum handlers.
//!
//! Each extractor rejects with [`AppError`](crate::errors::AppError), so a
//! malformed request gets the same error body as any other failure.

pub mod json;
pub mod query;
pub mod uuid_path;
pub mod validated_json;

pub use json::AppJson;
pub use query::AppQuery;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
