//! Property listings domain
//!
//! Listings ("products") with embedded reviews, stored in MongoDB and served
//! over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, `{success, ...}` envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Input normalization, validation, review aggregates
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product aggregate, query plan
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::media::MediaConfig;
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("real_estate");
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//! let service = ProductService::new(repository, MediaConfig::default());
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod input;
pub mod media;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use input::{ProductInput, ReviewInput};
pub use models::{Brand, Image, Product, ProductPage, Review, Specification, UNKNOWN_BRAND};
pub use query::{ProductQuery, QueryBuilder, RESULT_PER_PAGE};
pub use repository::ProductRepository;
pub use self::mongodb::MongoProductRepository;
pub use service::ProductService;
