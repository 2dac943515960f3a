//! Catalog domain: listing categories and brands
//!
//! Both carry a URL slug recomputed on every write (categories from
//! `systemName`, brands from `name`); names and slugs are unique per
//! collection.
//!
//! ```rust,no_run
//! use domain_catalog::{handlers, CatalogService, MongoBrandRepository, MongoCategoryRepository};
//!
//! # async fn example(db: mongodb::Database) -> Result<(), Box<dyn std::error::Error>> {
//! let categories = MongoCategoryRepository::new(&db);
//! let brands = MongoBrandRepository::new(&db);
//! categories.init_indexes().await?;
//! brands.init_indexes().await?;
//!
//! let router = handlers::router(CatalogService::new(categories, brands));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod slug;

pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateBrand, CreateCategory, ProductBrand, UpdateBrand, UpdateCategory};
pub use repository::{BrandRepository, CategoryRepository};
pub use self::mongodb::{MongoBrandRepository, MongoCategoryRepository};
pub use service::CatalogService;
