use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, ProductBrand};

/// Persistence of categories
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, category: Category) -> CatalogResult<Category>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn find_all(&self) -> CatalogResult<Vec<Category>>;

    /// Overwrite a stored category; `CategoryNotFound` when it is gone
    async fn replace(&self, category: Category) -> CatalogResult<Category>;

    /// Returns whether the category existed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Persistence of brands
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn insert(&self, brand: ProductBrand) -> CatalogResult<ProductBrand>;

    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<ProductBrand>>;

    async fn find_all(&self) -> CatalogResult<Vec<ProductBrand>>;

    /// Overwrite a stored brand; `BrandNotFound` when it is gone
    async fn replace(&self, brand: ProductBrand) -> CatalogResult<ProductBrand>;

    /// Returns whether the brand existed
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}
