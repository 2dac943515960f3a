//! Catalog service: categories and brands

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    Category, CreateBrand, CreateCategory, ProductBrand, UpdateBrand, UpdateCategory,
};
use crate::repository::{BrandRepository, CategoryRepository};

/// Validates input, derives slugs and delegates to the repositories.
///
/// Name and slug uniqueness is enforced by the store's unique indexes and
/// surfaces as [`CatalogError::Duplicate`].
pub struct CatalogService<C: CategoryRepository, B: BrandRepository> {
    categories: Arc<C>,
    brands: Arc<B>,
}

impl<C: CategoryRepository, B: BrandRepository> Clone for CatalogService<C, B> {
    fn clone(&self) -> Self {
        Self {
            categories: Arc::clone(&self.categories),
            brands: Arc::clone(&self.brands),
        }
    }
}

impl<C: CategoryRepository, B: BrandRepository> CatalogService<C, B> {
    pub fn new(categories: C, brands: B) -> Self {
        Self {
            categories: Arc::new(categories),
            brands: Arc::new(brands),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        self.categories.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, mut input: CreateCategory) -> CatalogResult<Category> {
        input.name = input.name.trim().to_string();
        input.validate()?;

        self.categories.insert(Category::new(input)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: Uuid,
        mut input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input.name = input.name.map(|name| name.trim().to_string());
        input.validate()?;

        let mut category = self.get_category(id).await?;
        category.apply_update(input);
        self.categories.replace(category).await
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        if !self.categories.delete(id).await? {
            return Err(CatalogError::CategoryNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> CatalogResult<Vec<ProductBrand>> {
        self.brands.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: Uuid) -> CatalogResult<ProductBrand> {
        self.brands
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::BrandNotFound(id))
    }

    #[instrument(skip(self, input), fields(brand_name = %input.name))]
    pub async fn create_brand(&self, mut input: CreateBrand) -> CatalogResult<ProductBrand> {
        input.name = input.name.trim().to_string();
        input.validate()?;

        self.brands.insert(ProductBrand::new(input)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_brand(&self, id: Uuid, mut input: UpdateBrand) -> CatalogResult<ProductBrand> {
        input.name = input.name.map(|name| name.trim().to_string());
        input.validate()?;

        let mut brand = self.get_brand(id).await?;
        brand.apply_update(input);
        self.brands.replace(brand).await
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: Uuid) -> CatalogResult<()> {
        if !self.brands.delete(id).await? {
            return Err(CatalogError::BrandNotFound(id));
        }
        Ok(())
    }
}
