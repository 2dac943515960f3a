//! MongoDB implementations of the catalog repositories

use async_trait::async_trait;
use database::mongodb::id_filter;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, ProductBrand};
use crate::repository::{BrandRepository, CategoryRepository};

pub const CATEGORY_COLLECTION: &str = "categories";
pub const BRAND_COLLECTION: &str = "productbrands";

/// Unique `name` and `slug` indexes shared by both collections
fn unique_indexes() -> Vec<IndexModel> {
    ["name", "slug"]
        .into_iter()
        .map(|field| {
            let mut keys = Document::new();
            keys.insert(field, 1);
            IndexModel::builder()
                .keys(keys)
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name(format!("idx_{}_unique", field))
                        .build(),
                )
                .build()
        })
        .collect()
}

#[derive(Clone)]
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Category>(CATEGORY_COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> CatalogResult<()> {
        self.collection.create_indexes(unique_indexes()).await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id, slug = %category.slug))]
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        self.collection.insert_one(&category).await?;
        tracing::info!(category_id = %category.id, "Category created successfully");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> CatalogResult<Vec<Category>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn replace(&self, category: Category) -> CatalogResult<Category> {
        let result = self
            .collection
            .replace_one(id_filter(category.id), &category)
            .await?;
        if result.matched_count == 0 {
            return Err(CatalogError::CategoryNotFound(category.id));
        }
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}

#[derive(Clone)]
pub struct MongoBrandRepository {
    collection: Collection<ProductBrand>,
}

impl MongoBrandRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<ProductBrand>(BRAND_COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> CatalogResult<()> {
        self.collection.create_indexes(unique_indexes()).await?;
        tracing::info!("Brand indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl BrandRepository for MongoBrandRepository {
    #[instrument(skip(self, brand), fields(brand_id = %brand.id, slug = %brand.slug))]
    async fn insert(&self, brand: ProductBrand) -> CatalogResult<ProductBrand> {
        self.collection.insert_one(&brand).await?;
        tracing::info!(brand_id = %brand.id, "Brand created successfully");
        Ok(brand)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> CatalogResult<Option<ProductBrand>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> CatalogResult<Vec<ProductBrand>> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, brand), fields(brand_id = %brand.id))]
    async fn replace(&self, brand: ProductBrand) -> CatalogResult<ProductBrand> {
        let result = self
            .collection
            .replace_one(id_filter(brand.id), &brand)
            .await?;
        if result.matched_count == 0 {
            return Err(CatalogError::BrandNotFound(brand.id));
        }
        Ok(brand)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
