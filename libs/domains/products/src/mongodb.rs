//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use database::mongodb::id_filter;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson},
    options::{FindOptions, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::query::ProductQuery;
use crate::repository::ProductRepository;

/// Collection holding product documents
pub const COLLECTION: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Initialize indexes used by listing filters
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self, query), fields(skip = ?query.skip, limit = ?query.limit))]
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        // UUIDv7 ids sort in insertion order, which keeps pages stable.
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(query.skip)
            .limit(query.limit)
            .build();

        let cursor = self
            .collection
            .find(query.filter_document())
            .with_options(options)
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let cursor = self.collection.find(doc! {}).await?;
        let products: Vec<Product> = cursor.try_collect().await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn count_all(&self) -> ProductResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self, query))]
    async fn count(&self, query: ProductQuery) -> ProductResult<u64> {
        let count = self
            .collection
            .count_documents(query.filter_document())
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn save_details(&self, product: Product) -> ProductResult<Product> {
        let update = doc! {
            "$set": {
                "name": product.name.as_str(),
                "description": product.description.as_str(),
                "highlights": to_bson(&product.highlights)?,
                "specifications": to_bson(&product.specifications)?,
                "price": product.price,
                "cuttedPrice": product.cutted_price,
                "images": to_bson(&product.images)?,
                "brand": to_bson(&product.brand)?,
                "category": product.category.as_str(),
                "stock": product.stock,
                "warranty": product.warranty,
                "updatedAt": to_bson(&product.updated_at)?,
            }
        };

        let stored = self
            .collection
            .find_one_and_update(id_filter(product.id), update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or(ProductError::NotFound(product.id))?;

        tracing::info!(product_id = %stored.id, "Product updated successfully");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
        }
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self, product), fields(product_id = %product.id, num_of_reviews = product.num_of_reviews))]
    async fn save_reviews(&self, product: Product) -> ProductResult<Product> {
        let update = doc! {
            "$set": {
                "reviews": to_bson(&product.reviews)?,
                "ratings": product.ratings,
                "numOfReviews": product.num_of_reviews,
                "updatedAt": to_bson(&product.updated_at)?,
            }
        };

        let result = self
            .collection
            .update_one(id_filter(product.id), update)
            .await?;

        if result.matched_count == 0 {
            return Err(ProductError::NotFound(product.id));
        }

        tracing::debug!(product_id = %product.id, ratings = product.ratings, "Reviews saved");
        Ok(product)
    }
}
