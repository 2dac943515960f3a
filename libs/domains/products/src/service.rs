//! Product Service - Business logic layer

use core_config::media::MediaConfig;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::input::{ProductInput, ReviewInput};
use crate::media::MediaLibrary;
use crate::models::{Product, ProductPage, Review};
use crate::query::{QueryBuilder, RESULT_PER_PAGE};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Normalizes request bodies, enforces product constraints and keeps review
/// aggregates in step with the review list.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
    media: MediaLibrary,
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            media: self.media.clone(),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R, media: MediaConfig) -> Self {
        Self {
            repository: Arc::new(repository),
            media: MediaLibrary::new(media),
        }
    }

    pub fn media(&self) -> &MediaLibrary {
        &self.media
    }

    /// Filtered, paginated listing with total and filtered counts
    #[instrument(skip(self, params), fields(param_count = params.len()))]
    pub async fn list_products(&self, params: Vec<(String, String)>) -> ProductResult<ProductPage> {
        let products_count = self.repository.count_all().await?;

        let builder = QueryBuilder::new(params).search().filter();
        let filtered_products_count = self.repository.count(builder.query().clone()).await?;

        let query = builder.paginate(RESULT_PER_PAGE).build();
        let products = self.repository.find(query).await?;

        Ok(ProductPage {
            products,
            products_count,
            result_per_page: RESULT_PER_PAGE,
            filtered_products_count,
        })
    }

    /// Every product, unfiltered and unpaginated
    #[instrument(skip(self))]
    pub async fn all_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = ?input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let product = Product::new(input.into_new_product(&self.media)?);
        product.validate()?;

        self.repository.insert(product).await
    }

    /// Merges the update into the stored product.
    ///
    /// Images and brand survive an update that omits them. The returned
    /// product carries the reviews as stored at write time.
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: ProductInput) -> ProductResult<Product> {
        let mut product = self.get_product(id).await?;

        product.apply_changes(input.into_changes(&self.media)?);
        product.validate()?;

        self.repository.save_details(product).await
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        Ok(())
    }

    /// Adds a review to the product, replacing the reviewer's earlier one.
    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn upsert_review(&self, input: ReviewInput) -> ProductResult<Product> {
        let rating = input.rating()?;
        let mut product = self.get_product(input.product_id).await?;

        let mut review = Review::new(rating, input.comment);
        review.user = input.user;
        review.name = input.name;
        product.upsert_review(review);

        self.repository.save_reviews(product).await
    }

    #[instrument(skip(self))]
    pub async fn get_reviews(&self, product_id: Uuid) -> ProductResult<Vec<Review>> {
        Ok(self.get_product(product_id).await?.reviews)
    }

    /// Removes one review and recomputes the aggregates.
    ///
    /// An unknown review id is not an error.
    #[instrument(skip(self))]
    pub async fn delete_review(&self, product_id: Uuid, review_id: Uuid) -> ProductResult<Product> {
        let mut product = self.get_product(product_id).await?;

        if !product.remove_review(review_id) {
            tracing::debug!(%product_id, %review_id, "No review with this id");
        }

        self.repository.save_reviews(product).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;
    use crate::models::{Brand, Image};
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;
    use serde_json::json;

    fn stored_product() -> Product {
        Product::new(NewProduct {
            name: "Test Property".to_string(),
            description: String::new(),
            highlights: vec![],
            specifications: vec![],
            price: 2000.0,
            cutted_price: 0.0,
            images: vec![Image::from_url("https://x/y/front.jpg")],
            brand: Brand::default(),
            category: "house".to_string(),
            stock: 1,
            warranty: 1,
        })
    }

    fn input(value: serde_json::Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    fn review(product_id: Uuid, rating: u8) -> ReviewInput {
        serde_json::from_value(json!({
            "rating": rating,
            "comment": "nice",
            "productId": product_id,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().times(1).returning(Ok);

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let product = service
            .create_product(input(json!({
                "name": "Test Property",
                "price": 2000,
                "category": "house",
                "stock": 1,
                "images": ["https://x/y/abc.jpg"]
            })))
            .await
            .unwrap();

        assert_eq!(product.name, "Test Property");
        assert_eq!(product.images[0].public_id, "abc");
    }

    #[tokio::test]
    async fn test_create_product_validation_error() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let long_name = "x".repeat(201);
        let result = service
            .create_product(input(json!({
                "name": long_name,
                "price": 10,
                "category": "house"
            })))
            .await;

        assert!(matches!(result, Err(ProductError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_without_images_keeps_them() {
        let existing = stored_product();
        let id = existing.id;
        let images = existing.images.clone();

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_save_details().times(1).returning(Ok);

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let updated = service
            .update_product(id, input(json!({"name": "Renamed", "price": "2100"})))
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.price, 2100.0);
        assert_eq!(updated.images, images);
    }

    #[tokio::test]
    async fn test_update_returns_reviews_as_stored() {
        let existing = stored_product();
        let id = existing.id;

        let mut concurrent = existing.clone();
        concurrent.upsert_review(Review::new(4, "written meanwhile".to_string()));

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo
            .expect_save_details()
            .withf(|product| product.reviews.is_empty())
            .times(1)
            .returning(move |edited| {
                let mut stored = concurrent.clone();
                stored.name = edited.name;
                Ok(stored)
            });

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let updated = service
            .update_product(id, input(json!({"name": "Renamed"})))
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.num_of_reviews, 1);
        assert_eq!(updated.ratings, 4.0);
    }

    #[tokio::test]
    async fn test_update_rejects_negative_stock() {
        let existing = stored_product();
        let id = existing.id;

        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_save_details().never();

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let result = service.update_product(id, input(json!({"stock": -2}))).await;

        assert!(matches!(result, Err(ProductError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let result = service.delete_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_counts_before_pagination() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_count_all().returning(|| Ok(40));
        mock_repo
            .expect_count()
            .withf(|query| query.limit.is_none() && !query.filter.is_empty())
            .returning(|_| Ok(13));
        mock_repo
            .expect_find()
            .withf(|query| query.skip == Some(12) && query.limit == Some(12))
            .returning(|_| Ok(vec![stored_product()]));

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let page = service
            .list_products(vec![
                ("category".to_string(), "house".to_string()),
                ("page".to_string(), "2".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(page.products_count, 40);
        assert_eq!(page.filtered_products_count, 13);
        assert_eq!(page.result_per_page, RESULT_PER_PAGE);
        assert!(page.products.len() as u64 <= page.result_per_page);
    }

    #[tokio::test]
    async fn test_reviews_aggregate_across_calls() {
        let product = stored_product();
        let id = product.id;
        let stored = std::sync::Arc::new(std::sync::Mutex::new(product));

        let mut mock_repo = MockProductRepository::new();
        let read = stored.clone();
        mock_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(read.lock().unwrap().clone())));
        let write = stored.clone();
        mock_repo.expect_save_reviews().returning(move |product| {
            *write.lock().unwrap() = product.clone();
            Ok(product)
        });

        let service = ProductService::new(mock_repo, MediaConfig::default());
        service.upsert_review(review(id, 5)).await.unwrap();
        let product = service.upsert_review(review(id, 3)).await.unwrap();

        assert_eq!(product.ratings, 4.0);
        assert_eq!(product.num_of_reviews, 2);

        let first = product.reviews[0].id;
        let product = service.delete_review(id, first).await.unwrap();
        assert_eq!(product.ratings, 3.0);
        assert_eq!(product.num_of_reviews, 1);
    }

    #[tokio::test]
    async fn test_review_out_of_range_rating() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().never();

        let service = ProductService::new(mock_repo, MediaConfig::default());
        let result = service.upsert_review(review(Uuid::now_v7(), 9)).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }
}
