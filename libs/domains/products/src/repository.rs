use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::Product;
use crate::query::ProductQuery;

/// Repository trait for Product persistence
///
/// Reviews live inside the product document, so they are written through
/// [`ProductRepository::save_reviews`] rather than a repository of their own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Get a product by ID
    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products matching a query, windowed when the query is paginated
    async fn find(&self, query: ProductQuery) -> ProductResult<Vec<Product>>;

    /// Every product, unfiltered
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Total number of products
    async fn count_all(&self) -> ProductResult<u64>;

    /// Number of products matching the query filter; the window is ignored
    async fn count(&self, query: ProductQuery) -> ProductResult<u64>;

    /// Persist the editable attributes only and return the stored document.
    ///
    /// Reviews and their aggregates are left as stored, so a review written
    /// while the edit was in flight survives. `NotFound` when the product no
    /// longer exists.
    async fn save_details(&self, product: Product) -> ProductResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Persist the review list and its aggregates only.
    ///
    /// Last write wins: two concurrent callers that loaded the same product
    /// overwrite each other's review.
    async fn save_reviews(&self, product: Product) -> ProductResult<Product>;
}
