use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Brand name used when a listing is created without one
pub const UNKNOWN_BRAND: &str = "Unknown Brand";

/// Hosted image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Identifier on the image host, derived from the URL file name
    pub public_id: String,
    pub url: String,
}

impl Image {
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            public_id: public_id_from_url(&url),
            url,
        }
    }
}

/// File name of the last path segment without its extension.
///
/// `https://x/y/abc.jpg` yields `abc`.
pub fn public_id_from_url(url: &str) -> String {
    let segment = url.rsplit('/').next().unwrap_or(url);
    segment.split('.').next().unwrap_or(segment).to_string()
}

/// Brand embedded in a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub name: String,
    pub logo: Option<Image>,
}

impl Default for Brand {
    fn default() -> Self {
        Self {
            name: UNKNOWN_BRAND.to_string(),
            logo: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SpecificationEntry {
    pub title: String,
    pub description: String,
}

/// A specification line.
///
/// Updates keep text that does not decode as an entry instead of failing,
/// so stored documents may carry either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Specification {
    Entry(SpecificationEntry),
    Opaque(String),
}

/// Review embedded in its product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    /// Reviewer reference; a second review by the same user replaces the first
    pub user: Option<String>,
    pub name: Option<String>,
    /// 1 to 5
    pub rating: u8,
    pub comment: String,
}

impl Review {
    pub fn new(rating: u8, comment: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user: None,
            name: None,
            rating,
            comment: comment.into(),
        }
    }
}

/// Property listing with its reviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<Specification>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// List price before discount
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub cutted_price: f64,
    #[serde(default)]
    pub images: Vec<Image>,
    #[serde(default)]
    pub brand: Brand,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 0))]
    pub stock: i64,
    #[validate(range(min = 0))]
    pub warranty: i64,
    /// Mean review rating, 0 without reviews
    #[serde(default)]
    pub ratings: f64,
    #[serde(default)]
    pub num_of_reviews: i64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalized attributes of a listing about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub specifications: Vec<Specification>,
    pub price: f64,
    pub cutted_price: f64,
    pub images: Vec<Image>,
    pub brand: Brand,
    pub category: String,
    pub stock: i64,
    pub warranty: i64,
}

/// How an update touches the embedded brand
#[derive(Debug, Clone, Default, PartialEq)]
pub enum BrandChange {
    #[default]
    Keep,
    /// Only the name changes, the logo stays
    Rename(String),
    /// New logo; the name falls back to the current one
    Replace { name: Option<String>, logo: Image },
}

/// Normalized update; `None` leaves the field as it is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub highlights: Option<Vec<String>>,
    pub specifications: Option<Vec<Specification>>,
    pub price: Option<f64>,
    pub cutted_price: Option<f64>,
    pub images: Option<Vec<Image>>,
    pub brand: BrandChange,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub warranty: Option<i64>,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            highlights: input.highlights,
            specifications: input.specifications,
            price: input.price,
            cutted_price: input.cutted_price,
            images: input.images,
            brand: input.brand,
            category: input.category,
            stock: input.stock,
            warranty: input.warranty,
            ratings: 0.0,
            num_of_reviews: 0,
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_changes(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(highlights) = changes.highlights {
            self.highlights = highlights;
        }
        if let Some(specifications) = changes.specifications {
            self.specifications = specifications;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(cutted_price) = changes.cutted_price {
            self.cutted_price = cutted_price;
        }
        // An empty list never clears the gallery.
        if let Some(images) = changes.images.filter(|images| !images.is_empty()) {
            self.images = images;
        }
        match changes.brand {
            BrandChange::Keep => {}
            BrandChange::Rename(name) => self.brand.name = name,
            BrandChange::Replace { name, logo } => {
                let name = name
                    .or_else(|| Some(self.brand.name.clone()).filter(|n| !n.is_empty()))
                    .unwrap_or_else(|| UNKNOWN_BRAND.to_string());
                self.brand = Brand {
                    name,
                    logo: Some(logo),
                };
            }
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(stock) = changes.stock {
            self.stock = stock;
        }
        if let Some(warranty) = changes.warranty {
            self.warranty = warranty;
        }
        self.updated_at = Utc::now();
    }

    /// Adds a review, or replaces the one already left by the same user.
    pub fn upsert_review(&mut self, review: Review) {
        let existing = review.user.as_ref().and_then(|user| {
            self.reviews
                .iter_mut()
                .find(|r| r.user.as_ref() == Some(user))
        });

        match existing {
            Some(current) => {
                current.rating = review.rating;
                current.comment = review.comment;
                current.name = review.name;
            }
            None => self.reviews.push(review),
        }
        self.recompute_ratings();
    }

    /// Drops the review with `review_id`; returns whether one was removed.
    ///
    /// Aggregates are recomputed either way.
    pub fn remove_review(&mut self, review_id: Uuid) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        self.recompute_ratings();
        self.reviews.len() != before
    }

    fn recompute_ratings(&mut self) {
        self.num_of_reviews = self.reviews.len() as i64;
        self.ratings = if self.reviews.is_empty() {
            0.0
        } else {
            let total: f64 = self.reviews.iter().map(|r| f64::from(r.rating)).sum();
            total / self.reviews.len() as f64
        };
        self.updated_at = Utc::now();
    }
}

/// One page of the filtered listing
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// All products, ignoring filters
    pub products_count: u64,
    pub result_per_page: u64,
    /// Products matching the filters before pagination
    pub filtered_products_count: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPageResponse {
    pub success: bool,
    pub products: Vec<Product>,
    pub products_count: u64,
    pub result_per_page: u64,
    pub filtered_products_count: u64,
}

impl From<ProductPage> for ProductPageResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            success: true,
            products: page.products,
            products_count: page.products_count,
            result_per_page: page.result_per_page,
            filtered_products_count: page.filtered_products_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub success: bool,
    pub product: Product,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewsResponse {
    pub success: bool,
    pub reviews: Vec<Review>,
}

/// Body of mutations that return nothing else
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::new(NewProduct {
            name: "Test Property".to_string(),
            description: String::new(),
            highlights: vec![],
            specifications: vec![],
            price: 2000.0,
            cutted_price: 0.0,
            images: vec![Image::from_url("https://x/y/front.jpg")],
            brand: Brand {
                name: "Acme Homes".to_string(),
                logo: None,
            },
            category: "house".to_string(),
            stock: 1,
            warranty: 1,
        })
    }

    #[test]
    fn test_public_id_from_url() {
        assert_eq!(public_id_from_url("https://x/y/abc.jpg"), "abc");
        assert_eq!(public_id_from_url("https://x/y/abc.tar.gz"), "abc");
        assert_eq!(public_id_from_url("abc"), "abc");
    }

    #[test]
    fn test_new_product_has_no_reviews() {
        let product = sample();
        assert_eq!(product.ratings, 0.0);
        assert_eq!(product.num_of_reviews, 0);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_review_aggregates() {
        let mut product = sample();
        product.upsert_review(Review::new(5, "great"));
        product.upsert_review(Review::new(3, "fine"));
        assert_eq!(product.ratings, 4.0);
        assert_eq!(product.num_of_reviews, 2);

        let first = product.reviews[0].id;
        assert!(product.remove_review(first));
        assert_eq!(product.ratings, 3.0);
        assert_eq!(product.num_of_reviews, 1);

        let last = product.reviews[0].id;
        assert!(product.remove_review(last));
        assert_eq!(product.ratings, 0.0);
        assert_eq!(product.num_of_reviews, 0);
    }

    #[test]
    fn test_remove_unknown_review_keeps_list() {
        let mut product = sample();
        product.upsert_review(Review::new(4, "ok"));
        assert!(!product.remove_review(Uuid::now_v7()));
        assert_eq!(product.num_of_reviews, 1);
        assert_eq!(product.ratings, 4.0);
    }

    #[test]
    fn test_same_user_replaces_review() {
        let mut product = sample();
        let mut first = Review::new(2, "noisy street");
        first.user = Some("u1".to_string());
        let first_id = first.id;
        product.upsert_review(first);

        let mut second = Review::new(4, "quieter at night");
        second.user = Some("u1".to_string());
        product.upsert_review(second);

        assert_eq!(product.num_of_reviews, 1);
        assert_eq!(product.reviews[0].id, first_id);
        assert_eq!(product.reviews[0].comment, "quieter at night");
        assert_eq!(product.ratings, 4.0);
    }

    #[test]
    fn test_apply_changes_keeps_images_and_brand_when_omitted() {
        let mut product = sample();
        let images = product.images.clone();
        product.apply_changes(ProductChanges {
            price: Some(2500.0),
            images: Some(vec![]),
            ..Default::default()
        });

        assert_eq!(product.price, 2500.0);
        assert_eq!(product.images, images);
        assert_eq!(product.brand.name, "Acme Homes");
    }

    #[test]
    fn test_apply_changes_logo_keeps_brand_name() {
        let mut product = sample();
        product.apply_changes(ProductChanges {
            brand: BrandChange::Replace {
                name: None,
                logo: Image::from_url("https://x/logos/acme.png"),
            },
            ..Default::default()
        });

        assert_eq!(product.brand.name, "Acme Homes");
        assert_eq!(product.brand.logo.as_ref().map(|l| l.public_id.as_str()), Some("acme"));
    }

    #[test]
    fn test_apply_changes_rename_keeps_logo() {
        let mut product = sample();
        product.brand.logo = Some(Image::from_url("https://x/logos/acme.png"));
        product.apply_changes(ProductChanges {
            brand: BrandChange::Rename("Zenith".to_string()),
            ..Default::default()
        });

        assert_eq!(product.brand.name, "Zenith");
        assert!(product.brand.logo.is_some());
    }

    #[test]
    fn test_validation_rejects_negative_price() {
        let mut product = sample();
        product.price = -1.0;
        let errors = product.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_json_shape() {
        let product = sample();
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["_id"], product.id.to_string());
        assert_eq!(json["cuttedPrice"], 0.0);
        assert_eq!(json["numOfReviews"], 0);
        assert_eq!(json["images"][0]["publicId"], "front");
    }

    #[test]
    fn test_specification_accepts_both_shapes() {
        let specs: Vec<Specification> =
            serde_json::from_str(r#"[{"title":"Rooms","description":"4"},"{broken"]"#).unwrap();
        assert!(matches!(specs[0], Specification::Entry(_)));
        assert_eq!(specs[1], Specification::Opaque("{broken".to_string()));
    }
}
