//! Request bodies for listing writes.
//!
//! Admin forms send loosely shaped values: a single string where a list is
//! expected, numbers as text, specification lines as serialized JSON. Each
//! shape is decoded into an explicit variant here and normalized before it
//! reaches the aggregate.

use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::media::MediaLibrary;
use crate::models::{
    Brand, BrandChange, Image, NewProduct, ProductChanges, Specification, SpecificationEntry,
    UNKNOWN_BRAND,
};

/// A value or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl OneOrMany<String> {
    /// Values with blank entries dropped
    pub fn non_blank(self) -> Vec<String> {
        self.into_vec()
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}

/// A JSON number or its text form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    pub fn to_f64(&self, field: &str) -> ProductResult<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ProductError::Validation(format!("{} must be a number", field)))?,
        };
        if !value.is_finite() {
            return Err(ProductError::Validation(format!(
                "{} must be a number",
                field
            )));
        }
        Ok(value)
    }

    pub fn to_i64(&self, field: &str) -> ProductResult<i64> {
        let value = self.to_f64(field)?;
        if value.fract() != 0.0 {
            return Err(ProductError::Validation(format!(
                "{} must be a whole number",
                field
            )));
        }
        Ok(value as i64)
    }
}

/// Image as sent by a client: a bare URL, or an entry read back from a
/// listing (`{publicId, url}` or `{public_id, url}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ImageInput {
    Url(String),
    Entry {
        #[serde(rename = "publicId", alias = "public_id", default)]
        public_id: Option<String>,
        url: String,
    },
}

impl ImageInput {
    /// `None` for a blank URL. An entry keeps its public id when it has one.
    fn into_image(self, media: &MediaLibrary) -> Option<Image> {
        match self {
            ImageInput::Url(url) => non_blank(Some(url)).map(|url| media.image_from_url(&url)),
            ImageInput::Entry { public_id, url } => {
                let url = non_blank(Some(url))?;
                Some(match non_blank(public_id) {
                    Some(public_id) => Image { public_id, url },
                    None => media.image_from_url(&url),
                })
            }
        }
    }
}

fn images(input: OneOrMany<ImageInput>, media: &MediaLibrary) -> Vec<Image> {
    input
        .into_vec()
        .into_iter()
        .filter_map(|image| image.into_image(media))
        .collect()
}

/// Specification line as sent by a client
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SpecificationInput {
    Entry(SpecificationEntry),
    /// Serialized `{title, description}` object
    Text(String),
}

impl SpecificationInput {
    /// Strict decoding used on create
    fn decode(self) -> ProductResult<Specification> {
        match self {
            SpecificationInput::Entry(entry) => Ok(Specification::Entry(entry)),
            SpecificationInput::Text(text) => serde_json::from_str::<SpecificationEntry>(&text)
                .map(Specification::Entry)
                .map_err(|e| ProductError::InvalidSpecification(e.to_string())),
        }
    }

    /// Lenient decoding used on update; undecodable text is kept as is
    fn decode_or_keep(self) -> Specification {
        match self {
            SpecificationInput::Entry(entry) => Specification::Entry(entry),
            SpecificationInput::Text(text) => match serde_json::from_str(&text) {
                Ok(entry) => Specification::Entry(entry),
                Err(_) => Specification::Opaque(text),
            },
        }
    }
}

/// Flat attribute map accepted by create and update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    /// One string or a list
    #[schema(value_type = Option<Vec<String>>)]
    pub highlights: Option<OneOrMany<String>>,
    /// Objects or their JSON text
    #[schema(value_type = Option<Vec<SpecificationEntry>>)]
    pub specifications: Option<OneOrMany<SpecificationInput>>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Numeric>,
    #[schema(value_type = Option<f64>)]
    pub cutted_price: Option<Numeric>,
    /// Image URLs or `{publicId, url}` entries, one or a list
    #[schema(value_type = Option<Vec<String>>)]
    pub images: Option<OneOrMany<ImageInput>>,
    pub brandname: Option<String>,
    /// Brand logo URL or `{publicId, url}` entry
    #[schema(value_type = Option<String>)]
    pub logo: Option<ImageInput>,
    pub category: Option<String>,
    #[schema(value_type = Option<i64>)]
    pub stock: Option<Numeric>,
    #[schema(value_type = Option<i64>)]
    pub warranty: Option<Numeric>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn required(value: Option<String>, message: &str) -> ProductResult<String> {
    non_blank(value).ok_or_else(|| ProductError::Validation(message.to_string()))
}

impl ProductInput {
    /// Normalizes a create request.
    ///
    /// `name`, `price` and `category` are required. Undecodable specification
    /// text fails the whole request.
    pub fn into_new_product(self, media: &MediaLibrary) -> ProductResult<NewProduct> {
        let name = required(self.name, "Please enter product name")?;
        let category = required(self.category, "Please enter product category")?;
        let price = self
            .price
            .ok_or_else(|| ProductError::Validation("Please enter product price".to_string()))?
            .to_f64("price")?;

        let specifications = self
            .specifications
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(SpecificationInput::decode)
            .collect::<ProductResult<Vec<_>>>()?;

        let brand = Brand {
            name: non_blank(self.brandname).unwrap_or_else(|| UNKNOWN_BRAND.to_string()),
            logo: self.logo.and_then(|logo| logo.into_image(media)),
        };

        Ok(NewProduct {
            name,
            description: self.description.unwrap_or_default(),
            highlights: self.highlights.map(OneOrMany::non_blank).unwrap_or_default(),
            specifications,
            price,
            cutted_price: optional_f64(self.cutted_price, "cuttedPrice")?.unwrap_or(0.0),
            images: self
                .images
                .map(|input| images(input, media))
                .unwrap_or_default(),
            brand,
            category,
            stock: optional_i64(self.stock, "stock")?.unwrap_or(1),
            warranty: optional_i64(self.warranty, "warranty")?.unwrap_or(1),
        })
    }

    /// Normalizes an update request; absent fields stay untouched.
    pub fn into_changes(self, media: &MediaLibrary) -> ProductResult<ProductChanges> {
        let images = self
            .images
            .map(|input| images(input, media))
            .filter(|images| !images.is_empty());

        let logo = self.logo.and_then(|logo| logo.into_image(media));
        let brand = match (non_blank(self.brandname), logo) {
            (name, Some(logo)) => BrandChange::Replace { name, logo },
            (Some(name), None) => BrandChange::Rename(name),
            (None, None) => BrandChange::Keep,
        };

        Ok(ProductChanges {
            name: self.name,
            description: self.description,
            highlights: self.highlights.map(OneOrMany::non_blank),
            specifications: self.specifications.map(|specs| {
                specs
                    .into_vec()
                    .into_iter()
                    .map(SpecificationInput::decode_or_keep)
                    .collect()
            }),
            price: optional_f64(self.price, "price")?,
            cutted_price: optional_f64(self.cutted_price, "cuttedPrice")?,
            images,
            brand,
            category: self.category,
            stock: optional_i64(self.stock, "stock")?,
            warranty: optional_i64(self.warranty, "warranty")?,
        })
    }
}

fn optional_f64(value: Option<Numeric>, field: &str) -> ProductResult<Option<f64>> {
    value.map(|v| v.to_f64(field)).transpose()
}

fn optional_i64(value: Option<Numeric>, field: &str) -> ProductResult<Option<i64>> {
    value.map(|v| v.to_i64(field)).transpose()
}

/// Body of `PUT /review`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewInput {
    /// Whole number from 1 to 5
    #[schema(value_type = u8)]
    pub rating: Numeric,
    #[serde(default)]
    pub comment: String,
    pub product_id: Uuid,
    /// Reviewer reference; repeats replace the earlier review
    pub user: Option<String>,
    /// Reviewer display name
    pub name: Option<String>,
}

impl ReviewInput {
    pub fn rating(&self) -> ProductResult<u8> {
        let rating = self.rating.to_i64("rating")?;
        if !(1..=5).contains(&rating) {
            return Err(ProductError::Validation(
                "rating must be between 1 and 5".to_string(),
            ));
        }
        Ok(rating as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> ProductInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_applies_defaults() {
        let input = decode(json!({
            "name": "Test Property",
            "price": 2000,
            "category": "house",
            "images": "https://x/y/abc.jpg"
        }));

        let product = input.into_new_product(&MediaLibrary::default()).unwrap();
        assert_eq!(product.name, "Test Property");
        assert_eq!(product.price, 2000.0);
        assert_eq!(product.stock, 1);
        assert_eq!(product.warranty, 1);
        assert_eq!(product.cutted_price, 0.0);
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].public_id, "abc");
        assert_eq!(product.brand.name, UNKNOWN_BRAND);
        assert!(product.brand.logo.is_none());
    }

    #[test]
    fn test_create_accepts_form_strings() {
        let input = decode(json!({
            "name": "Loft",
            "price": "1500.5",
            "cuttedPrice": "1800",
            "stock": "3",
            "category": "apartment",
            "brandname": "Acme Homes",
            "logo": "https://x/logos/acme.png",
            "highlights": ["Sea view", " ", "Parking"],
            "specifications": ["{\"title\":\"Rooms\",\"description\":\"3\"}"]
        }));

        let product = input.into_new_product(&MediaLibrary::default()).unwrap();
        assert_eq!(product.price, 1500.5);
        assert_eq!(product.cutted_price, 1800.0);
        assert_eq!(product.stock, 3);
        assert_eq!(product.highlights, ["Sea view", "Parking"]);
        assert_eq!(product.brand.name, "Acme Homes");
        assert_eq!(product.brand.logo.unwrap().public_id, "acme");
        assert_eq!(
            product.specifications,
            [Specification::Entry(SpecificationEntry {
                title: "Rooms".to_string(),
                description: "3".to_string(),
            })]
        );
    }

    #[test]
    fn test_create_rejects_bad_specification_text() {
        let input = decode(json!({
            "name": "Loft",
            "price": 10,
            "category": "apartment",
            "specifications": ["{not json"]
        }));

        let err = input.into_new_product(&MediaLibrary::default()).unwrap_err();
        assert!(matches!(err, ProductError::InvalidSpecification(_)));
    }

    #[test]
    fn test_create_requires_name_price_category() {
        let media = MediaLibrary::default();
        for body in [
            json!({"price": 1, "category": "house"}),
            json!({"name": "A", "category": "house"}),
            json!({"name": "A", "price": 1}),
            json!({"name": "  ", "price": 1, "category": "house"}),
        ] {
            let err = decode(body).into_new_product(&media).unwrap_err();
            assert!(matches!(err, ProductError::Validation(_)));
        }
    }

    #[test]
    fn test_fractional_stock_rejected() {
        let input = decode(json!({"name": "A", "price": 1, "category": "c", "stock": 1.5}));
        let err = input.into_new_product(&MediaLibrary::default()).unwrap_err();
        assert!(matches!(err, ProductError::Validation(msg) if msg.contains("stock")));
    }

    #[test]
    fn test_update_keeps_opaque_specification() {
        let body = json!({
            "specifications": ["{broken", {"title": "Area", "description": "90m2"}]
        });
        let changes = decode(body).into_changes(&MediaLibrary::default()).unwrap();

        let specs = changes.specifications.unwrap();
        assert_eq!(specs[0], Specification::Opaque("{broken".to_string()));
        assert!(matches!(specs[1], Specification::Entry(_)));
    }

    #[test]
    fn test_update_without_images_or_brand() {
        let changes = decode(json!({"price": 10, "images": []}))
            .into_changes(&MediaLibrary::default())
            .unwrap();

        assert_eq!(changes.price, Some(10.0));
        assert!(changes.images.is_none());
        assert_eq!(changes.brand, BrandChange::Keep);
    }

    #[test]
    fn test_update_accepts_stored_image_entries() {
        let body = json!({
            "name": "Villa",
            "images": [
                {"public_id": "front", "url": "https://x/y/front-v2.jpg", "_id": "abc"},
                {"publicId": "", "url": "https://x/y/garden.jpg"},
                "https://x/y/pool.jpg",
                {"url": " "}
            ],
            "logo": {"publicId": "acme", "url": "https://x/l/acme.png"}
        });
        let changes = decode(body).into_changes(&MediaLibrary::default()).unwrap();

        let images = changes.images.unwrap();
        let ids: Vec<_> = images.iter().map(|i| i.public_id.as_str()).collect();
        assert_eq!(ids, ["front", "garden", "pool"]);
        assert_eq!(images[0].url, "https://x/y/front-v2.jpg");
        assert!(matches!(
            changes.brand,
            BrandChange::Replace { name: None, ref logo } if logo.public_id == "acme"
        ));
    }

    #[test]
    fn test_create_accepts_image_entries() {
        let input = decode(json!({
            "name": "Loft",
            "price": 10,
            "category": "apartment",
            "images": {"publicId": "hall", "url": "https://x/y/hall.jpg"}
        }));

        let product = input.into_new_product(&MediaLibrary::default()).unwrap();
        assert_eq!(product.images, [Image::from_url("https://x/y/hall.jpg")]);
    }

    #[test]
    fn test_update_brand_variants() {
        let media = MediaLibrary::default();

        let rename = decode(json!({"brandname": "Zenith"})).into_changes(&media).unwrap();
        assert_eq!(rename.brand, BrandChange::Rename("Zenith".to_string()));

        let replace = decode(json!({"logo": "https://x/l/z.png"})).into_changes(&media).unwrap();
        assert!(matches!(replace.brand, BrandChange::Replace { name: None, .. }));
    }

    #[test]
    fn test_review_rating_bounds() {
        let id = Uuid::now_v7();
        let cases = [
            (json!(5), true),
            (json!("1"), true),
            (json!(0), false),
            (json!(6), false),
            (json!(2.5), false),
        ];
        for (rating, ok) in cases {
            let input: ReviewInput = serde_json::from_value(
                json!({"rating": rating, "comment": "", "productId": id}),
            )
            .unwrap();
            assert_eq!(input.rating().is_ok(), ok, "rating {:?}", input.rating);
        }
    }
}
