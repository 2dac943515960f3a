use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::slug::slugify;

/// Listing category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    /// Unique, trimmed
    pub name: String,
    pub display_name: String,
    pub system_name: String,
    pub description: String,
    /// Image URL
    pub image: String,
    /// Derived from `systemName`
    pub slug: String,
    /// Parent brand id
    pub parent: Option<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    /// Set while the category is hidden
    pub is_disabled: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "Please enter category name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please enter display name"))]
    pub display_name: String,
    #[validate(length(min = 1, message = "Please enter system name"))]
    pub system_name: String,
    #[validate(length(min = 1, message = "Please enter category description"))]
    pub description: String,
    #[validate(length(min = 1, message = "Please provide a category image"))]
    pub image: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub display_name: Option<String>,
    #[validate(length(min = 1))]
    pub system_name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub image: Option<String>,
    pub parent: Option<String>,
    pub brands: Option<Vec<String>>,
    /// `true` hides the category, `false` shows it again
    pub disabled: Option<bool>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            display_name: input.display_name,
            slug: slugify(&input.system_name),
            system_name: input.system_name,
            description: input.description,
            image: input.image,
            parent: input.parent,
            brands: input.brands,
            is_disabled: None,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(display_name) = update.display_name {
            self.display_name = display_name;
        }
        if let Some(system_name) = update.system_name {
            self.system_name = system_name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(parent) = update.parent {
            self.parent = Some(parent);
        }
        if let Some(brands) = update.brands {
            self.brands = brands;
        }
        match update.disabled {
            Some(true) if self.is_disabled.is_none() => self.is_disabled = Some(Utc::now()),
            Some(false) => self.is_disabled = None,
            _ => {}
        }
        self.slug = slugify(&self.system_name);
    }
}

/// Brand a listing can be filed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBrand {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    #[schema(value_type = String, format = Uuid)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Logo URL
    pub logo: String,
    /// Derived from `name`
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBrand {
    #[validate(length(min = 1, max = 100, message = "Please enter brand name"))]
    pub name: String,
    #[validate(length(min = 1, message = "Please enter brand description"))]
    pub description: String,
    #[validate(length(min = 1, message = "Please provide a brand logo"))]
    pub logo: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBrand {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub logo: Option<String>,
}

impl ProductBrand {
    pub fn new(input: CreateBrand) -> Self {
        let now = Utc::now();
        let name = input.name.trim().to_string();
        Self {
            id: Uuid::now_v7(),
            slug: slugify(&name),
            name,
            description: input.description,
            logo: input.logo,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateBrand) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(logo) = update.logo {
            self.logo = logo;
        }
        self.slug = slugify(&self.name);
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub success: bool,
    pub category: Category,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandResponse {
    pub success: bool,
    pub brand: ProductBrand,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandListResponse {
    pub success: bool,
    pub brands: Vec<ProductBrand>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
}
