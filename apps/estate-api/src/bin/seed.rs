//! Loads sample listings, categories and brands into MongoDB.
//!
//! Existing documents in the three collections are deleted first.
//!
//! Run with: cargo run -p estate_api --bin seed

use core_config::{
    media::MediaConfig,
    tracing::{init_tracing, install_color_eyre},
    Environment, FromEnv,
};
use database::mongodb::{connect_from_config, disconnect, MongoConfig};
use domain_catalog::{
    CatalogService, CreateBrand, CreateCategory, MongoBrandRepository, MongoCategoryRepository,
};
use domain_products::{MongoProductRepository, ProductInput, ProductService, ReviewInput};
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};
use tracing::info;

const SAMPLE_REVIEWERS: [&str; 2] = ["sample-admin", "sample-user"];

fn sample_categories() -> Vec<CreateCategory> {
    [
        ("Villa", "Luxury villas with premium amenities", "photo-1613490493576-7fde63acd811"),
        ("Apartment", "Modern apartments in prime locations", "photo-1502672260266-1c1ef2d93688"),
        ("Condo", "Luxury condominiums with resort-style living", "photo-1519974719765-e6559eac2575"),
    ]
    .into_iter()
    .map(|(name, description, photo)| CreateCategory {
        name: name.to_string(),
        display_name: name.to_string(),
        system_name: name.to_lowercase(),
        description: description.to_string(),
        image: unsplash(photo),
        parent: None,
        brands: vec![],
    })
    .collect()
}

fn sample_brands() -> Vec<CreateBrand> {
    [
        ("Luxury Homes", "Premium real estate developer", "photo-1613490493576-7fde63acd811"),
        ("Urban Living", "Modern urban properties", "photo-1502672260266-1c1ef2d93688"),
        ("Coastal Properties", "Beachfront and waterfront properties", "photo-1519974719765-e6559eac2575"),
    ]
    .into_iter()
    .map(|(name, description, photo)| CreateBrand {
        name: name.to_string(),
        description: description.to_string(),
        logo: unsplash(photo),
    })
    .collect()
}

/// Listing bodies in the shape the admin form posts
fn sample_listings() -> Vec<Value> {
    vec![
        json!({
            "name": "Luxury Villa with Pool",
            "description": "Stunning 5-bedroom villa with private pool and garden",
            "highlights": ["5 Bedrooms", "Private Pool", "Landscaped Garden", "Double Garage", "Smart Home System"],
            "specifications": specifications(&[
                ("Property Type", "Villa"), ("Size", "450 sq m"), ("Bedrooms", "5"),
                ("Bathrooms", "4"), ("Parking", "2 cars"), ("Year Built", "2020"),
            ]),
            "price": 1_200_000,
            "images": [
                {"public_id": "real_estate/villa_1", "url": unsplash("photo-1613490493576-7fde63acd811")},
                {"public_id": "real_estate/villa_2", "url": unsplash("photo-1613977257363-707ba9348227")}
            ],
            "brandname": "Luxury Homes",
            "logo": {"public_id": "real_estate/brand_1", "url": unsplash("photo-1613490493576-7fde63acd811")},
            "category": "Villa",
            "stock": 1,
            "warranty": 1
        }),
        json!({
            "name": "Modern City Apartment",
            "description": "Contemporary 2-bedroom apartment in the heart of the city",
            "highlights": ["2 Bedrooms", "City Views", "Modern Kitchen", "Gym Access", "24/7 Security"],
            "specifications": specifications(&[
                ("Property Type", "Apartment"), ("Size", "85 sq m"), ("Bedrooms", "2"),
                ("Bathrooms", "2"), ("Parking", "1 car"), ("Year Built", "2021"),
            ]),
            "price": 450_000,
            "images": [
                {"public_id": "real_estate/apartment_1", "url": unsplash("photo-1502672260266-1c1ef2d93688")},
                {"public_id": "real_estate/apartment_2", "url": unsplash("photo-1560448204-e02f11c3d0e2")}
            ],
            "brandname": "Urban Living",
            "logo": {"public_id": "real_estate/brand_2", "url": unsplash("photo-1502672260266-1c1ef2d93688")},
            "category": "Apartment",
            "stock": 1,
            "warranty": 1
        }),
        json!({
            "name": "Beachfront Condo",
            "description": "Luxurious 3-bedroom condo with stunning ocean views",
            "highlights": ["3 Bedrooms", "Ocean Views", "Private Beach Access", "Resort Amenities", "Covered Parking"],
            "specifications": specifications(&[
                ("Property Type", "Condo"), ("Size", "200 sq m"), ("Bedrooms", "3"),
                ("Bathrooms", "3"), ("Parking", "2 cars"), ("Year Built", "2019"),
            ]),
            "price": 850_000,
            "images": [
                {"public_id": "real_estate/condo_1", "url": unsplash("photo-1519974719765-e6559eac2575")},
                {"public_id": "real_estate/condo_2", "url": unsplash("photo-1564013799919-ab600027ffc6")}
            ],
            "brandname": "Coastal Properties",
            "logo": {"public_id": "real_estate/brand_3", "url": unsplash("photo-1519974719765-e6559eac2575")},
            "category": "Condo",
            "stock": 1,
            "warranty": 2
        }),
    ]
}

/// `(listing index, reviewer index, rating, comment)`
const SAMPLE_REVIEWS: [(usize, usize, u8, &str); 2] = [
    (0, 0, 5, "Amazing property with great amenities!"),
    (1, 1, 4, "Great location and modern design"),
];

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{}?w=800", photo)
}

fn specifications(entries: &[(&str, &str)]) -> Value {
    entries
        .iter()
        .map(|(title, description)| json!({"title": title, "description": description}))
        .collect()
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    init_tracing(&Environment::from_env());

    let mongo = MongoConfig::from_env()?;
    let client = connect_from_config(&mongo).await?;
    let db = client.database(mongo.database());

    for name in [
        domain_products::mongodb::COLLECTION,
        domain_catalog::mongodb::CATEGORY_COLLECTION,
        domain_catalog::mongodb::BRAND_COLLECTION,
    ] {
        let deleted = db
            .collection::<Document>(name)
            .delete_many(doc! {})
            .await?
            .deleted_count;
        info!(collection = name, deleted, "Cleared collection");
    }

    let categories = MongoCategoryRepository::new(&db);
    let brands = MongoBrandRepository::new(&db);
    let products = MongoProductRepository::new(&db);
    categories.init_indexes().await?;
    brands.init_indexes().await?;
    products.init_indexes().await?;

    let catalog = CatalogService::new(categories, brands);
    for input in sample_categories() {
        catalog.create_category(input).await?;
    }
    for input in sample_brands() {
        catalog.create_brand(input).await?;
    }
    info!("Categories and brands created");

    let service = ProductService::new(products, MediaConfig::from_env()?);
    let mut ids = Vec::new();
    for body in sample_listings() {
        let input: ProductInput = serde_json::from_value(body)?;
        ids.push(service.create_product(input).await?.id);
    }
    info!(count = ids.len(), "Listings created");

    for (listing, reviewer, rating, comment) in SAMPLE_REVIEWS {
        let input: ReviewInput = serde_json::from_value(json!({
            "rating": rating,
            "comment": comment,
            "productId": ids[listing],
            "user": SAMPLE_REVIEWERS[reviewer],
        }))?;
        service.upsert_review(input).await?;
    }
    info!(count = SAMPLE_REVIEWS.len(), "Reviews created");

    disconnect(client).await;
    info!("Database seeding completed");
    Ok(())
}
