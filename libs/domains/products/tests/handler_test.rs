//! Handler tests for the listings domain against a real MongoDB
//!
//! These drive the domain router end to end:
//! - Request decoding of the loose admin form shapes
//! - Envelope shape and status codes
//! - Review aggregates as persisted
//!
//! They start a container through testcontainers and need Docker.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use core_config::media::MediaConfig;
use domain_products::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{assertions::*, TestDataBuilder, TestMongo};
use tower::ServiceExt; // For oneshot()

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn setup(mongo: &TestMongo, builder: &TestDataBuilder) -> Router {
    let db = mongo.database(&builder.database_name());
    let repo = MongoProductRepository::new(&db);
    repo.init_indexes().await.unwrap();
    handlers::router(ProductService::new(repo, MediaConfig::default()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/admin/product/new", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await["product"].clone()
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_get_delete_lifecycle() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("lifecycle");
    let app = setup(&mongo, &builder).await;

    let product = create(
        &app,
        json!({
            "name": "Test Property",
            "price": 2000,
            "category": "house",
            "stock": 1,
            "images": [builder.image_url("abc")]
        }),
    )
    .await;
    assert_eq!(product["name"], "Test Property");
    assert_eq!(product["images"][0]["publicId"], "abc");

    let id = product["_id"].as_str().unwrap().to_string();

    let response = app.clone().oneshot(get(&format!("/product/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response.into_body()).await;
    assert_eq!(json["product"]["name"], "Test Property");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/admin/product/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get(&format!("/product/{}", id))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_without_images_keeps_them() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("update_keeps_images");
    let app = setup(&mongo, &builder).await;

    let product = create(
        &app,
        json!({
            "name": builder.name("villa", "main"),
            "price": builder.price(2000.0),
            "category": "villa",
            "images": [builder.image_url("front"), builder.image_url("garden")],
            "brandname": "Acme Homes",
            "logo": builder.image_url("acme")
        }),
    )
    .await;
    let id = product["_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/admin/product/{}", id),
            json!({"price": 1, "specifications": ["{not json"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response.into_body()).await["product"].clone();
    assert_eq!(updated["images"], product["images"]);
    assert_eq!(updated["brand"], product["brand"]);
    assert_eq!(updated["specifications"], json!(["{not json"]));
    assert_close(updated["price"].as_f64().unwrap(), 1.0, "price");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_review_aggregates_persist() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("review_aggregates");
    let app = setup(&mongo, &builder).await;

    let product = create(
        &app,
        json!({"name": "Duplex", "price": 900, "category": "apartment"}),
    )
    .await;
    let id = product["_id"].as_str().unwrap().to_string();

    for rating in [5, 3] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/review",
                json!({"rating": rating, "comment": "visited", "productId": id}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get(&format!("/product/{}", id)))
        .await
        .unwrap();
    let stored = json_body(response.into_body()).await["product"].clone();
    assert_close(stored["ratings"].as_f64().unwrap(), 4.0, "ratings");
    assert_eq!(stored["numOfReviews"], 2);

    let review_id = stored["reviews"][0]["_id"].as_str().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/admin/reviews?productId={}&id={}", id, review_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/admin/reviews?id={}", id)))
        .await
        .unwrap();
    let json = json_body(response.into_body()).await;
    let reviews = assert_some(json["reviews"].as_array(), "reviews array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 3);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_listing_filters_and_pages() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("listing_pages");
    let app = setup(&mongo, &builder).await;

    for i in 0..15 {
        create(
            &app,
            json!({
                "name": format!("House {}", i),
                "price": 1000 + i * 100,
                "category": "house"
            }),
        )
        .await;
    }
    create(
        &app,
        json!({"name": "Studio", "price": 500, "category": "flat"}),
    )
    .await;

    let response = app
        .clone()
        .oneshot(get("/products?category=house&price%5Bgte%5D=1500&page=1"))
        .await
        .unwrap();
    let json = json_body(response.into_body()).await;
    assert_eq!(json["productsCount"], 16);
    assert_eq!(json["filteredProductsCount"], 10);
    assert_eq!(json["resultPerPage"], 12);
    assert_eq!(json["products"].as_array().unwrap().len(), 10);

    let response = app
        .clone()
        .oneshot(get("/products?category=house&page=2"))
        .await
        .unwrap();
    let json = json_body(response.into_body()).await;
    assert_eq!(json["filteredProductsCount"], 15);
    assert_eq!(json["products"].as_array().unwrap().len(), 3);

    let response = app.oneshot(get("/products?keyword=STUD")).await.unwrap();
    let json = json_body(response.into_body()).await;
    assert_eq!(json["filteredProductsCount"], 1);
    assert_eq!(json["products"][0]["name"], "Studio");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_same_reviewer_replaces_review() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("reviewer_replaces");
    let app = setup(&mongo, &builder).await;

    let product = create(
        &app,
        json!({"name": "Cottage", "price": 700, "category": "house"}),
    )
    .await;
    let id = product["_id"].as_str().unwrap().to_string();
    let user = builder.user_id().to_string();

    for (rating, comment) in [(2, "damp"), (5, "fixed now")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/review",
                json!({"rating": rating, "comment": comment, "productId": id, "user": user}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get(&format!("/product/{}", id)))
        .await
        .unwrap();
    let stored = json_body(response.into_body()).await["product"].clone();
    assert_eq!(stored["numOfReviews"], 1);
    assert_close(stored["ratings"].as_f64().unwrap(), 5.0, "ratings");
    assert_eq!(stored["reviews"][0]["comment"], "fixed now");
    assert_eq!(stored["reviews"][0]["user"], user);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_edit_keeps_review_written_meanwhile() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("edit_keeps_review");
    let db = mongo.database(&builder.database_name());
    let repo = MongoProductRepository::new(&db);
    let service = ProductService::new(repo.clone(), MediaConfig::default());

    let product = service
        .create_product(
            serde_json::from_value(json!({"name": "Chalet", "price": 900, "category": "house"}))
                .unwrap(),
        )
        .await
        .unwrap();

    // Edit loaded before the review lands
    let mut edited = service.get_product(product.id).await.unwrap();

    let review: ReviewInput = serde_json::from_value(
        json!({"rating": 4, "comment": "quiet", "productId": product.id}),
    )
    .unwrap();
    service.upsert_review(review).await.unwrap();

    edited.name = "Alpine Chalet".to_string();
    let saved = repo.save_details(edited).await.unwrap();
    assert_eq!(saved.name, "Alpine Chalet");
    assert_eq!(saved.num_of_reviews, 1);

    let stored = service.get_product(product.id).await.unwrap();
    assert_eq!(stored.name, "Alpine Chalet");
    assert_eq!(stored.reviews.len(), 1);
    assert_close(stored.ratings, 4.0, "ratings");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_with_stored_image_entries() {
    let mongo = TestMongo::new().await;
    let builder = TestDataBuilder::from_test_name("update_image_entries");
    let app = setup(&mongo, &builder).await;

    let mut product = create(
        &app,
        json!({
            "name": "Penthouse",
            "price": 5000,
            "category": "apartment",
            "images": [builder.image_url("roof")]
        }),
    )
    .await;
    let id = product["_id"].as_str().unwrap().to_string();

    product["price"] = json!(5200);
    let response = app
        .clone()
        .oneshot(json_request("PUT", &format!("/admin/product/{}", id), product.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let updated = json_body(response.into_body()).await["product"].clone();
    assert_eq!(updated["images"], product["images"]);
    assert_close(updated["price"].as_f64().unwrap(), 5200.0, "price");
}
