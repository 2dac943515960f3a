//! HTTP handlers for the listings API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    AppJson, AppQuery, UuidPath,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi};
use uuid::Uuid;

use crate::error::ProductResult;
use crate::input::ProductInput;
use crate::input::ReviewInput;
use crate::models::{
    Brand, Image, Product, ProductListResponse, ProductPageResponse, ProductResponse, Review,
    ReviewsResponse, Specification, SpecificationEntry, SuccessResponse,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the listings API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        all_products,
        admin_products,
        get_product,
        create_product,
        update_product,
        delete_product,
        upsert_review,
        get_reviews,
        delete_review,
    ),
    components(
        schemas(
            Product, Image, Brand, Specification, SpecificationEntry, Review,
            ProductInput, ReviewInput,
            ProductPageResponse, ProductListResponse, ProductResponse,
            ReviewsResponse, SuccessResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Property listings"),
        (name = "Reviews", description = "Reviews embedded in listings")
    )
)]
pub struct ApiDoc;

/// Routes of the listings API, relative to the API prefix
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products))
        .route("/products/all", get(all_products))
        .route("/admin/products", get(admin_products))
        .route("/product/{id}", get(get_product))
        .route("/admin/product/new", post(create_product))
        .route(
            "/admin/product/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/review", put(upsert_review))
        .route("/admin/reviews", get(get_reviews).delete(delete_review))
        .with_state(shared_service)
}

/// Filtered, paginated listing
///
/// Any parameter other than `keyword` and `page` filters by equality;
/// `field[gt]`, `field[gte]`, `field[lt]` and `field[lte]` filter by range.
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(
        ("keyword" = Option<String>, Query, description = "Case-insensitive match on the name"),
        ("page" = Option<u64>, Query, description = "1-based page of 12 results"),
        ("price[gte]" = Option<f64>, Query, description = "Example range filter"),
        ("category" = Option<String>, Query, description = "Example equality filter")
    ),
    responses(
        (status = 200, description = "One page of products", body = ProductPageResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppQuery(params): AppQuery<Vec<(String, String)>>,
) -> ProductResult<Json<ProductPageResponse>> {
    let page = service.list_products(params).await?;
    Ok(Json(page.into()))
}

/// Every product, unpaginated
#[utoipa::path(
    get,
    path = "/products/all",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    let products = service.all_products().await?;
    Ok(Json(ProductListResponse {
        success: true,
        products,
    }))
}

/// Every product, for the admin table
#[utoipa::path(
    get,
    path = "/admin/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = ProductListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_products<R: ProductRepository>(
    state: State<Arc<ProductService<R>>>,
) -> ProductResult<Json<ProductListResponse>> {
    all_products(state).await
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.get_product(id).await?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/product/new",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(input): AppJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            product,
        }),
    ))
}

/// Partial update; omitted images and brand are kept
#[utoipa::path(
    put,
    path = "/admin/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    AppJson(input): AppJson<ProductInput>,
) -> ProductResult<Json<ProductResponse>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(ProductResponse {
        success: true,
        product,
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/product/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = SuccessResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<SuccessResponse>> {
    service.delete_product(id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// Add a review, or replace the reviewer's earlier one
#[utoipa::path(
    put,
    path = "/review",
    tag = "Reviews",
    request_body = ReviewInput,
    responses(
        (status = 200, description = "Review saved", body = SuccessResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upsert_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppJson(input): AppJson<ReviewInput>,
) -> ProductResult<Json<SuccessResponse>> {
    service.upsert_review(input).await?;
    Ok(Json(SuccessResponse::ok()))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewsQuery {
    /// Product ID
    pub id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewQuery {
    pub product_id: Uuid,
    /// Review ID
    pub id: Uuid,
}

#[utoipa::path(
    get,
    path = "/admin/reviews",
    tag = "Reviews",
    params(ReviewsQuery),
    responses(
        (status = 200, description = "Reviews of the product", body = ReviewsResponse),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_reviews<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppQuery(query): AppQuery<ReviewsQuery>,
) -> ProductResult<Json<ReviewsResponse>> {
    let reviews = service.get_reviews(query.id).await?;
    Ok(Json(ReviewsResponse {
        success: true,
        reviews,
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/reviews",
    tag = "Reviews",
    params(DeleteReviewQuery),
    responses(
        (status = 200, description = "Review removed", body = SuccessResponse),
        (status = 400, description = "Missing or malformed id"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    AppQuery(query): AppQuery<DeleteReviewQuery>,
) -> ProductResult<Json<SuccessResponse>> {
    service.delete_review(query.product_id, query.id).await?;
    Ok(Json(SuccessResponse::ok()))
}
