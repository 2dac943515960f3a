//! HTTP handlers for categories and brands

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::models::{
    BrandListResponse, BrandResponse, Category, CategoryListResponse, CategoryResponse,
    CreateBrand, CreateCategory, ProductBrand, SuccessResponse, UpdateBrand, UpdateCategory,
};
use crate::repository::{BrandRepository, CategoryRepository};
use crate::service::CatalogService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_categories,
        get_category,
        create_category,
        update_category,
        delete_category,
        list_brands,
        get_brand,
        create_brand,
        update_brand,
        delete_brand,
    ),
    components(
        schemas(
            Category, CreateCategory, UpdateCategory, CategoryResponse, CategoryListResponse,
            ProductBrand, CreateBrand, UpdateBrand, BrandResponse, BrandListResponse,
            SuccessResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Listing categories"),
        (name = "Brands", description = "Listing brands")
    )
)]
pub struct ApiDoc;

type SharedService<C, B> = State<Arc<CatalogService<C, B>>>;

/// Routes of the catalog API, relative to the API prefix
pub fn router<C, B>(service: CatalogService<C, B>) -> Router
where
    C: CategoryRepository + 'static,
    B: BrandRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/categories", get(list_categories))
        .route("/category/{id}", get(get_category))
        .route("/admin/category/new", post(create_category))
        .route(
            "/admin/category/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/brands", get(list_brands))
        .route("/brand/{id}", get(get_brand))
        .route("/admin/brand/new", post(create_brand))
        .route("/admin/brand/{id}", put(update_brand).delete(delete_brand))
        .with_state(shared_service)
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = CategoryListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
) -> CatalogResult<Json<CategoryListResponse>> {
    let categories = service.list_categories().await?;
    Ok(Json(CategoryListResponse {
        success: true,
        categories,
    }))
}

#[utoipa::path(
    get,
    path = "/category/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_category<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.get_category(id).await?;
    Ok(Json(CategoryResponse {
        success: true,
        category,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/category/new",
    tag = "Categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CatalogResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            success: true,
            category,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/admin/category/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CatalogResult<Json<CategoryResponse>> {
    let category = service.update_category(id, input).await?;
    Ok(Json(CategoryResponse {
        success: true,
        category,
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/category/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = SuccessResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<SuccessResponse>> {
    service.delete_category(id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

#[utoipa::path(
    get,
    path = "/brands",
    tag = "Brands",
    responses(
        (status = 200, description = "All brands", body = BrandListResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_brands<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
) -> CatalogResult<Json<BrandListResponse>> {
    let brands = service.list_brands().await?;
    Ok(Json(BrandListResponse {
        success: true,
        brands,
    }))
}

#[utoipa::path(
    get,
    path = "/brand/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand found", body = BrandResponse),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_brand<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<BrandResponse>> {
    let brand = service.get_brand(id).await?;
    Ok(Json(BrandResponse {
        success: true,
        brand,
    }))
}

#[utoipa::path(
    post,
    path = "/admin/brand/new",
    tag = "Brands",
    request_body = CreateBrand,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_brand<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> CatalogResult<impl IntoResponse> {
    let brand = service.create_brand(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(BrandResponse {
            success: true,
            brand,
        }),
    ))
}

#[utoipa::path(
    put,
    path = "/admin/brand/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = UpdateBrand,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_brand<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> CatalogResult<Json<BrandResponse>> {
    let brand = service.update_brand(id, input).await?;
    Ok(Json(BrandResponse {
        success: true,
        brand,
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/brand/{id}",
    tag = "Brands",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand deleted", body = SuccessResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_brand<C: CategoryRepository, B: BrandRepository>(
    State(service): SharedService<C, B>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<SuccessResponse>> {
    service.delete_brand(id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
