//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the estate API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Estate API",
        version = "0.1.0",
        description = "Property listings with reviews, categories and brands",
    ),
    servers(
        (url = "http://localhost:4000", description = "Local development server")
    ),
    nest(
        (path = "/api/v1", api = domain_products::ApiDoc),
        (path = "/api/v1", api = domain_catalog::ApiDoc)
    )
)]
pub struct ApiDoc;
