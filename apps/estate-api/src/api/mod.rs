//! API routes module

pub mod health;

use axum::Router;
use domain_catalog::{CatalogService, MongoBrandRepository, MongoCategoryRepository};
use domain_products::{MongoProductRepository, ProductService};

use crate::state::AppState;

/// Routes mounted under the API prefix
pub fn routes(state: &AppState) -> Router {
    let products = ProductService::new(
        MongoProductRepository::new(&state.db),
        state.config.media.clone(),
    );
    let catalog = CatalogService::new(
        MongoCategoryRepository::new(&state.db),
        MongoBrandRepository::new(&state.db),
    );

    Router::new()
        .merge(domain_products::handlers::router(products))
        .merge(domain_catalog::handlers::router(catalog))
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoProductRepository::new(&state.db).init_indexes().await?;
    MongoCategoryRepository::new(&state.db).init_indexes().await?;
    MongoBrandRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
