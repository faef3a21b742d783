use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::debug;

use crate::catalog::{FilterCriteria, FilterRequest, FilterResponse, Product};
use crate::error::Result;
use crate::state::AppState;

/// `POST /filter`: run the shopping filter. A missing catalog still answers 200.
pub async fn filter(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> Result<Json<FilterResponse>> {
    let criteria = FilterCriteria::from(request);
    debug!(
        category = %criteria.category,
        color = ?criteria.color,
        max_price = ?criteria.max_price,
        "filter request"
    );
    Ok(Json(state.catalog.filter(&criteria).await?))
}

/// Either the full catalog array or the missing-catalog error body.
#[derive(Debug, serde::Serialize)]
#[serde(untagged)]
pub enum CatalogListing {
    Products(Vec<Product>),
    Missing(FilterResponse),
}

/// `GET /products.json`: the unfiltered catalog for the initial product grid.
pub async fn list_products(State(state): State<Arc<AppState>>) -> Result<Json<CatalogListing>> {
    let listing = match state.catalog.load().await? {
        Some(products) => CatalogListing::Products(products),
        None => CatalogListing::Missing(FilterResponse::catalog_missing()),
    };
    Ok(Json(listing))
}
