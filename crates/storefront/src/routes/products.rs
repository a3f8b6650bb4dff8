//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use boutique_core::{Price, Product, ProductId};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stores::ProductFilter;

/// Filter sidebar data.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub max_price: Price,
}

/// List products, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<Product>> {
    Json(state.catalog().search(&filter).await)
}

/// List featured products.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().list_featured().await)
}

/// Categories and the price ceiling for the filter controls.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let catalog = state.catalog();
    Json(CategoriesResponse {
        categories: catalog.categories(),
        max_price: catalog.max_price(),
    })
}

/// Display one product.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .catalog()
        .get_by_id(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
