//! Cart route handlers.
//!
//! Every mutation answers with the refreshed cart so clients can redraw the
//! cart view and the count badge from one response.

use axum::{Json, extract::State};
use boutique_core::{CartItem, Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart display data.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub count: u32,
    pub total: Price,
}

impl CartView {
    fn load(state: &AppState) -> Result<Self> {
        let items = state.cart().items()?;
        Ok(Self {
            count: boutique_core::cart_count(&items),
            total: boutique_core::cart_total(&items),
            items,
        })
    }
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u32,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Remove from cart request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    state.blocking(CartView::load).await.map(Json)
}

/// Cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Result<Json<CountResponse>> {
    let count = state.blocking(|state| Ok(state.cart().count()?)).await?;
    Ok(Json(CountResponse { count }))
}

/// Add a catalog product to the cart.
#[instrument(skip(state), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = state
        .catalog()
        .get_by_id(&request.product_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    let view = state
        .blocking(move |state| {
            state.cart().add(product, quantity)?;
            CartView::load(state)
        })
        .await?;
    tracing::info!(quantity, "Added to cart");
    Ok(Json(view))
}

/// Set the quantity of a cart line.
#[instrument(skip(state), fields(product_id = %request.product_id))]
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    if request.quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    state
        .blocking(move |state| {
            state
                .cart()
                .set_quantity(&request.product_id, request.quantity)?;
            CartView::load(state)
        })
        .await
        .map(Json)
}

/// Remove a cart line.
#[instrument(skip(state), fields(product_id = %request.product_id))]
pub async fn remove(
    State(state): State<AppState>,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    state
        .blocking(move |state| {
            state.cart().remove(&request.product_id)?;
            CartView::load(state)
        })
        .await
        .map(Json)
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Json<CartView>> {
    state
        .blocking(|state| {
            state.cart().clear()?;
            CartView::load(state)
        })
        .await
        .map(Json)
}
