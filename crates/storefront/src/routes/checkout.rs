//! Checkout: turn the cart into a pending order.

use axum::{Json, extract::State, http::StatusCode};
use boutique_core::{CustomerInfo, Order};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Checkout form data. Absent fields read as blank and are reported
/// together.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl From<CheckoutForm> for CustomerInfo {
    fn from(form: CheckoutForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            address: form.address.trim().to_string(),
        }
    }
}

/// Place an order for the current cart.
///
/// The cart lines are taken in one step, so items added while the order is
/// being written stay in the cart. If the order cannot be written the lines
/// are put back.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<Order>)> {
    let customer = CustomerInfo::from(form);
    let order = state.blocking(move |state| place_order(state, customer)).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

fn place_order(state: &AppState, customer: CustomerInfo) -> Result<Order> {
    let cart = state.cart();
    if cart.items()?.is_empty() {
        return Err(empty_cart());
    }

    let missing = customer.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "missing fields: {}",
            missing.join(", ")
        )));
    }

    let items = cart.take()?;
    if items.is_empty() {
        return Err(empty_cart());
    }

    match state.orders().create(items.clone(), customer) {
        Ok(order) => Ok(order),
        Err(err) => {
            if let Err(restore_err) = cart.restore(items) {
                tracing::error!(error = %restore_err, "Failed to restore cart after checkout");
            }
            Err(err.into())
        }
    }
}

fn empty_cart() -> AppError {
    AppError::BadRequest("cart is empty".to_string())
}
