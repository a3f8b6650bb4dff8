//! Order administration route handlers.
//!
//! Status changes follow [`OrderStatus::can_transition_to`], checked in the
//! same store update that writes the new status.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use boutique_core::{Order, OrderId, OrderStatus};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::stores::{OrderFilter, Transition};

/// Status change request.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// An order with the status actions the admin screen may offer for it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub next_statuses: Vec<OrderStatus>,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        Self {
            next_statuses: order.status.next_statuses(),
            order,
        }
    }
}

/// List orders, optionally filtered.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<OrderView>>> {
    let orders = state
        .blocking(move |state| Ok(state.orders().search(&filter)?))
        .await?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

/// Display one order.
#[instrument(skip(state), fields(order_id = %id))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderView>> {
    state
        .blocking(move |state| {
            state
                .orders()
                .get(&id)?
                .ok_or_else(|| AppError::NotFound(format!("order {id}")))
        })
        .await
        .map(|order| Json(order.into()))
}

/// Move an order to a new status.
#[instrument(skip(state, update), fields(order_id = %id, status = %update.status))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<OrderView>> {
    let next = update.status;
    let order = state
        .blocking(move |state| {
            match state
                .orders()
                .transition(&id, next, |from| from.can_transition_to(next))?
            {
                Transition::Moved { order, .. } => Ok(order),
                Transition::Refused { from } => Err(AppError::Conflict(format!(
                    "order cannot move from {from} to {next}"
                ))),
                Transition::NotFound => Err(AppError::NotFound(format!("order {id}"))),
            }
        })
        .await?;
    Ok(Json(order.into()))
}
