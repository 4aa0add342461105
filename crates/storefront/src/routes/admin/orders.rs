//! Order book.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use threadline_core::{Order, OrderId, OrderStatus, Product};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// An order line with the product it refers to, if still in the catalog.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub order: Order,
    /// Current catalog entries for each line, in line order.
    pub products: Vec<Option<Product>>,
}

/// Orders, optionally restricted to one status.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<Order>>> {
    let orders = state.read(|store| {
        store
            .orders_by_status(filter.status)
            .into_iter()
            .cloned()
            .collect()
    });
    Ok(Json(orders))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetail>> {
    state
        .read(|store| {
            let order = store.get_order_by_id(&id)?.clone();
            let products = store
                .order_lines_with_products(&id)?
                .into_iter()
                .map(|(_, product)| product.cloned())
                .collect();
            Some(OrderDetail { order, products })
        })
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Order>> {
    Ok(Json(
        state.write(|store| store.update_order_status(&id, body.status))?,
    ))
}
