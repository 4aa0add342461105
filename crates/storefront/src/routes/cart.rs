//! Cart handlers.
//!
//! Every successful mutation is followed by a background snapshot write.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use threadline_core::{CartItem, CartItemId, CartItemPatch, CatalogStore, ProductId};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total: Decimal,
    pub item_count: u32,
}

impl CartView {
    fn of(store: &CatalogStore) -> Self {
        Self {
            items: store.cart().to_vec(),
            total: store.cart_total(),
            item_count: store.cart_item_count(),
        }
    }
}

/// Request to add a catalog product to the cart.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<CartView>> {
    Ok(Json(state.read(CartView::of)))
}

/// Add a line. Adding the same product and variant twice yields two lines.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>)> {
    let item = state.write_bag(|store| {
        store.add_product_to_cart(&body.product_id, &body.size, &body.color, body.quantity)
    })?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
    Json(patch): Json<CartItemPatch>,
) -> Result<Json<CartItem>> {
    let item = state.write_bag(|store| store.update_cart_item(&id, patch))?;
    Ok(Json(item))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<CartItemId>,
) -> Result<StatusCode> {
    state.write_bag(|store| store.remove_from_cart(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.write_bag(|store| {
        store.clear_cart();
        Ok(())
    })?;
    Ok(StatusCode::NO_CONTENT)
}
