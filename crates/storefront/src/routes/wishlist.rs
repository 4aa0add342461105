//! Wishlist handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use threadline_core::{ProductId, WishlistItem, WishlistItemId};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistView {
    pub items: Vec<WishlistItem>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToWishlistRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub in_wishlist: bool,
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<WishlistView>> {
    let view = state.read(|store| WishlistView {
        items: store.wishlist().to_vec(),
        count: store.wishlist_count(),
    });
    Ok(Json(view))
}

/// Add a product. A product already in the wishlist is returned unchanged
/// with `200 OK` instead of `201 Created`.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddToWishlistRequest>,
) -> Result<(StatusCode, Json<WishlistItem>)> {
    let (existed, item) = state.write_bag(|store| {
        let existed = store.is_in_wishlist(&body.product_id);
        store
            .add_product_to_wishlist(&body.product_id)
            .map(|item| (existed, item))
    })?;
    let status = if existed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(item)))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<WishlistItemId>,
) -> Result<StatusCode> {
    state.write_bag(|store| store.remove_from_wishlist(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn contains(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Membership>> {
    let in_wishlist = state.read(|store| store.is_in_wishlist(&product_id));
    Ok(Json(Membership { in_wishlist }))
}

#[instrument(skip(state))]
pub async fn remove_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<StatusCode> {
    state.write_bag(|store| store.remove_from_wishlist_by_product_id(&product_id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.write_bag(|store| {
        store.clear_wishlist();
        Ok(())
    })?;
    Ok(StatusCode::NO_CONTENT)
}
