//! Product management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use threadline_core::{NewProduct, Product, ProductId, ProductPatch};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[instrument(skip(state, input), fields(name = %input.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.write(|store| store.add_product(input))?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    Ok(Json(state.write(|store| store.update_product(&id, patch))?))
}

/// Delete a product. Existing cart lines, wishlist entries and orders keep
/// their snapshotted data.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    state.write(|store| store.delete_product(&id))?;
    Ok(StatusCode::NO_CONTENT)
}
