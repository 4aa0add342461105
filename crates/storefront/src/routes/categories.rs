//! Public category listing.

use axum::{Json, extract::State};
use threadline_core::Category;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Active categories in display order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = state.read(|store| store.active_categories().cloned().collect());
    Ok(Json(categories))
}
