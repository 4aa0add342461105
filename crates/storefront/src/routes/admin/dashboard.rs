//! Dashboard summary.

use axum::{Json, extract::State};
use threadline_core::store::DashboardSummary;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<DashboardSummary>> {
    Ok(Json(state.read(threadline_core::CatalogStore::dashboard_summary)))
}
