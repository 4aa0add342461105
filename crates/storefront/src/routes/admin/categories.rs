//! Category and sub-category management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use threadline_core::{
    Category, CategoryId, CategoryPatch, NewCategory, NewSubCategory, SubCategory, SubCategoryId,
};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRequest {
    pub is_active: bool,
}

/// All categories, including inactive ones.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.read(|store| store.categories().to_vec())))
}

#[instrument(skip(state, input), fields(slug = %input.slug))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = state.write(|store| store.add_category(input))?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>> {
    Ok(Json(state.write(|store| store.update_category(&id, patch))?))
}

#[instrument(skip(state))]
pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(body): Json<ActiveRequest>,
) -> Result<Json<Category>> {
    Ok(Json(
        state.write(|store| store.set_category_active(&id, body.is_active))?,
    ))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<StatusCode> {
    state.write(|store| store.delete_category(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, input))]
pub async fn add_sub_category(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(input): Json<NewSubCategory>,
) -> Result<(StatusCode, Json<SubCategory>)> {
    let sub = state.write(|store| store.add_sub_category(&id, input))?;
    Ok((StatusCode::CREATED, Json(sub)))
}

#[instrument(skip(state))]
pub async fn remove_sub_category(
    State(state): State<AppState>,
    Path((id, sub_id)): Path<(CategoryId, SubCategoryId)>,
) -> Result<StatusCode> {
    state.write(|store| store.remove_sub_category(&id, &sub_id))?;
    Ok(StatusCode::NO_CONTENT)
}
