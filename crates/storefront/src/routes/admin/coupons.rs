//! Coupon management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use threadline_core::{Coupon, CouponId, CouponPatch, NewCoupon};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Coupon>>> {
    Ok(Json(state.read(|store| store.coupons().to_vec())))
}

#[instrument(skip(state, input), fields(code = %input.code))]
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewCoupon>,
) -> Result<(StatusCode, Json<Coupon>)> {
    let coupon = state.write(|store| store.add_coupon(input))?;
    Ok((StatusCode::CREATED, Json(coupon)))
}

#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
    Json(patch): Json<CouponPatch>,
) -> Result<Json<Coupon>> {
    Ok(Json(state.write(|store| store.update_coupon(&id, patch))?))
}

#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CouponId>,
) -> Result<StatusCode> {
    state.write(|store| store.delete_coupon(&id))?;
    Ok(StatusCode::NO_CONTENT)
}
