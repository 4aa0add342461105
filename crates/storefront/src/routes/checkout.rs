//! Checkout and coupon preview.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use threadline_core::{Checkout, Order};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Turn the cart into a pending order. The cart is cleared on success only.
#[instrument(skip(state, checkout), fields(user_id = %checkout.user_id))]
pub async fn place_order(
    State(state): State<AppState>,
    Json(checkout): Json<Checkout>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = state.write_bag(|store| store.place_order(checkout))?;
    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize)]
pub struct CouponRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPreview {
    pub code: String,
    pub subtotal: Decimal,
    pub discount: Decimal,
}

/// Discount a coupon would grant on the current cart.
#[instrument(skip(state))]
pub async fn preview_coupon(
    State(state): State<AppState>,
    Json(body): Json<CouponRequest>,
) -> Result<Json<CouponPreview>> {
    let preview = state.read(|store| {
        let subtotal = store.cart_total();
        store
            .apply_coupon(&body.code, subtotal, Utc::now())
            .map(|discount| CouponPreview {
                code: threadline_core::types::coupon::normalize_code(&body.code),
                subtotal,
                discount,
            })
    })?;
    Ok(Json(preview))
}
