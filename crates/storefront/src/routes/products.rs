//! Product listing and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use threadline_core::store::{Page, ProductQuery, SortKey, SortOrder};
use threadline_core::{PriceRange, Product, ProductId};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Listing query parameters.
///
/// `sizes` and `colors` are comma-separated; a product matches if it offers
/// any of the listed values.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sizes: Option<String>,
    pub colors: Option<String>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ListingParams {
    /// Build the store query, filling gaps from defaults.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a zero page size or a negative price.
    pub fn into_query(self, default_page_size: usize) -> Result<ProductQuery> {
        let page_size = self.page_size.unwrap_or(default_page_size);
        if page_size == 0 {
            return Err(AppError::BadRequest("pageSize must be at least 1".to_string()));
        }
        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => {
                let min = min.unwrap_or(Decimal::ZERO);
                let max = max.unwrap_or(Decimal::MAX);
                if min < Decimal::ZERO || max < Decimal::ZERO {
                    return Err(AppError::BadRequest("prices must not be negative".to_string()));
                }
                Some(PriceRange::new(min, max))
            }
        };
        let defaults = ProductQuery::default();
        Ok(ProductQuery {
            search_term: self.search.unwrap_or_default(),
            category: non_blank(self.category),
            sub_category: non_blank(self.sub_category),
            price_range,
            sizes: split_list(self.sizes.as_deref()),
            colors: split_list(self.colors.as_deref()),
            sort_key: self.sort.unwrap_or(defaults.sort_key),
            sort_order: self.order.unwrap_or(defaults.sort_order),
            page: self.page.unwrap_or(1).max(1),
            page_size,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}

/// List products matching the query, one page at a time.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<Page<Product>>> {
    let query = params.into_query(state.config().page_size)?;
    let page = state.read(|store| store.product_page(&query).map(Product::clone));
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetParams {
    pub category: Option<String>,
}

/// Values for the listing's filter controls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub category_names: Vec<String>,
    pub sub_categories: Vec<String>,
}

/// Category names across the catalog, plus sub-categories of the given
/// category.
#[instrument(skip(state))]
pub async fn facets(
    State(state): State<AppState>,
    Query(params): Query<FacetParams>,
) -> Result<Json<Facets>> {
    let category = non_blank(params.category);
    let facets = state.read(|store| Facets {
        category_names: store.category_names(),
        sub_categories: threadline_core::store::query::sub_categories(
            store.products(),
            category.as_deref(),
        ),
    });
    Ok(Json(facets))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .read(|store| store.get_product_by_id(&id).cloned())
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_params_absent() {
        let query = ListingParams::default().into_query(12).expect("valid");
        assert_eq!(query, ProductQuery::default());
    }

    #[test]
    fn test_lists_are_comma_separated() {
        let params = ListingParams {
            sizes: Some("S, M,,L".to_string()),
            colors: Some("navy".to_string()),
            ..ListingParams::default()
        };
        let query = params.into_query(12).expect("valid");
        assert_eq!(query.sizes, ["S", "M", "L"]);
        assert_eq!(query.colors, ["navy"]);
    }

    #[test]
    fn test_open_ended_price_range() {
        let params = ListingParams {
            min_price: Some(Decimal::from(20_000)),
            ..ListingParams::default()
        };
        let range = params.into_query(12).expect("valid").price_range.expect("set");
        assert!(range.contains(Decimal::from(20_000)));
        assert!(range.contains(Decimal::from(900_000)));
        assert!(!range.contains(Decimal::from(19_999)));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let params = ListingParams {
            page_size: Some(0),
            ..ListingParams::default()
        };
        assert!(matches!(params.into_query(12), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_blank_category_is_ignored() {
        let params = ListingParams {
            category: Some("  ".to_string()),
            page: Some(0),
            ..ListingParams::default()
        };
        let query = params.into_query(12).expect("valid");
        assert_eq!(query.category, None);
        assert_eq!(query.page, 1);
    }
}
