//! Read-only queries over a seed catalog.

use std::path::Path;

use serde::de::DeserializeOwned;
use threadline_core::CatalogStore;
use threadline_core::store::ShippingPolicy;
use threadline_storefront::routes::products::ListingParams;
use threadline_storefront::seed::load_seed;

use crate::ProductArgs;

async fn load_store(seed: Option<&Path>) -> Result<CatalogStore, Box<dyn std::error::Error>> {
    let seed = load_seed(seed).await?;
    Ok(CatalogStore::from_seed(seed, ShippingPolicy::default()))
}

/// Parse a CLI word with the same spelling the HTTP API accepts.
fn parse_keyword<T: DeserializeOwned>(
    flag: &str,
    value: Option<String>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    value
        .map(|v| {
            serde_json::from_value(serde_json::Value::String(v.clone()))
                .map_err(|_| format!("invalid --{flag}: {v}").into())
        })
        .transpose()
}

/// Print one page of products matching the filters as JSON.
///
/// # Errors
///
/// Returns an error if the seed cannot be loaded or a flag is invalid.
pub async fn products(args: ProductArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(args.seed.as_deref()).await?;
    let params = ListingParams {
        search: args.search,
        category: args.category,
        sub_category: args.sub_category,
        min_price: args.min_price,
        max_price: args.max_price,
        sizes: args.sizes,
        colors: args.colors,
        sort: parse_keyword("sort", args.sort)?,
        order: parse_keyword("order", args.order)?,
        page: Some(args.page),
        page_size: Some(args.page_size),
    };
    let query = params.into_query(args.page_size)?;
    let page = store.product_page(&query);
    tracing::info!(
        total_items = page.total_items,
        page = page.page,
        total_pages = page.total_pages,
        "Products matched"
    );

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&page)?);
    }
    Ok(())
}

/// Print the dashboard summary as JSON.
///
/// # Errors
///
/// Returns an error if the seed cannot be loaded.
pub async fn dashboard(seed: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(seed).await?;
    let summary = store.dashboard_summary();

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use threadline_core::store::{SortKey, SortOrder};

    use super::*;

    #[test]
    fn test_parse_keyword_matches_api_spelling() {
        let key: Option<SortKey> = parse_keyword("sort", Some("createdAt".to_string())).unwrap();
        assert_eq!(key, Some(SortKey::CreatedAt));
        let order: Option<SortOrder> = parse_keyword("order", Some("asc".to_string())).unwrap();
        assert_eq!(order, Some(SortOrder::Asc));
        assert!(parse_keyword::<SortKey>("sort", Some("popularity".to_string())).is_err());
        assert_eq!(parse_keyword::<SortKey>("sort", None).unwrap(), None);
    }
}
