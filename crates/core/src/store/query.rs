//! Product query pipeline: search, facet filters, sorting and pagination.
//!
//! Every function here is pure. Callers pass the product slice and a
//! [`ProductQuery`] and get a fresh view back; nothing is cached between
//! calls, so a view always reflects the state it was computed from.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{PriceRange, Product};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Field the product listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    Price,
    Rating,
    #[default]
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter, sort and pagination parameters for the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Case-insensitive substring matched against name, description and tags.
    pub search_term: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub price_range: Option<PriceRange>,
    /// A product matches if it offers any of these sizes.
    pub sizes: Vec<String>,
    /// A product matches if it offers any of these colors.
    pub colors: Vec<String>,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    /// One-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: None,
            sub_category: None,
            price_range: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ProductQuery {
    /// Whether `product` passes every active filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self
                .category
                .as_deref()
                .is_none_or(|category| product.category == category)
            && self
                .sub_category
                .as_deref()
                .is_none_or(|sub| product.sub_category.as_deref() == Some(sub))
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
            && any_selected(&self.sizes, &product.sizes)
            && any_selected(&self.colors, &product.colors)
    }

    fn matches_search(&self, product: &Product) -> bool {
        let term = self.search_term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        product.name.to_lowercase().contains(&term)
            || product.description.to_lowercase().contains(&term)
            || product
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// OR semantics: an empty selection passes everything.
fn any_selected(selected: &[String], offered: &[String]) -> bool {
    selected.is_empty() || offered.iter().any(|value| selected.contains(value))
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Stable sort by `key` in `order`. Ties keep their existing relative order.
pub fn sort_products(products: &mut [&Product], key: SortKey, order: SortOrder) {
    match order {
        SortOrder::Asc => products.sort_by(|a, b| compare(a, b, key)),
        SortOrder::Desc => products.sort_by(|a, b| compare(b, a, key)),
    }
}

/// Products passing every filter of `query`, sorted as configured.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &ProductQuery) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| query.matches(p)).collect();
    sort_products(&mut matched, query.sort_key, query.sort_order);
    matched
}

/// Number of pages needed for `total_items`. Zero items means zero pages.
#[must_use]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a one-based page number into `[1, max(1, total_pages)]`.
#[must_use]
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The slice `[(page - 1) * page_size, page * page_size)` of `items`.
///
/// Pages past the end yield an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or_default()
}

/// A page of results with its position in the full listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Convert the items, keeping the position fields.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Filter, sort and paginate `products` in one pass.
///
/// The requested page is clamped into range so the result never points past
/// the end of the listing.
#[must_use]
pub fn query_products<'a>(products: &'a [Product], query: &ProductQuery) -> Page<&'a Product> {
    let filtered = filter_products(products, query);
    let total_items = filtered.len();
    let pages = total_pages(total_items, query.page_size);
    let page = clamp_page(query.page, pages);
    let page_size = query.page_size.max(1);
    Page {
        items: paginate(&filtered, page, page_size).to_vec(),
        page,
        page_size,
        total_items,
        total_pages: pages,
    }
}

/// Distinct category names present in `products`, sorted.
#[must_use]
pub fn category_names(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct sub-categories among products in `category`, sorted.
///
/// Empty when no category is given.
#[must_use]
pub fn sub_categories(products: &[Product], category: Option<&str>) -> Vec<String> {
    let Some(category) = category else {
        return Vec::new();
    };
    products
        .iter()
        .filter(|p| p.category == category)
        .filter_map(|p| p.sub_category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
