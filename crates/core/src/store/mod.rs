//! The catalog store.
//!
//! [`CatalogStore`] is the single source of truth for products, orders,
//! categories, coupons, cart lines and wishlist entries. It also holds the
//! current listing parameters (search, facets, sort, page) and computes every
//! derived view on demand from current state.
//!
//! The store is synchronous and not internally synchronized. A multi-user
//! service wraps one instance in a lock (see the storefront's `AppState`).
//!
//! # Submodules
//!
//! - [`query`] - Pure filter/sort/paginate pipeline over a product slice
//! - [`aggregate`] - Cart totals, order totals and dashboard summary
//!
//! Mutations are grouped by collection: products and categories, orders and
//! coupons, then cart and wishlist.

pub mod aggregate;
pub mod query;

mod bag;
mod catalog;
mod orders;

use rust_decimal::Decimal;

use crate::error::{Result, StoreError};
use crate::seed::SeedCatalog;
use crate::snapshot::BagSnapshot;
use crate::types::{
    CartItem, Category, Coupon, Order, PriceRange, Product, WishlistItem,
};

pub use aggregate::{DashboardSummary, OrderTotals, ShippingPolicy};
pub use query::{Page, ProductQuery, SortKey, SortOrder};

/// In-memory store for the catalog, order book, cart and wishlist.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    orders: Vec<Order>,
    categories: Vec<Category>,
    coupons: Vec<Coupon>,
    cart: Vec<CartItem>,
    wishlist: Vec<WishlistItem>,
    query: ProductQuery,
    shipping: ShippingPolicy,
}

impl CatalogStore {
    /// Create an empty store with the default shipping policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shipping fee table used for order totals.
    #[must_use]
    pub fn with_shipping_policy(mut self, shipping: ShippingPolicy) -> Self {
        self.shipping = shipping;
        self
    }

    /// Build a store pre-populated from `seed`, with an empty cart and
    /// wishlist.
    #[must_use]
    pub fn from_seed(seed: SeedCatalog, shipping: ShippingPolicy) -> Self {
        tracing::info!(
            products = seed.products.len(),
            categories = seed.categories.len(),
            orders = seed.orders.len(),
            coupons = seed.coupons.len(),
            "catalog seeded"
        );
        Self {
            products: seed.products,
            orders: seed.orders,
            categories: seed.categories,
            coupons: seed.coupons,
            shipping,
            ..Self::default()
        }
    }

    /// Replace the cart and wishlist with a persisted snapshot.
    pub fn hydrate(&mut self, snapshot: BagSnapshot) {
        self.cart = snapshot.cart;
        self.wishlist = snapshot.wishlist;
    }

    /// Copy of the cart and wishlist, for persistence.
    #[must_use]
    pub fn bag_snapshot(&self) -> BagSnapshot {
        BagSnapshot {
            wishlist: self.wishlist.clone(),
            cart: self.cart.clone(),
        }
    }

    // =========================================================================
    // Collections
    // =========================================================================

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    #[must_use]
    pub fn wishlist(&self) -> &[WishlistItem] {
        &self.wishlist
    }

    #[must_use]
    pub const fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    // =========================================================================
    // Listing Parameters
    // =========================================================================

    /// Current listing parameters.
    #[must_use]
    pub const fn query(&self) -> &ProductQuery {
        &self.query
    }

    /// Change a filter and go back to the first page.
    fn refilter(&mut self, change: impl FnOnce(&mut ProductQuery)) {
        change(&mut self.query);
        self.query.page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        self.refilter(|q| q.search_term = term);
    }

    /// Select a category. The sub-category selection is cleared because it
    /// belongs to the previous category.
    pub fn set_category(&mut self, category: Option<String>) {
        self.refilter(|q| {
            q.category = category;
            q.sub_category = None;
        });
    }

    pub fn set_sub_category(&mut self, sub_category: Option<String>) {
        self.refilter(|q| q.sub_category = sub_category);
    }

    pub fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.refilter(|q| q.price_range = range);
    }

    pub fn set_selected_sizes(&mut self, sizes: Vec<String>) {
        self.refilter(|q| q.sizes = sizes);
    }

    pub fn set_selected_colors(&mut self, colors: Vec<String>) {
        self.refilter(|q| q.colors = colors);
    }

    pub fn set_sort(&mut self, key: SortKey, order: SortOrder) {
        self.refilter(|q| {
            q.sort_key = key;
            q.sort_order = order;
        });
    }

    /// Change the page size.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `page_size` is zero.
    pub fn set_items_per_page(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(StoreError::validation("items per page must be at least 1"));
        }
        self.refilter(|q| q.page_size = page_size);
        Ok(())
    }

    /// Move to `page`, clamped into the available range. Returns the page
    /// actually selected.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.query.page = query::clamp_page(page, self.total_pages());
        self.query.page
    }

    /// Clear every filter and the search term, keeping sort and page size.
    pub fn reset_filters(&mut self) {
        self.refilter(|q| {
            *q = ProductQuery {
                sort_key: q.sort_key,
                sort_order: q.sort_order,
                page_size: q.page_size,
                ..ProductQuery::default()
            };
        });
    }

    /// Current one-based page, clamped against the current listing.
    ///
    /// Deleting products can shrink the listing under a stored page number;
    /// reads always see a page in `[1, max(1, total_pages)]`.
    #[must_use]
    pub fn current_page(&self) -> usize {
        query::clamp_page(self.query.page, self.total_pages())
    }

    // =========================================================================
    // Derived Views
    // =========================================================================

    /// Products matching the current filters, sorted as configured.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<&Product> {
        query::filter_products(&self.products, &self.query)
    }

    /// The current page of [`filtered_products`](Self::filtered_products).
    #[must_use]
    pub fn paginated_products(&self) -> Vec<&Product> {
        let filtered = self.filtered_products();
        let page = query::clamp_page(
            self.query.page,
            query::total_pages(filtered.len(), self.query.page_size),
        );
        query::paginate(&filtered, page, self.query.page_size).to_vec()
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        query::total_pages(self.filtered_products().len(), self.query.page_size)
    }

    /// Run an ad-hoc query without touching the stored parameters.
    #[must_use]
    pub fn product_page(&self, query: &ProductQuery) -> Page<&Product> {
        query::query_products(&self.products, query)
    }

    /// Distinct categories present in the product collection.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        query::category_names(&self.products)
    }

    /// Distinct sub-categories of the selected category.
    #[must_use]
    pub fn sub_categories(&self) -> Vec<String> {
        query::sub_categories(&self.products, self.query.category.as_deref())
    }

    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        aggregate::cart_total(&self.cart)
    }

    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        aggregate::cart_item_count(&self.cart)
    }

    #[must_use]
    pub fn wishlist_count(&self) -> usize {
        aggregate::wishlist_count(&self.wishlist)
    }

    #[must_use]
    pub fn dashboard_summary(&self) -> DashboardSummary {
        aggregate::dashboard_summary(&self.products, &self.orders)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::NewProduct;

    fn add(store: &mut CatalogStore, name: &str, price: i64, sizes: &[&str]) -> Product {
        store
            .add_product(NewProduct {
                name: name.to_string(),
                price: Decimal::from(price),
                category: "tops".to_string(),
                sizes: sizes.iter().map(ToString::to_string).collect(),
                ..NewProduct::default()
            })
            .expect("valid product")
    }

    #[test]
    fn test_price_range_scenario() {
        let mut store = CatalogStore::new();
        add(&mut store, "Tee", 10_000, &[]);
        let mid = add(&mut store, "Shirt", 50_000, &[]);
        let high = add(&mut store, "Coat", 90_000, &[]);

        store.set_price_range(Some(PriceRange::new(
            Decimal::from(20_000),
            Decimal::from(100_000),
        )));

        let mut ids: Vec<_> = store.filtered_products().iter().map(|p| p.id.clone()).collect();
        ids.sort();
        let mut expected = vec![mid.id, high.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_size_or_match_scenario() {
        let mut store = CatalogStore::new();
        let tee = add(&mut store, "Tee", 10_000, &["S", "M"]);
        store.set_selected_sizes(vec!["M".to_string(), "L".to_string()]);
        assert_eq!(store.filtered_products().len(), 1);
        assert_eq!(store.filtered_products()[0].id, tee.id);
    }

    #[test]
    fn test_pagination_scenario() {
        let mut store = CatalogStore::new();
        store.set_items_per_page(2).expect("valid page size");
        for i in 0..5 {
            add(&mut store, &format!("Item {i}"), 1_000, &[]);
        }
        assert_eq!(store.total_pages(), 3);
        assert_eq!(store.paginated_products().len(), 2);

        assert_eq!(store.set_page(3), 3);
        assert_eq!(store.paginated_products().len(), 1);

        assert_eq!(store.set_page(10), 3);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut store = CatalogStore::new();
        store.set_items_per_page(1).expect("valid page size");
        for i in 0..3 {
            add(&mut store, &format!("Item {i}"), 1_000, &[]);
        }
        store.set_page(3);
        store.set_search_term("item");
        assert_eq!(store.current_page(), 1);
    }

    #[test]
    fn test_current_page_clamps_after_delete() {
        let mut store = CatalogStore::new();
        store.set_items_per_page(1).expect("valid page size");
        let a = add(&mut store, "A", 1, &[]);
        let b = add(&mut store, "B", 1, &[]);
        store.set_page(2);
        store.delete_product(&a.id).expect("exists");
        store.delete_product(&b.id).expect("exists");
        assert_eq!(store.current_page(), 1);
        assert!(store.paginated_products().is_empty());
    }

    #[test]
    fn test_category_change_clears_sub_category() {
        let mut store = CatalogStore::new();
        store.set_category(Some("tops".to_string()));
        store.set_sub_category(Some("shirts".to_string()));
        store.set_category(Some("bottoms".to_string()));
        assert_eq!(store.query().sub_category, None);
    }

    #[test]
    fn test_reset_filters_keeps_sort_and_page_size() {
        let mut store = CatalogStore::new();
        store.set_items_per_page(5).expect("valid page size");
        store.set_sort(SortKey::Price, SortOrder::Asc);
        store.set_search_term("coat");
        store.reset_filters();
        assert_eq!(store.query().search_term, "");
        assert_eq!(store.query().page_size, 5);
        assert_eq!(store.query().sort_key, SortKey::Price);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut store = CatalogStore::new();
        assert!(store.set_items_per_page(0).is_err());
        assert_eq!(store.query().page_size, query::DEFAULT_PAGE_SIZE);
    }
}
