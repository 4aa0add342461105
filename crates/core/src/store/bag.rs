//! Cart and wishlist mutations.

use chrono::Utc;
use tracing::debug;

use super::CatalogStore;
use crate::error::{EntityKind, Result, StoreError};
use crate::types::price::checked_sum;
use crate::types::{
    CartItem, CartItemId, CartItemPatch, NewCartItem, NewWishlistItem, Product, ProductId,
    WishlistItem, WishlistItemId,
};

impl CatalogStore {
    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub fn get_cart_item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.cart.iter().find(|item| &item.id == id)
    }

    /// Pair each cart line with its product, if it still exists.
    #[must_use]
    pub fn cart_lines_with_products(&self) -> Vec<(&CartItem, Option<&Product>)> {
        self.cart
            .iter()
            .map(|item| (item, self.get_product_by_id(&item.product_id)))
            .collect()
    }

    /// Add a cart line from caller-provided snapshot fields.
    ///
    /// Every call creates a new line, even for a product and variant that is
    /// already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a zero quantity, a quantity above
    /// the stock snapshot, a blank name, or a line that would push the cart
    /// total or item count out of range.
    pub fn add_to_cart(&mut self, input: NewCartItem) -> Result<CartItem> {
        let item = input.into_cart_item()?;
        self.ensure_cart_in_range(None, &item)?;
        debug!(cart_item_id = %item.id, product_id = %item.product_id, "cart line added");
        self.cart.push(item.clone());
        Ok(item)
    }

    /// Add a cart line for a catalog product, snapshotting its display fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown product and
    /// `StoreError::Validation` if the variant is not offered or the quantity
    /// is out of range.
    pub fn add_product_to_cart(
        &mut self,
        product_id: &ProductId,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<CartItem> {
        let product = self
            .get_product_by_id(product_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, product_id))?;
        if !product.offers_size(size) {
            return Err(StoreError::validation(format!(
                "size {size} is not offered for {}",
                product.name
            )));
        }
        if !product.offers_color(color) {
            return Err(StoreError::validation(format!(
                "color {color} is not offered for {}",
                product.name
            )));
        }
        if product.stock == 0 {
            return Err(StoreError::validation(format!(
                "{} is out of stock",
                product.name
            )));
        }
        let input = NewCartItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.thumbnail().map(ToString::to_string),
            size: size.to_string(),
            color: color.to_string(),
            quantity,
            stock: product.stock,
        };
        self.add_to_cart(input)
    }

    /// Change a cart line's quantity or variant.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown line and
    /// `StoreError::Validation` for an out-of-range quantity, or a size or
    /// color the product does not offer. Only the fields the patch sets are
    /// checked against the product, and lines whose product has been deleted
    /// only get the quantity check.
    pub fn update_cart_item(&mut self, id: &CartItemId, patch: CartItemPatch) -> Result<CartItem> {
        let current = self
            .get_cart_item(id)
            .ok_or_else(|| StoreError::not_found(EntityKind::CartItem, id))?;
        let (new_size, new_color) = (patch.size.is_some(), patch.color.is_some());
        let updated = patch.apply(current)?;
        if let Some(product) = self.get_product_by_id(&updated.product_id) {
            if new_size && !product.offers_size(&updated.size) {
                return Err(StoreError::validation(format!(
                    "size {} is not offered for {}",
                    updated.size, product.name
                )));
            }
            if new_color && !product.offers_color(&updated.color) {
                return Err(StoreError::validation(format!(
                    "color {} is not offered for {}",
                    updated.color, product.name
                )));
            }
        }
        self.ensure_cart_in_range(Some(id), &updated)?;
        if let Some(slot) = self.cart.iter_mut().find(|item| &item.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Check that the cart, with `line` added (or replacing the line with ID
    /// `replaced`), still has a representable total and item count.
    fn ensure_cart_in_range(&self, replaced: Option<&CartItemId>, line: &CartItem) -> Result<()> {
        let others = self
            .cart
            .iter()
            .filter(|item| replaced.is_none_or(|id| &item.id != id));
        let total = checked_sum(
            others
                .clone()
                .map(CartItem::line_total)
                .chain(std::iter::once(line.line_total())),
        );
        let count = others
            .map(|item| item.quantity)
            .try_fold(line.quantity, u32::checked_add);
        if total.is_none() || count.is_none() {
            return Err(StoreError::validation("cart total is out of range"));
        }
        Ok(())
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the line does not exist.
    pub fn remove_from_cart(&mut self, id: &CartItemId) -> Result<CartItem> {
        let index = self
            .cart
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::CartItem, id))?;
        Ok(self.cart.remove(index))
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.iter().any(|item| &item.product_id == product_id)
    }

    /// Add a wishlist entry.
    ///
    /// A product appears at most once: adding a product that is already
    /// wishlisted returns the existing entry unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name.
    pub fn add_to_wishlist(&mut self, input: NewWishlistItem) -> Result<WishlistItem> {
        if let Some(existing) = self
            .wishlist
            .iter()
            .find(|item| item.product_id == input.product_id)
        {
            return Ok(existing.clone());
        }
        let item = input.into_wishlist_item(Utc::now())?;
        debug!(wishlist_item_id = %item.id, product_id = %item.product_id, "wishlist entry added");
        self.wishlist.push(item.clone());
        Ok(item)
    }

    /// Wishlist a catalog product, snapshotting its display fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown product.
    pub fn add_product_to_wishlist(&mut self, product_id: &ProductId) -> Result<WishlistItem> {
        let product = self
            .get_product_by_id(product_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, product_id))?;
        let input = NewWishlistItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            image: product.thumbnail().map(ToString::to_string),
        };
        self.add_to_wishlist(input)
    }

    /// Remove a wishlist entry by its own ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the entry does not exist.
    pub fn remove_from_wishlist(&mut self, id: &WishlistItemId) -> Result<WishlistItem> {
        let index = self
            .wishlist
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::WishlistItem, id))?;
        Ok(self.wishlist.remove(index))
    }

    /// Remove the wishlist entry for a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product is not wishlisted.
    pub fn remove_from_wishlist_by_product_id(
        &mut self,
        product_id: &ProductId,
    ) -> Result<WishlistItem> {
        let index = self
            .wishlist
            .iter()
            .position(|item| &item.product_id == product_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::WishlistItem, product_id))?;
        Ok(self.wishlist.remove(index))
    }

    pub fn clear_wishlist(&mut self) {
        self.wishlist.clear();
    }
}
