//! Product and category mutations.

use chrono::Utc;
use tracing::debug;

use super::CatalogStore;
use crate::error::{EntityKind, Result, StoreError};
use crate::types::{
    Category, CategoryId, CategoryPatch, NewCategory, NewProduct, NewSubCategory, Product,
    ProductId, ProductPatch, SubCategory, SubCategoryId,
};

impl CatalogStore {
    // =========================================================================
    // Products
    // =========================================================================

    #[must_use]
    pub fn get_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Add a product with a fresh ID and timestamps.
    ///
    /// Duplicate names are allowed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if required fields are missing or out
    /// of range.
    pub fn add_product(&mut self, input: NewProduct) -> Result<Product> {
        let product = input.into_product(Utc::now())?;
        debug!(product_id = %product.id, name = %product.name, "product added");
        self.products.push(product.clone());
        Ok(product)
    }

    /// Merge `patch` into the product and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist, or
    /// `StoreError::Validation` if the merged product would be invalid.
    pub fn update_product(&mut self, id: &ProductId, patch: ProductPatch) -> Result<Product> {
        let slot = self
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        let updated = patch.apply(slot, Utc::now())?;
        *slot = updated.clone();
        debug!(product_id = %id, "product updated");
        Ok(updated)
    }

    /// Remove a product. Orders, cart lines and wishlist entries referring to
    /// it are left alone.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the product does not exist; state is
    /// unchanged in that case.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Product, id))?;
        debug!(product_id = %id, "product deleted");
        Ok(self.products.remove(index))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    #[must_use]
    pub fn get_category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn get_category_by_slug(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// Categories with `is_active` set, in insertion order.
    pub fn active_categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.is_active)
    }

    fn ensure_slug_free(&self, slug: &str, except: Option<&CategoryId>) -> Result<()> {
        let taken = self
            .categories
            .iter()
            .any(|c| c.slug == slug && Some(&c.id) != except);
        if taken {
            return Err(StoreError::Conflict(format!(
                "category slug already in use: {slug}"
            )));
        }
        Ok(())
    }

    fn category_mut(&mut self, id: &CategoryId) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))
    }

    /// Add a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank name or malformed slug,
    /// and `StoreError::Conflict` if the slug is taken.
    pub fn add_category(&mut self, input: NewCategory) -> Result<Category> {
        let category = input.into_category(Utc::now())?;
        self.ensure_slug_free(&category.slug, None)?;
        debug!(category_id = %category.id, slug = %category.slug, "category added");
        self.categories.push(category.clone());
        Ok(category)
    }

    /// Merge `patch` into the category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Validation`, or
    /// `StoreError::Conflict` when the new slug is taken.
    pub fn update_category(&mut self, id: &CategoryId, patch: CategoryPatch) -> Result<Category> {
        if self.get_category_by_id(id).is_none() {
            return Err(StoreError::not_found(EntityKind::Category, id));
        }
        if let Some(slug) = &patch.slug {
            self.ensure_slug_free(slug, Some(id))?;
        }
        let slot = self.category_mut(id)?;
        let updated = patch.apply(slot, Utc::now())?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Toggle a category's visibility without deleting it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the category does not exist.
    pub fn set_category_active(&mut self, id: &CategoryId, is_active: bool) -> Result<Category> {
        let slot = self.category_mut(id)?;
        slot.is_active = is_active;
        slot.updated_at = Utc::now();
        Ok(slot.clone())
    }

    /// Remove a category. Products keep their category strings.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the category does not exist.
    pub fn delete_category(&mut self, id: &CategoryId) -> Result<Category> {
        let index = self
            .categories
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Category, id))?;
        Ok(self.categories.remove(index))
    }

    /// Append a sub-category to a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Validation`, or
    /// `StoreError::Conflict` if the slug is already used in this category.
    pub fn add_sub_category(
        &mut self,
        id: &CategoryId,
        input: NewSubCategory,
    ) -> Result<SubCategory> {
        let sub = input.into_sub_category()?;
        let category = self.category_mut(id)?;
        if category.sub_categories.iter().any(|s| s.slug == sub.slug) {
            return Err(StoreError::Conflict(format!(
                "sub-category slug already in use: {}",
                sub.slug
            )));
        }
        category.sub_categories.push(sub.clone());
        category.updated_at = Utc::now();
        Ok(sub)
    }

    /// Remove a sub-category from a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if either the category or the
    /// sub-category does not exist.
    pub fn remove_sub_category(
        &mut self,
        id: &CategoryId,
        sub_id: &SubCategoryId,
    ) -> Result<SubCategory> {
        let category = self.category_mut(id)?;
        let index = category
            .sub_categories
            .iter()
            .position(|s| &s.id == sub_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::SubCategory, sub_id))?;
        category.updated_at = Utc::now();
        Ok(category.sub_categories.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn jacket() -> NewProduct {
        NewProduct {
            name: "Chore Jacket".to_string(),
            description: "Cotton twill".to_string(),
            price: Decimal::from(89_000),
            category: "outerwear".to_string(),
            tags: vec!["workwear".to_string()],
            ..NewProduct::default()
        }
    }

    fn outerwear() -> NewCategory {
        NewCategory {
            name: "Outerwear".to_string(),
            slug: "outerwear".to_string(),
            description: String::new(),
            image: None,
            is_active: true,
            sub_categories: Vec::new(),
        }
    }

    #[test]
    fn test_added_product_is_retrievable_and_listed() {
        let mut store = CatalogStore::new();
        let product = store.add_product(jacket()).expect("valid product");

        let found = store.get_product_by_id(&product.id).expect("present");
        assert_eq!(found, &product);
        assert_eq!(found.name, "Chore Jacket");
        assert!(store.filtered_products().iter().any(|p| p.id == product.id));
    }

    #[test]
    fn test_duplicate_names_are_allowed() {
        let mut store = CatalogStore::new();
        store.add_product(jacket()).expect("first");
        store.add_product(jacket()).expect("second");
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn test_update_refreshes_updated_at() {
        let mut store = CatalogStore::new();
        let product = store.add_product(jacket()).expect("valid product");
        let patch = ProductPatch {
            price: Some(Decimal::from(79_000)),
            ..ProductPatch::default()
        };
        let updated = store.update_product(&product.id, patch).expect("exists");
        assert_eq!(updated.price, Decimal::from(79_000));
        assert_eq!(updated.created_at, product.created_at);
        assert!(updated.updated_at >= product.updated_at);
    }

    #[test]
    fn test_invalid_update_leaves_product_untouched() {
        let mut store = CatalogStore::new();
        let product = store.add_product(jacket()).expect("valid product");
        let patch = ProductPatch {
            name: Some(String::new()),
            ..ProductPatch::default()
        };
        assert!(store.update_product(&product.id, patch).is_err());
        assert_eq!(store.get_product_by_id(&product.id), Some(&product));
    }

    #[test]
    fn test_update_missing_product_is_not_found() {
        let mut store = CatalogStore::new();
        let err = store
            .update_product(&ProductId::new("nope"), ProductPatch::default())
            .expect_err("missing");
        assert!(matches!(
            err,
            StoreError::NotFound {
                entity: EntityKind::Product,
                ..
            }
        ));
    }

    #[test]
    fn test_delete_twice_has_same_effect_as_once() {
        let mut store = CatalogStore::new();
        let keep = store.add_product(jacket()).expect("keep");
        let gone = store.add_product(jacket()).expect("gone");

        store.delete_product(&gone.id).expect("first delete");
        let after_once = store.products().to_vec();
        assert!(store.delete_product(&gone.id).is_err());
        assert_eq!(store.products(), after_once.as_slice());
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products()[0].id, keep.id);
    }

    #[test]
    fn test_category_slug_must_be_unique() {
        let mut store = CatalogStore::new();
        store.add_category(outerwear()).expect("first");
        assert!(matches!(
            store.add_category(outerwear()),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn test_category_update_keeps_own_slug() {
        let mut store = CatalogStore::new();
        let category = store.add_category(outerwear()).expect("valid");
        let patch = CategoryPatch {
            slug: Some("outerwear".to_string()),
            description: Some("Coats and jackets".to_string()),
            ..CategoryPatch::default()
        };
        let updated = store.update_category(&category.id, patch).expect("valid");
        assert_eq!(updated.description, "Coats and jackets");
    }

    #[test]
    fn test_update_missing_category_is_not_found_even_with_taken_slug() {
        let mut store = CatalogStore::new();
        store.add_category(outerwear()).expect("valid");
        let patch = CategoryPatch {
            slug: Some("outerwear".to_string()),
            ..CategoryPatch::default()
        };
        let err = store
            .update_category(&CategoryId::new("c-missing"), patch)
            .expect_err("missing");
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_deactivate_and_lookup_by_slug() {
        let mut store = CatalogStore::new();
        let category = store.add_category(outerwear()).expect("valid");
        store
            .set_category_active(&category.id, false)
            .expect("exists");
        assert_eq!(store.active_categories().count(), 0);
        let found = store.get_category_by_slug("outerwear").expect("present");
        assert!(!found.is_active);
    }

    #[test]
    fn test_sub_category_lifecycle() {
        let mut store = CatalogStore::new();
        let category = store.add_category(outerwear()).expect("valid");
        let sub = store
            .add_sub_category(
                &category.id,
                NewSubCategory {
                    name: "Parkas".to_string(),
                    slug: "parkas".to_string(),
                    description: String::new(),
                },
            )
            .expect("valid");
        assert_eq!(
            store
                .get_category_by_id(&category.id)
                .map(|c| c.sub_categories.len()),
            Some(1)
        );
        store
            .remove_sub_category(&category.id, &sub.id)
            .expect("exists");
        assert!(store.remove_sub_category(&category.id, &sub.id).is_err());
    }

    #[test]
    fn test_deleting_category_keeps_products() {
        let mut store = CatalogStore::new();
        let category = store.add_category(outerwear()).expect("valid");
        store.add_product(jacket()).expect("valid");
        store.delete_category(&category.id).expect("exists");
        assert_eq!(store.category_names(), ["outerwear"]);
    }
}
