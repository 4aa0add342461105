//! Product entity and its create/update inputs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use crate::error::{Result, StoreError, require_non_blank};

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    /// Pre-discount reference price, usually higher than `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub is_best: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether the product offers `size`. Products listing no sizes accept any.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.is_empty() || self.sizes.iter().any(|s| s == size)
    }

    /// Whether the product offers `color`. Products listing no colors accept any.
    #[must_use]
    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.is_empty() || self.colors.iter().any(|c| c == color)
    }

    /// First image, used as the thumbnail when snapshotting into cart lines.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    fn validate(&self) -> Result<()> {
        validate_fields(
            &self.name,
            &self.category,
            self.price,
            self.original_price,
            self.rating,
        )
    }
}

/// Input for creating a product. The store assigns the ID and timestamps.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub category: String,
    #[serde(default)]
    pub sub_category: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default)]
    pub is_best: bool,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewProduct {
    /// Validate and turn the input into a product stamped at `now`.
    pub(crate) fn into_product(self, now: DateTime<Utc>) -> Result<Product> {
        let product = Product {
            id: ProductId::generate(),
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            original_price: self.original_price,
            category: self.category,
            sub_category: self.sub_category.filter(|s| !s.is_empty()),
            images: self.images,
            sizes: self.sizes,
            colors: self.colors,
            stock: self.stock,
            is_new: self.is_new,
            is_sale: self.is_sale,
            is_best: self.is_best,
            rating: self.rating,
            review_count: self.review_count,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        };
        product.validate()?;
        Ok(product)
    }
}

/// Partial update for a product. Absent fields are left unchanged.
///
/// `originalPrice` and `subCategory` distinguish "absent" from an explicit
/// `null`, which clears the value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub original_price: Option<Option<Decimal>>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub sub_category: Option<Option<String>>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub stock: Option<u32>,
    pub is_new: Option<bool>,
    pub is_sale: Option<bool>,
    pub is_best: Option<bool>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub tags: Option<Vec<String>>,
}

impl ProductPatch {
    /// Apply the patch to a copy of `product`, validate it, and stamp `now`.
    ///
    /// The original is untouched when validation fails.
    pub(crate) fn apply(self, product: &Product, now: DateTime<Utc>) -> Result<Product> {
        let mut next = product.clone();
        if let Some(name) = self.name {
            next.name = name.trim().to_string();
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(price) = self.price {
            next.price = price;
        }
        if let Some(original_price) = self.original_price {
            next.original_price = original_price;
        }
        if let Some(category) = self.category {
            next.category = category;
        }
        if let Some(sub_category) = self.sub_category {
            next.sub_category = sub_category.filter(|s| !s.is_empty());
        }
        if let Some(images) = self.images {
            next.images = images;
        }
        if let Some(sizes) = self.sizes {
            next.sizes = sizes;
        }
        if let Some(colors) = self.colors {
            next.colors = colors;
        }
        if let Some(stock) = self.stock {
            next.stock = stock;
        }
        if let Some(is_new) = self.is_new {
            next.is_new = is_new;
        }
        if let Some(is_sale) = self.is_sale {
            next.is_sale = is_sale;
        }
        if let Some(is_best) = self.is_best {
            next.is_best = is_best;
        }
        if let Some(rating) = self.rating {
            next.rating = rating;
        }
        if let Some(review_count) = self.review_count {
            next.review_count = review_count;
        }
        if let Some(tags) = self.tags {
            next.tags = tags;
        }
        next.validate()?;
        next.updated_at = now;
        Ok(next)
    }
}

fn validate_fields(
    name: &str,
    category: &str,
    price: Decimal,
    original_price: Option<Decimal>,
    rating: f64,
) -> Result<()> {
    require_non_blank("name", name)?;
    require_non_blank("category", category)?;
    if price < Decimal::ZERO {
        return Err(StoreError::validation("price must not be negative"));
    }
    if original_price.is_some_and(|p| p < Decimal::ZERO) {
        return Err(StoreError::validation("originalPrice must not be negative"));
    }
    if !(0.0..=MAX_RATING).contains(&rating) {
        return Err(StoreError::validation("rating must be between 0 and 5"));
    }
    Ok(())
}
