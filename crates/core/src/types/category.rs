//! Category entities.
//!
//! Categories are configuration for navigation. Products reference categories
//! by name only, so nothing ties a product's `category` string to a row here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, SubCategoryId};
use crate::error::{Result, StoreError, require_non_blank};

/// A category with its ordered sub-categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// URL-safe unique key.
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A sub-category value object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

const fn default_active() -> bool {
    true
}

/// Input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub sub_categories: Vec<NewSubCategory>,
}

/// Input for creating a sub-category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Partial update for a category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub image: Option<Option<String>>,
    pub is_active: Option<bool>,
}

/// Whether `slug` is lowercase ASCII letters, digits and single inner dashes.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn require_slug(slug: &str) -> Result<()> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(StoreError::validation(format!(
            "slug must be lowercase letters, digits and dashes: {slug:?}"
        )))
    }
}

impl NewSubCategory {
    pub(crate) fn into_sub_category(self) -> Result<SubCategory> {
        require_non_blank("name", &self.name)?;
        require_slug(&self.slug)?;
        Ok(SubCategory {
            id: SubCategoryId::generate(),
            name: self.name.trim().to_string(),
            slug: self.slug,
            description: self.description,
        })
    }
}

impl NewCategory {
    pub(crate) fn into_category(self, now: DateTime<Utc>) -> Result<Category> {
        require_non_blank("name", &self.name)?;
        require_slug(&self.slug)?;
        let sub_categories = self
            .sub_categories
            .into_iter()
            .map(NewSubCategory::into_sub_category)
            .collect::<Result<Vec<_>>>()?;
        Ok(Category {
            id: CategoryId::generate(),
            name: self.name.trim().to_string(),
            slug: self.slug,
            description: self.description,
            image: self.image,
            is_active: self.is_active,
            sub_categories,
            created_at: now,
            updated_at: now,
        })
    }
}

impl CategoryPatch {
    pub(crate) fn apply(self, category: &Category, now: DateTime<Utc>) -> Result<Category> {
        let mut next = category.clone();
        if let Some(name) = self.name {
            require_non_blank("name", &name)?;
            next.name = name.trim().to_string();
        }
        if let Some(slug) = self.slug {
            require_slug(&slug)?;
            next.slug = slug;
        }
        if let Some(description) = self.description {
            next.description = description;
        }
        if let Some(image) = self.image {
            next.image = image;
        }
        if let Some(is_active) = self.is_active {
            next.is_active = is_active;
        }
        next.updated_at = now;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("outerwear"));
        assert!(is_valid_slug("knit-2024"));
        assert!(!is_valid_slug("Outerwear"));
        assert!(!is_valid_slug("-coats"));
        assert!(!is_valid_slug("coats--long"));
        assert!(!is_valid_slug("t shirts"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_new_category_defaults_active() {
        let input: NewCategory =
            serde_json::from_str(r#"{"name": "Bottoms", "slug": "bottoms"}"#).expect("json");
        let category = input.into_category(Utc::now()).expect("valid category");
        assert!(category.is_active);
        assert!(category.sub_categories.is_empty());
    }

    #[test]
    fn test_invalid_sub_category_rejects_whole_category() {
        let input = NewCategory {
            name: "Tops".to_string(),
            slug: "tops".to_string(),
            description: String::new(),
            image: None,
            is_active: true,
            sub_categories: vec![NewSubCategory {
                name: "Shirts".to_string(),
                slug: "Shirts!".to_string(),
                description: String::new(),
            }],
        };
        assert!(matches!(
            input.into_category(Utc::now()),
            Err(StoreError::Validation(_))
        ));
    }
}
