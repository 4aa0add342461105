//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs are opaque
//! strings: seed data may use readable values such as `"p-001"`, while IDs
//! assigned by the store are UUID v4 strings.

/// Generate a fresh, globally unique ID string.
///
/// Used by the `generate()` constructor of every ID defined with
/// `define_id!`.
#[must_use]
pub fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors `new()` and `generate()`, accessor `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use threadline_core::define_id;
/// define_id!(ShipmentId);
/// define_id!(ReturnId);
///
/// let shipment = ShipmentId::new("s-1");
/// let generated = ReturnId::generate();
/// assert_eq!(shipment.as_str(), "s-1");
/// assert!(!generated.as_str().is_empty());
///
/// // These are different types, so this won't compile:
/// // let _: ShipmentId = generated;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing ID value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh unique ID.
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::fresh_id())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(OrderId);
define_id!(UserId);
define_id!(CategoryId);
define_id!(SubCategoryId);
define_id!(CartItemId);
define_id!(WishlistItemId);
define_id!(CouponId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = CartItemId::new("line-7");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"line-7\"");
        let back: CartItemId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
