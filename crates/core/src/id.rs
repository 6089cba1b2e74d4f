//! Strongly-typed identifiers used across the product context.
//!
//! Storefront identifiers are opaque strings (`"1"`, `"2000534"`), so these
//! newtypes wrap `String` instead of a numeric or UUID representation.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ContextError;

/// Identifier of a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of an item (SKU).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a seller offering an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SellerId(String);

/// Identifier of a category node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $t {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $t {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl FromStr for $t {
            type Err = ContextError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if s.is_empty() {
                    return Err(ContextError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(s.to_string()))
            }
        }
    };
}

impl_string_newtype!(ProductId, "ProductId");
impl_string_newtype!(ItemId, "ItemId");
impl_string_newtype!(SellerId, "SellerId");
impl_string_newtype!(CategoryId, "CategoryId");

/// Identity of a dispatch handle.
///
/// Every clone of a handle shares the same id, so consumers can tell whether a
/// handle they hold is still the one the container publishes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(Uuid);

impl DispatchId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_compares_with_plain_strings() {
        let id = ItemId::new("2000534");
        assert_eq!(id, "2000534");
        assert_ne!(id, "2000535");
        assert_eq!(id.to_string(), "2000534");
    }

    #[test]
    fn empty_identifier_is_rejected() {
        let err = "".parse::<SellerId>().unwrap_err();
        assert_eq!(err, ContextError::InvalidId("SellerId: empty".to_string()));
    }

    #[test]
    fn identifiers_serialize_as_bare_strings() {
        let json = serde_json::to_string(&ProductId::new("42")).unwrap();
        assert_eq!(json, "\"42\"");
    }

    #[test]
    fn dispatch_ids_are_distinct() {
        assert_ne!(DispatchId::new(), DispatchId::new());
    }
}
