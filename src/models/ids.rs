//! Strongly-typed ID wrappers for transactions and categories
//!
//! IDs are opaque strings. New IDs are random UUIDs, but any string loaded
//! from storage (including legacy timestamp IDs such as `"1700000000000"`)
//! is kept verbatim so existing records keep their identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Wrap an existing identifier string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Check whether `prefix` is a prefix of this ID
            ///
            /// Lets the CLI accept the short form printed in listings.
            pub fn matches_prefix(&self, prefix: &str) -> bool {
                !prefix.is_empty() && self.0.starts_with(prefix)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(TransactionId);
define_id!(CategoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_unique() {
        let id1 = TransactionId::new();
        let id2 = TransactionId::new();
        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_legacy_id_preserved() {
        let id: TransactionId = serde_json::from_str("\"1700000000000\"").unwrap();
        assert_eq!(id.as_str(), "1700000000000");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1700000000000\"");
    }

    #[test]
    fn test_matches_prefix() {
        let id = CategoryId::from_string("550e8400-e29b-41d4-a716-446655440000");
        assert!(id.matches_prefix("550e8400"));
        assert!(!id.matches_prefix("660e"));
        assert!(!id.matches_prefix(""));
    }

    #[test]
    fn test_display_is_full_string() {
        let id = CategoryId::from("9");
        assert_eq!(id.to_string(), "9");
    }
}
