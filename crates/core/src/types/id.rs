//! Newtype IDs for type-safe entity references.
//!
//! Catalog IDs arrive as opaque strings (database keys, slugs, or CMS
//! identifiers), so every ID wraps a non-empty `String`. Use the
//! `define_id!` macro to create a wrapper that cannot be mixed with IDs of
//! other entity types.

/// Errors that can occur when parsing an ID.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
}

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string (empty strings are rejected)
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `parse()`, `as_str()`, `into_inner()`
/// - `Display`, `FromStr`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use kacamata_core::define_id;
/// define_id!(FrameId);
/// define_id!(LensId);
///
/// let frame = FrameId::parse("frame-01").unwrap();
/// assert_eq!(frame.as_str(), "frame-01");
/// assert!(LensId::parse("").is_err());
///
/// // These are different types, so this won't compile:
/// // let _: FrameId = LensId::parse("lens-01").unwrap();
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
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an ID from a string, rejecting empty input.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Empty` if the input is empty.
            pub fn parse(id: impl Into<String>) -> ::core::result::Result<Self, $crate::IdError> {
                let id = id.into();
                if id.is_empty() {
                    return Err($crate::IdError::Empty);
                }
                Ok(Self(id))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::IdError;

            fn try_from(id: String) -> ::core::result::Result<Self, Self::Error> {
                Self::parse(id)
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(ProductId::parse(""), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_keeps_whitespace_ids() {
        // Only the empty string is invalid; stored ids are opaque.
        let id = ProductId::parse(" ").unwrap();
        assert_eq!(id.as_str(), " ");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ProductId>("\"\"").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = ProductId::parse("rayban-aviator").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"rayban-aviator\"");

        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_and_from_str() {
        let id: ProductId = "p-42".parse().unwrap();
        assert_eq!(id.to_string(), "p-42");
        assert_eq!(String::from(id), "p-42");
    }
}
