//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. IDs in the archive
//! are external-facing, stable strings (e.g. `PX-001`, `arch-01`), so the
//! wrappers hold a `String` rather than a numeric key.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use pixelpunk_core::define_id;
/// define_id!(ProductId);
/// define_id!(ArchiveItemId);
///
/// let product_id = ProductId::new("PX-001");
/// let archive_id = ArchiveItemId::new("arch-01");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = archive_id;
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
            ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the underlying `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(ArchiveItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new("PX-001");
        assert_eq!(id.as_str(), "PX-001");
        assert_eq!(id.to_string(), "PX-001");
        assert_eq!(ProductId::from("PX-001"), id);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ArchiveItemId::new("arch-01");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"arch-01\"");
        let back: ArchiveItemId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, id);
    }
}
