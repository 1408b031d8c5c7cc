//! Status enums for archive entities.

use serde::{Deserialize, Serialize};

/// Availability of an archive piece.
///
/// Every piece is one-of-one: the only transition exposed by the editor is
/// `Available` -> `Sold`. Sold pieces stay in the vault as a provenance
/// record but cannot be added to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Available,
    Sold,
}

impl ItemStatus {
    /// Whether the piece can still be purchased.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Sold => write!(f, "sold"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "sold" => Ok(Self::Sold),
            _ => Err(format!("invalid item status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ItemStatus::Sold).expect("serialize");
        assert_eq!(json, "\"sold\"");
        let back: ItemStatus = serde_json::from_str("\"available\"").expect("deserialize");
        assert_eq!(back, ItemStatus::Available);
    }

    #[test]
    fn test_availability() {
        assert!(ItemStatus::Available.is_available());
        assert!(!ItemStatus::Sold.is_available());
    }
}
