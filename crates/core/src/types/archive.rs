//! Editorial archive entries.

use serde::{Deserialize, Serialize};

use super::id::ArchiveItemId;

/// An editorial entry in the public archive log.
///
/// Read-only on the shipped site; edited through the same upsert/delete
/// pattern as products in the admin editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveItem {
    pub id: ArchiveItemId,
    pub title: String,
    pub image_url: String,
    pub description: String,
    /// Display date, e.g. `"NOV 2024"`.
    pub date: String,
    pub tags: Vec<String>,
}
