//! Row models for the `sites` table.

use serde::{Deserialize, Serialize};

/// Full mutable payload of a catalog row, as written by the sync job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub title: String,
    pub description: String,
    pub url: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub is_favorite: bool,
}

/// Projection returned by title lookups.
///
/// `id` is kept opaque; callers only use it as an existence marker, so the
/// remote key type (serial or uuid) does not matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteRef {
    pub id: serde_json::Value,
    #[serde(default)]
    pub url: Option<String>,
}
