//! Page row and DTO models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use wikimasters_core::types::{DbId, Timestamp};

/// A stored page.
///
/// Serialized with camelCase keys, both on the wire and in the page file.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: DbId,
    pub title: String,
    /// Markdown source.
    pub content: String,
    pub author_id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a page. The author comes from the session, not the body.
#[derive(Debug, Clone)]
pub struct CreatePage {
    pub title: String,
    pub content: String,
    pub author_id: DbId,
    pub author_name: Option<String>,
}

/// DTO for updating a page. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePage {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdatePage {
    /// Merge the provided fields into `page`. Timestamps are the caller's job.
    pub fn apply_to(self, page: &mut Page) {
        if let Some(title) = self.title {
            page.title = title;
        }
        if let Some(content) = self.content {
            page.content = content;
        }
    }
}
