use serde::Serialize;
use wikimasters_core::roles::Role;
use wikimasters_core::types::{DbId, Timestamp};

/// A directory user. Immutable once seeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: Timestamp,
}
