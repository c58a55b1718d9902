//! Role hierarchy and the page capabilities derived from it.
//!
//! Roles are ordered `admin > editor > viewer`; each role inherits every
//! capability of the roles below it. Permission checks take an
//! `Option<Role>` so an anonymous visitor (`None`) can be checked with the
//! same functions as a signed-in user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VIEWER: &str = "viewer";

/// A user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    /// Position in the hierarchy: viewer 1, editor 2, admin 3.
    pub fn rank(self) -> u8 {
        match self {
            Role::Viewer => 1,
            Role::Editor => 2,
            Role::Admin => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Editor => ROLE_EDITOR,
            Role::Viewer => ROLE_VIEWER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_EDITOR => Ok(Role::Editor),
            ROLE_VIEWER => Ok(Role::Viewer),
            other => Err(CoreError::Validation(format!("Unknown role '{other}'"))),
        }
    }
}

/// True when `role` is present and ranks at least as high as `required`.
pub fn has_role(role: Option<Role>, required: Role) -> bool {
    role.is_some_and(|r| r.rank() >= required.rank())
}

pub fn can_edit_pages(role: Option<Role>) -> bool {
    has_role(role, Role::Editor)
}

pub fn can_delete_pages(role: Option<Role>) -> bool {
    has_role(role, Role::Admin)
}

/// Guests may read every page.
pub fn can_view_pages(_role: Option<Role>) -> bool {
    true
}

pub fn is_authenticated(role: Option<Role>) -> bool {
    role.is_some()
}
