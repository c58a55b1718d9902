//! In-memory user directory.
//!
//! Three fixed demo accounts, one per role. Built once at startup and shared
//! read-only through the application state.

use chrono::{TimeZone, Utc};
use wikimasters_core::roles::Role;
use wikimasters_core::types::{DbId, Timestamp};

use crate::models::user::User;

/// Read-only lookup over a fixed set of users.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// The three demo accounts: admin (1), editor (2), viewer (3).
    pub fn seeded() -> Self {
        Self::new(vec![
            seed_user(1, "Admin User", "admin@test.com", Role::Admin),
            seed_user(2, "Editor User", "editor@test.com", Role::Editor),
            seed_user(3, "Viewer User", "viewer@test.com", Role::Viewer),
        ])
    }

    pub fn find_by_id(&self, id: DbId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Exact, case-sensitive email match.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// Display name for an author id, if the user exists.
    pub fn author_name(&self, id: DbId) -> Option<&str> {
        self.find_by_id(id).map(|u| u.name.as_str())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

fn seed_user(id: DbId, name: &str, email: &str, role: Role) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
        created_at: seed_timestamp(id as u32),
    }
}

/// Midnight UTC on the given day of January 2024.
fn seed_timestamp(day: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}
