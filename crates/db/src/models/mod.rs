//! Domain model structs and DTOs.
//!
//! - [`user::User`] -- a directory entry.
//! - [`page::Page`] -- a stored page, plus the create and update DTOs.

pub mod page;
pub mod user;
