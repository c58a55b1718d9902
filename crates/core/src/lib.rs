//! Domain logic for the wiki: roles and permissions, page validation,
//! upload rules, stub AI helpers and Markdown rendering.
//!
//! Nothing in this crate touches the network or the page store, so it can be
//! shared by the persistence layer, the HTTP layer and their tests.

pub mod ai;
pub mod error;
pub mod markdown;
pub mod pages;
pub mod roles;
pub mod types;
pub mod upload;
