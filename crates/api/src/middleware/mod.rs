//! Session and authorization extractors.
//!
//! - [`auth::CurrentUser`] -- The session user, or `None`. Never rejects.
//! - [`rbac::RequireView`] -- Read access; guests pass.
//! - [`rbac::RequireAuth`] -- Requires any signed-in user.
//! - [`rbac::RequireEditor`] -- Requires `editor` or `admin`.
//! - [`rbac::RequireAdmin`] -- Requires `admin`.
//!
//! Missing or insufficient roles are rejected with 401.

pub mod auth;
pub mod rbac;
