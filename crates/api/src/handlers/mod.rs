pub mod ai;
pub mod auth;
pub mod pages;
pub mod upload;
pub mod wiki;
