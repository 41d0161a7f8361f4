//! Request middleware and extractors.

pub mod admin_auth;

pub use admin_auth::RequireAdmin;
