//! `potionshop-auth`: caller authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage.

pub mod api_key;

pub use api_key::{ApiKeyError, ApiKeyValidator, StaticApiKey};
