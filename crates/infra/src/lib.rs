//! Infrastructure layer: configuration, inventory persistence, bottling workflow.

pub mod bottler;
pub mod config;
pub mod store;
