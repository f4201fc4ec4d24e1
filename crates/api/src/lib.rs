//! # Bookshelf API
//!
//! GraphQL client for the Bookshelf backend.
//!
//! This crate provides the typed network boundary of the application:
//!
//! - **Client**: `ApiClient` with one method per query/mutation and
//!   bearer-token injection
//! - **Operations**: the GraphQL documents and their wire types

pub mod client;
pub mod operations;

// Re-export commonly used items at crate root
pub use client::{ApiClient, ClientError};
pub use operations::{GraphQlError, GraphQlRequest, GraphQlResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
