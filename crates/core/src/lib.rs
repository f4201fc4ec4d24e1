//! # Bookshelf Core
//!
//! Core types, errors, and configuration for Bookshelf.
//!
//! This crate provides the foundational building blocks used throughout
//! the Bookshelf application, including:
//!
//! - **Types**: The `Book` entity and its mutation inputs, the user profile
//! - **Errors**: Unified error handling with `AppError` and `AppResult`
//! - **Config**: Environment-driven startup configuration

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used items at crate root
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use types::{Book, CreateBookInput, UpdateBookInput, UserProfile, format_date};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
