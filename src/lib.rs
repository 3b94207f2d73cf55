//! Malok Recargas - storefront backend for a top-up resale business.
//!
//! Serves the product catalog, Google sign-in with session tokens, the
//! customer wallet and checkout submissions that are forwarded to the
//! operators' Telegram chat and confirmed to the customer by email.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases
//! - **infra**: Database, Google, Telegram and SMTP integrations
//! - **api**: HTTP handlers, middleware, and routes
//! - **utils**: Notification templates
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::User;
pub use errors::{AppError, AppResult};
