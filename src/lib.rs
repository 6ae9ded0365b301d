//! Catalog Admin Library
//!
//! This crate provides an administration client for a product catalog
//! served by a REST API.
//!
//! # Architecture
//!
//! The client is organized into the following modules:
//!
//! - **core**: Configuration, error handling and the interactive console
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Product model, REST client, form and list controllers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_admin::core::Config;
//! use catalog_admin::domains::catalog::{HttpProductApi, ProductListController};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let api = Arc::new(HttpProductApi::new(&config.api)?);
//!     let mut list = ProductListController::new(api);
//!     list.load().await?;
//!     println!("{} products", list.products().len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Console, Error, Result};
