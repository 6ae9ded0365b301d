//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the catalog
//! client: error handling, configuration and the interactive console.

pub mod config;
pub mod console;
pub mod error;

pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
