//! Catalog domain module.
//!
//! Everything needed to manage products through the remote catalog API.
//!
//! ## Architecture
//!
//! - `model.rs` - Wire types and lenient response normalization
//! - `api.rs` - `ProductApi` seam and its `reqwest` implementation
//! - `form.rs` - Create/edit form controller
//! - `list.rs` - Product table controller with delete confirmation
//! - `error.rs` - Catalog-specific error types

pub mod api;
mod error;
pub mod form;
pub mod list;
pub mod model;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{HttpProductApi, ProductApi};
pub use error::{CatalogError, CatalogResult};
pub use form::{FormField, FormMode, FormState, LoadState, ProductFormController};
pub use list::{Confirm, DeleteOutcome, ProductListController};
pub use model::{Product, ProductId, ProductPayload};
