//! Product list controller: load the collection, delete with confirmation.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::api::ProductApi;
use super::error::CatalogResult;
use super::model::{Product, ProductId, normalize_collection};

/// Asks the user to approve a destructive action.
#[async_trait]
pub trait Confirm: Send {
    /// Return `true` only on an explicit affirmative answer.
    async fn confirm(&mut self, message: &str) -> bool;
}

/// A fixed answer, for non-interactive callers and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

#[async_trait]
impl Confirm for FixedAnswer {
    async fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Result of a [`ProductListController::delete`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server deleted the product and it was removed locally.
    Deleted,
    /// The user declined; nothing happened.
    Cancelled,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub stock: String,
    pub category: String,
}

impl ProductRow {
    /// Column headings, in row order.
    pub const HEADERS: [&'static str; 5] = ["ID", "Name", "Price", "Stock", "Category"];

    fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.map(|id| id.to_string()).unwrap_or_default(),
            name: product.name.clone().unwrap_or_default(),
            price: product.price.map(|p| format!("{:.2}", p)).unwrap_or_default(),
            stock: product.stock.map(|s| s.to_string()).unwrap_or_default(),
            category: product.category_label().unwrap_or_default(),
        }
    }

    pub fn cells(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.price.as_str(),
            self.stock.as_str(),
            self.category.as_str(),
        ]
    }
}

/// Prompt shown before deleting a product.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this product?";

/// Controller behind the product table.
pub struct ProductListController {
    api: Arc<dyn ProductApi>,
    products: Vec<Product>,
    error: Option<String>,
    alert: Option<String>,
}

impl ProductListController {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            products: Vec::new(),
            error: None,
            alert: None,
        }
    }

    /// Fetch the whole collection, replacing the local list.
    ///
    /// On failure the list is left empty and the error is recorded.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> CatalogResult<usize> {
        self.error = None;
        match self.api.list_products().await {
            Ok(value) => {
                self.products = normalize_collection(value);
                info!("Loaded {} products", self.products.len());
                Ok(self.products.len())
            }
            Err(e) => {
                error!("Error fetching products: {}", e);
                self.products.clear();
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Delete `id` after the user confirms.
    ///
    /// A declined prompt sends nothing. On success every local entry with
    /// that identifier is dropped; on failure the list is untouched and the
    /// message is kept as [`alert`](Self::alert).
    #[instrument(skip(self, confirm))]
    pub async fn delete(
        &mut self,
        id: ProductId,
        confirm: &mut dyn Confirm,
    ) -> CatalogResult<DeleteOutcome> {
        self.alert = None;
        if !confirm.confirm(DELETE_PROMPT).await {
            info!("Deletion of product {} cancelled", id);
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.api.delete_product(id).await {
            warn!("Error deleting product {}: {}", id, e);
            self.alert = Some(format!("Could not delete the product. {}", e.user_message()));
            return Err(e);
        }

        self.products.retain(|product| product.id != Some(id));
        info!("Deleted product {}", id);
        Ok(DeleteOutcome::Deleted)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn rows(&self) -> Vec<ProductRow> {
        self.products.iter().map(ProductRow::from_product).collect()
    }

    /// Error from the last load, if it failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Alert from the last delete, if it failed.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }
}
