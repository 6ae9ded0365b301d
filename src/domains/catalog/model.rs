//! Product wire types and response normalization.
//!
//! The catalog API is not consistent about response shapes: the list
//! endpoint may return a bare object instead of an array, the read-one
//! endpoint may wrap its record in an array, and any field may be null.
//! Everything received goes through the `normalize_*` functions below.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::error::{CatalogError, CatalogResult};

/// Server-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

/// Category reference nested in a product record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryRef {
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A product snapshot as returned by the API.
///
/// Every field is optional: the client holds whatever the server sent and
/// fills gaps at the edges (empty form fields, blank table cells).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub category: Option<CategoryRef>,
    /// Flattened category name sent by the list endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Product {
    /// The nested category identifier, if any.
    pub fn category_id(&self) -> Option<i64> {
        self.category.as_ref().and_then(|c| c.id)
    }

    /// Best available label for the product's category.
    pub fn category_label(&self) -> Option<String> {
        self.category
            .as_ref()
            .and_then(|c| c.name.clone())
            .or_else(|| self.category_name.clone())
            .or_else(|| self.category_id().map(|id| id.to_string()))
    }
}

/// Category link sent in create/update bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryLink {
    pub id: i64,
}

/// Request body for `POST /api/product` and `PUT /api/product/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: CategoryLink,
}

/// Normalize a list response into a sequence of products.
///
/// - array: each object element is decoded; anything else is skipped
/// - object: wrapped into a one-element sequence
/// - anything else: empty sequence
pub fn normalize_collection(value: Value) -> Vec<Product> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match decode_object(item) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!("Skipping product at index {}: {}", index, e);
                    None
                }
            })
            .collect(),
        value @ Value::Object(_) => match decode_object(value) {
            Ok(product) => vec![product],
            Err(e) => {
                warn!("Skipping single product response: {}", e);
                Vec::new()
            }
        },
        other => {
            warn!("Unexpected list response type '{}', treating as empty", type_name(&other));
            Vec::new()
        }
    }
}

/// Normalize a read-one response into a single product.
///
/// Accepts a bare object or an array holding it (the first element wins).
/// An empty array or `null` means the product does not exist.
pub fn normalize_record(value: Value, id: ProductId) -> CatalogResult<Product> {
    match value {
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => decode_object(first),
            None => Err(CatalogError::NotFound(id)),
        },
        Value::Null => Err(CatalogError::NotFound(id)),
        other => decode_object(other),
    }
}

fn decode_object(value: Value) -> CatalogResult<Product> {
    if !value.is_object() {
        return Err(CatalogError::network(format!(
            "expected a product object, got {}",
            type_name(&value)
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| CatalogError::network(format!("invalid product record: {}", e)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
