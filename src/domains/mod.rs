//! Domains module containing business logic organized by bounded contexts.
//!
//! The catalog is currently the only bounded context; it owns the product
//! resource, its REST client and the controllers built on top of it.

pub mod catalog;
