//! Catalog domain module (products and product lookup).
//!
//! This crate contains the product side of price resolution: the product
//! entity with its base price, and the lookup contract the pricing layer
//! consumes. Pure domain logic (no IO, no HTTP, no storage).

pub mod product;
pub mod store;

pub use product::{Product, ProductId, ProductStatus};
pub use store::{InMemoryCatalog, ProductCatalog};
