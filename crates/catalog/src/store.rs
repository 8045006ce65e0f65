use std::collections::HashMap;

use shoptier_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};

/// Product lookup contract consumed by the pricing layer.
///
/// This is the only boundary where `NotFound` originates during price
/// resolution; everything downstream treats absence of a match as a normal
/// "no applicable price" result.
pub trait ProductCatalog {
    fn product(&self, id: ProductId) -> DomainResult<Product>;
}

/// In-memory catalog for tests and embedding hosts without their own store.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: HashMap<ProductId, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product. Re-registering an id is a conflict.
    pub fn register(&mut self, product: Product) -> DomainResult<()> {
        if self.products.contains_key(&product.id_typed()) {
            return Err(DomainError::conflict("product already registered"));
        }
        self.products.insert(product.id_typed(), product);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn product(&self, id: ProductId) -> DomainResult<Product> {
        self.products.get(&id).cloned().ok_or(DomainError::NotFound)
    }
}
