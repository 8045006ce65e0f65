use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoptier_core::{DomainError, DomainResult, Entity, EntityId, Money};

/// Product identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub EntityId);

impl ProductId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Product status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
}

/// Catalog product.
///
/// The base price is what a customer pays when no graduated price rule
/// applies; the pricing layer falls back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    sku: String,
    name: String,
    status: ProductStatus,
    base_price: Money,
    created: DateTime<Utc>,
}

impl Product {
    pub fn new(
        id: ProductId,
        sku: impl Into<String>,
        name: impl Into<String>,
        base_price: Money,
    ) -> DomainResult<Self> {
        let sku = sku.into();
        let name = name.into();
        if sku.trim().is_empty() {
            return Err(DomainError::validation("SKU cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            sku,
            name,
            status: ProductStatus::Draft,
            base_price,
            created: Utc::now(),
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn base_price(&self) -> &Money {
        &self.base_price
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Check if product can be sold (must be Active, not Archived).
    pub fn can_be_sold(&self) -> bool {
        self.status == ProductStatus::Active
    }

    pub fn activate(&mut self) -> DomainResult<()> {
        if self.status == ProductStatus::Active {
            return Err(DomainError::conflict("product is already active"));
        }
        if self.status == ProductStatus::Archived {
            return Err(DomainError::invariant("archived products cannot be activated"));
        }
        self.status = ProductStatus::Active;
        Ok(())
    }

    pub fn archive(&mut self) -> DomainResult<()> {
        if self.status == ProductStatus::Archived {
            return Err(DomainError::conflict("product is already archived"));
        }
        self.status = ProductStatus::Archived;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product() -> Product {
        Product::new(
            ProductId::new(EntityId::new()),
            "SKU-001",
            "Test Product",
            Money::new(1000, "EUR"),
        )
        .unwrap()
    }

    #[test]
    fn new_product_rejects_empty_sku() {
        let err = Product::new(
            ProductId::new(EntityId::new()),
            "   ",
            "Test Product",
            Money::new(1000, "EUR"),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty SKU"),
        }
    }

    #[test]
    fn new_product_rejects_empty_name() {
        let err = Product::new(
            ProductId::new(EntityId::new()),
            "SKU-001",
            "   ",
            Money::new(1000, "EUR"),
        )
        .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn lifecycle_draft_active_archived() {
        let mut product = test_product();
        assert_eq!(product.status(), ProductStatus::Draft);
        assert!(!product.can_be_sold());

        product.activate().unwrap();
        assert!(product.can_be_sold());

        product.archive().unwrap();
        assert!(!product.can_be_sold());

        let err = product.activate().unwrap_err();
        match err {
            DomainError::InvariantViolation(msg) => {
                assert!(msg.contains("archived products cannot be activated"))
            }
            _ => panic!("Expected InvariantViolation error for archived product"),
        }
    }

    #[test]
    fn activate_twice_is_a_conflict() {
        let mut product = test_product();
        product.activate().unwrap();
        let err = product.activate().unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for already active product"),
        }
    }
}
