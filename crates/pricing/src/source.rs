use shoptier_catalog::ProductId;
use shoptier_core::{DomainError, DomainResult};
use shoptier_customers::GroupId;

use crate::rule::{GraduatedPrice, PriceRuleId};

/// Read-side contract supplying graduated price rules to the resolver.
pub trait PriceRuleSource {
    /// All rules attached to the given product, in stable storage order.
    fn rules_for_product(&self, product_id: ProductId) -> Vec<GraduatedPrice>;

    /// All rules attached to the product that carry the given group.
    fn rules_for_group(&self, group_id: GroupId, product_id: ProductId) -> Vec<GraduatedPrice>;
}

/// In-memory rule store.
///
/// Keeps rules in insertion order so resolution inputs are deterministic
/// across calls.
#[derive(Debug, Default)]
pub struct InMemoryPriceRuleStore {
    rules: Vec<GraduatedPrice>,
}

impl InMemoryPriceRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule. Re-inserting an id is a conflict.
    pub fn insert(&mut self, rule: GraduatedPrice) -> DomainResult<()> {
        if self.rules.iter().any(|r| r.id_typed() == rule.id_typed()) {
            return Err(DomainError::conflict("price rule already registered"));
        }
        self.rules.push(rule);
        Ok(())
    }

    pub fn remove(&mut self, id: PriceRuleId) -> Option<GraduatedPrice> {
        let index = self.rules.iter().position(|r| r.id_typed() == id)?;
        Some(self.rules.remove(index))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PriceRuleSource for InMemoryPriceRuleStore {
    fn rules_for_product(&self, product_id: ProductId) -> Vec<GraduatedPrice> {
        self.rules
            .iter()
            .filter(|r| r.product_id() == product_id)
            .cloned()
            .collect()
    }

    fn rules_for_group(&self, group_id: GroupId, product_id: ProductId) -> Vec<GraduatedPrice> {
        self.rules
            .iter()
            .filter(|r| r.product_id() == product_id && r.carries_group(group_id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptier_core::{EntityId, Money};
    use std::collections::HashSet;

    fn test_rule(product_id: ProductId, groups: HashSet<GroupId>) -> GraduatedPrice {
        GraduatedPrice::new(
            PriceRuleId::new(EntityId::new()),
            product_id,
            10,
            Money::new(900, "EUR"),
            groups,
        )
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut store = InMemoryPriceRuleStore::new();
        let rule = test_rule(ProductId::new(EntityId::new()), HashSet::new());
        store.insert(rule.clone()).unwrap();

        let err = store.insert(rule).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate rule"),
        }
    }

    #[test]
    fn queries_filter_by_product_and_group() {
        let mut store = InMemoryPriceRuleStore::new();
        let product_a = ProductId::new(EntityId::new());
        let product_b = ProductId::new(EntityId::new());
        let wholesale = GroupId::new(EntityId::new());

        store
            .insert(test_rule(product_a, HashSet::from([wholesale])))
            .unwrap();
        store.insert(test_rule(product_a, HashSet::new())).unwrap();
        store.insert(test_rule(product_b, HashSet::new())).unwrap();

        assert_eq!(store.rules_for_product(product_a).len(), 2);
        assert_eq!(store.rules_for_product(product_b).len(), 1);
        assert_eq!(store.rules_for_group(wholesale, product_a).len(), 1);
        assert!(store.rules_for_group(wholesale, product_b).is_empty());
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut store = InMemoryPriceRuleStore::new();
        let product = ProductId::new(EntityId::new());
        let rule = test_rule(product, HashSet::new());
        let id = rule.id_typed();
        store.insert(rule).unwrap();

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.rules_for_product(product).is_empty());
    }
}
