use std::collections::HashMap;

use shoptier_catalog::ProductId;
use shoptier_customers::{Customer, CustomerId};

/// Cart read contract: how many units of a product the current customer
/// already has in their cart.
///
/// A displayed price is always for at least one unit, so the view reports 1
/// when the product is not in any cart yet. Anonymous and guest sessions
/// have no persistent cart and likewise count as a single unit.
pub trait CartView {
    fn quantity_for(&self, customer: Option<&Customer>, product_id: ProductId) -> u32;
}

/// Trivial cart view: every product counts as a single unit.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitCart;

impl CartView for UnitCart {
    fn quantity_for(&self, _customer: Option<&Customer>, _product_id: ProductId) -> u32 {
        1
    }
}

/// In-memory cart positions keyed by customer and product.
#[derive(Debug, Default)]
pub struct InMemoryCart {
    positions: HashMap<(CustomerId, ProductId), u32>,
}

impl InMemoryCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cart position quantity; zero clears the position.
    pub fn set_quantity(&mut self, customer_id: CustomerId, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.positions.remove(&(customer_id, product_id));
        } else {
            self.positions.insert((customer_id, product_id), quantity);
        }
    }
}

impl CartView for InMemoryCart {
    fn quantity_for(&self, customer: Option<&Customer>, product_id: ProductId) -> u32 {
        let Some(member) = customer.filter(|c| c.is_registered()) else {
            return 1;
        };
        self.positions
            .get(&(member.id_typed(), product_id))
            .copied()
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoptier_core::EntityId;
    use std::collections::HashSet;

    fn test_member() -> Customer {
        Customer::registered(CustomerId::new(EntityId::new()), "Ada", None, HashSet::new())
            .unwrap()
    }

    #[test]
    fn defaults_to_one_unit() {
        let cart = InMemoryCart::new();
        let product = ProductId::new(EntityId::new());
        let member = test_member();

        assert_eq!(cart.quantity_for(None, product), 1);
        assert_eq!(cart.quantity_for(Some(&member), product), 1);
    }

    #[test]
    fn reports_position_quantity_for_members() {
        let mut cart = InMemoryCart::new();
        let product = ProductId::new(EntityId::new());
        let member = test_member();
        cart.set_quantity(member.id_typed(), product, 12);

        assert_eq!(cart.quantity_for(Some(&member), product), 12);
    }

    #[test]
    fn guests_have_no_persistent_cart() {
        let mut cart = InMemoryCart::new();
        let product = ProductId::new(EntityId::new());
        let guest = Customer::guest(CustomerId::new(EntityId::new()));
        // A stray position under the guest id must not surface.
        cart.set_quantity(guest.id_typed(), product, 7);

        assert_eq!(cart.quantity_for(Some(&guest), product), 1);
    }

    #[test]
    fn zero_quantity_clears_the_position() {
        let mut cart = InMemoryCart::new();
        let product = ProductId::new(EntityId::new());
        let member = test_member();
        cart.set_quantity(member.id_typed(), product, 3);
        cart.set_quantity(member.id_typed(), product, 0);

        assert_eq!(cart.quantity_for(Some(&member), product), 1);
    }
}
