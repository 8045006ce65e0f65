//! Request-scoped resolution context.
//!
//! One context lives for one request: it carries the current customer, the
//! cart view, and per-product memoization of resolution results so a page
//! rendering the same product several times queries the rule source once.
//! The caches are explicit request state, never process globals.

use std::collections::{BTreeMap, HashMap};

use tracing::trace;

use shoptier_catalog::{Product, ProductId};
use shoptier_core::Money;
use shoptier_customers::Customer;

use crate::cart::CartView;
use crate::resolver::PriceResolver;
use crate::rule::GraduatedPrice;
use crate::source::PriceRuleSource;

pub struct ResolutionContext<'a, S: PriceRuleSource, C: CartView> {
    resolver: PriceResolver<'a, S>,
    cart: &'a C,
    customer: Option<Customer>,
    best: HashMap<ProductId, Option<GraduatedPrice>>,
    tables: HashMap<ProductId, Vec<GraduatedPrice>>,
}

impl<'a, S: PriceRuleSource, C: CartView> ResolutionContext<'a, S, C> {
    /// `customer` is the current session's customer; `None` for anonymous
    /// sessions.
    pub fn new(resolver: PriceResolver<'a, S>, cart: &'a C, customer: Option<Customer>) -> Self {
        Self {
            resolver,
            cart,
            customer,
            best: HashMap::new(),
            tables: HashMap::new(),
        }
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Cart-derived quantity for the product (1 when not in any cart).
    pub fn quantity_in_cart(&self, product: &Product) -> u32 {
        self.cart.quantity_for(self.customer.as_ref(), product.id_typed())
    }

    /// Best rule for the product at the cart quantity, memoized per product.
    pub fn best_rule_for(&mut self, product: &Product) -> Option<&GraduatedPrice> {
        let id = product.id_typed();
        if !self.best.contains_key(&id) {
            let quantity = self.quantity_in_cart(product);
            let rule = self
                .resolver
                .best_rule(product, self.customer.as_ref(), quantity);
            self.best.insert(id, rule);
        } else {
            trace!(product = %id, "graduated price served from request cache");
        }
        self.best.get(&id).and_then(Option::as_ref)
    }

    /// The full price-break table for the product, memoized per product.
    pub fn price_table(&mut self, product: &Product) -> &[GraduatedPrice] {
        let id = product.id_typed();
        if !self.tables.contains_key(&id) {
            let rules = self
                .resolver
                .applicable_rules(product, self.customer.as_ref());
            self.tables.insert(id, rules);
        }
        self.tables.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The price the customer pays per unit at the current cart quantity.
    pub fn effective_price(&mut self, product: &Product) -> Money {
        match self.best_rule_for(product) {
            Some(rule) => rule.price().clone(),
            None => product.base_price().clone(),
        }
    }

    /// JSON object mapping minimum quantity to the formatted price,
    /// ascending, for client-side rendering (e.g. a quantity input's data
    /// attribute).
    pub fn price_table_json(&mut self, product: &Product) -> String {
        let mut table = BTreeMap::new();
        for rule in self.price_table(product) {
            table.insert(rule.minimum_quantity(), rule.formatted_price());
        }
        serde_json::to_string(&table).unwrap_or_else(|_| "{}".to_string())
    }

    /// The "from <price>" display value: the lowest amount in the price
    /// table, present only when the table actually graduates (more than one
    /// tier, or a single tier above quantity 1).
    pub fn starting_price(&mut self, product: &Product) -> Option<Money> {
        let currency = product.base_price().currency().to_string();
        let table = self.price_table(product);
        let graduates =
            table.len() > 1 || table.first().is_some_and(|r| r.minimum_quantity() > 1);
        if !graduates {
            return None;
        }
        table
            .iter()
            .map(|rule| rule.price().amount())
            .min()
            .map(|amount| Money::new(amount, currency))
    }
}
