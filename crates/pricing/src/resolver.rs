//! Price resolution: selecting the applicable graduated price for a
//! product, customer, and quantity.
//!
//! Resolution is a two-phase pipeline over the product's rules: filter by
//! quantity threshold and group eligibility (plus qualification hooks),
//! then pick the extremal candidate by two sort keys. The highest matched
//! threshold wins; the lower price breaks a tie.

use tracing::{debug, trace};

use shoptier_catalog::Product;
use shoptier_core::Money;
use shoptier_customers::{Customer, GroupCode, GroupDirectory};

use crate::qualify::{self, QualificationHook};
use crate::rule::GraduatedPrice;
use crate::source::PriceRuleSource;

/// Resolves graduated prices against a rule source.
///
/// Read-only and deterministic: the same inputs always select the same rule,
/// independent of rule storage order.
pub struct PriceResolver<'a, S: PriceRuleSource> {
    rules: &'a S,
    groups: &'a GroupDirectory,
    hooks: Vec<Box<dyn QualificationHook>>,
}

impl<'a, S: PriceRuleSource> PriceResolver<'a, S> {
    pub fn new(rules: &'a S, groups: &'a GroupDirectory) -> Self {
        Self {
            rules,
            groups,
            hooks: Vec::new(),
        }
    }

    /// Registers a qualification hook; hooks run in registration order.
    pub fn with_hook(mut self, hook: Box<dyn QualificationHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn register_hook(&mut self, hook: Box<dyn QualificationHook>) {
        self.hooks.push(hook);
    }

    /// Calculates the most convenient price: among the product's rules that
    /// fit the quantity and the customer's groups, the one with the highest
    /// threshold, ties broken by the lower amount. `None` when no rule
    /// applies.
    pub fn best_rule(
        &self,
        product: &Product,
        customer: Option<&Customer>,
        quantity: u32,
    ) -> Option<GraduatedPrice> {
        let candidates: Vec<GraduatedPrice> = self
            .rules
            .rules_for_product(product.id_typed())
            .into_iter()
            .filter(|rule| rule.applies_to_quantity(quantity))
            .collect();
        let mut eligible = self.filter_for_customer(candidates, customer);
        eligible.sort_by(|a, b| {
            b.minimum_quantity()
                .cmp(&a.minimum_quantity())
                .then_with(|| a.price().amount().cmp(&b.price().amount()))
        });
        let best = eligible.into_iter().next();
        debug!(
            product = %product.id_typed(),
            quantity,
            matched = best.is_some(),
            "resolved graduated price"
        );
        best
    }

    /// All rules applicable to the customer regardless of quantity, for
    /// rendering the full price-break table. Ascending by threshold, then
    /// by amount; empty when nothing qualifies.
    pub fn applicable_rules(
        &self,
        product: &Product,
        customer: Option<&Customer>,
    ) -> Vec<GraduatedPrice> {
        let rules = self.rules.rules_for_product(product.id_typed());
        let mut eligible = self.filter_for_customer(rules, customer);
        eligible.sort_by(|a, b| {
            a.minimum_quantity()
                .cmp(&b.minimum_quantity())
                .then_with(|| a.price().amount().cmp(&b.price().amount()))
        });
        eligible
    }

    /// The matched rule's price, or the product's own base price.
    pub fn effective_price(
        &self,
        product: &Product,
        customer: Option<&Customer>,
        quantity: u32,
    ) -> Money {
        match self.best_rule(product, customer, quantity) {
            Some(rule) => rule.price().clone(),
            None => product.base_price().clone(),
        }
    }

    /// Group eligibility, qualification hooks, and per-tier de-duplication.
    ///
    /// Registered customers match on group intersection; anonymous sessions
    /// and guest placeholders match only rules carrying the anonymous group.
    /// Rules without any customer group never survive either path.
    fn filter_for_customer(
        &self,
        rules: Vec<GraduatedPrice>,
        customer: Option<&Customer>,
    ) -> Vec<GraduatedPrice> {
        let eligible: Vec<GraduatedPrice> = match customer.filter(|c| c.is_registered()) {
            Some(member) => rules
                .into_iter()
                .filter(|rule| {
                    member.in_any_group(rule.customer_groups())
                        && qualify::is_qualified(&self.hooks, rule, customer)
                })
                .collect(),
            None => {
                let Some(anonymous) = self.groups.group_by_code(&GroupCode::ANONYMOUS) else {
                    trace!("no anonymous customer group registered");
                    return Vec::new();
                };
                let anonymous_id = anonymous.id_typed();
                rules
                    .into_iter()
                    .filter(|rule| {
                        rule.carries_group(anonymous_id)
                            && qualify::is_qualified(&self.hooks, rule, customer)
                    })
                    .collect()
            }
        };
        dedup_by_tier(eligible)
    }
}

/// Keeps, per `minimum_quantity` tier, only the cheapest rule.
///
/// Sorts by threshold, amount, then id so equal-priced duplicates resolve
/// the same way on every call.
fn dedup_by_tier(mut rules: Vec<GraduatedPrice>) -> Vec<GraduatedPrice> {
    rules.sort_by(|a, b| {
        a.minimum_quantity()
            .cmp(&b.minimum_quantity())
            .then_with(|| a.price().amount().cmp(&b.price().amount()))
            .then_with(|| a.id_typed().0.as_uuid().cmp(b.id_typed().0.as_uuid()))
    });
    let mut kept: Vec<GraduatedPrice> = Vec::with_capacity(rules.len());
    for rule in rules {
        match kept.last() {
            Some(last) if last.minimum_quantity() == rule.minimum_quantity() => {
                // The kept rule sorted first, so it is the cheaper one.
            }
            _ => kept.push(rule),
        }
    }
    kept
}
