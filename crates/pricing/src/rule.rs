use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoptier_catalog::ProductId;
use shoptier_core::{Entity, EntityId, Money};
use shoptier_customers::{GroupDirectory, GroupId};

/// Price rule identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceRuleId(pub EntityId);

impl PriceRuleId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for PriceRuleId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Graduated price rule.
///
/// Associates a product with a unit price that applies once the cart
/// quantity reaches `minimum_quantity`, restricted to the listed customer
/// groups. A rule without any customer group can never qualify; it is kept
/// around as an "invalid price" marker for the admin surface rather than
/// rejected, and resolution silently skips it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraduatedPrice {
    id: PriceRuleId,
    product_id: ProductId,
    minimum_quantity: u32,
    price: Money,
    customer_groups: HashSet<GroupId>,
    is_topseller: bool,
    created: DateTime<Utc>,
}

impl GraduatedPrice {
    pub fn new(
        id: PriceRuleId,
        product_id: ProductId,
        minimum_quantity: u32,
        price: Money,
        customer_groups: HashSet<GroupId>,
    ) -> Self {
        Self {
            id,
            product_id,
            minimum_quantity,
            price,
            customer_groups,
            is_topseller: false,
            created: Utc::now(),
        }
    }

    /// Marks this rule as a topseller tier. Cosmetic only; resolution
    /// ignores the flag.
    pub fn with_topseller(mut self, is_topseller: bool) -> Self {
        self.is_topseller = is_topseller;
        self
    }

    pub fn id_typed(&self) -> PriceRuleId {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn minimum_quantity(&self) -> u32 {
        self.minimum_quantity
    }

    pub fn price(&self) -> &Money {
        &self.price
    }

    pub fn customer_groups(&self) -> &HashSet<GroupId> {
        &self.customer_groups
    }

    pub fn is_topseller(&self) -> bool {
        self.is_topseller
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Inclusive threshold check: the rule may apply at `quantity` units.
    pub fn applies_to_quantity(&self, quantity: u32) -> bool {
        self.minimum_quantity <= quantity
    }

    pub fn carries_group(&self, group: GroupId) -> bool {
        self.customer_groups.contains(&group)
    }

    /// Whether this rule is complete enough to ever be selected: at least
    /// one customer group and a positive amount.
    pub fn is_valid_price(&self) -> bool {
        !self.customer_groups.is_empty() && self.price.amount() > 0
    }

    /// Price rendered for display surfaces and the JSON price table.
    pub fn formatted_price(&self) -> String {
        self.price.formatted()
    }

    /// Names of all assigned groups separated by " / ", or an explicit
    /// marker when none is related.
    pub fn group_names_formatted(&self, directory: &GroupDirectory) -> String {
        if self.customer_groups.is_empty() {
            return "no related customer group".to_string();
        }
        let mut names: Vec<&str> = self
            .customer_groups
            .iter()
            .filter_map(|id| directory.title_of(*id))
            .collect();
        names.sort_unstable();
        names.join(" / ")
    }

    /// Generic title for admin breadcrumbs and logs.
    pub fn title(&self, directory: &GroupDirectory) -> String {
        let mut title = format!(
            "{} | Minimum Quantity: {}",
            self.formatted_price(),
            self.minimum_quantity
        );
        if !self.customer_groups.is_empty() {
            title.push_str(&format!(" | {}", self.group_names_formatted(directory)));
        }
        title
    }
}

impl Entity for GraduatedPrice {
    type Id = PriceRuleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
