use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoptier_core::{DomainError, DomainResult, Entity, EntityId};

use crate::group::GroupId;

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub EntityId);

impl CustomerId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Shop customer with group memberships.
///
/// A `guest` customer is a session placeholder without an account. For price
/// eligibility a guest behaves exactly like an absent customer: only rules
/// carrying the anonymous group can apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: Option<String>,
    groups: HashSet<GroupId>,
    guest: bool,
    created: DateTime<Utc>,
}

impl Customer {
    /// Create a registered customer.
    pub fn registered(
        id: CustomerId,
        name: impl Into<String>,
        email: Option<String>,
        groups: HashSet<GroupId>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            email,
            groups,
            guest: false,
            created: Utc::now(),
        })
    }

    /// Create a guest placeholder for an unauthenticated session.
    pub fn guest(id: CustomerId) -> Self {
        Self {
            id,
            name: String::new(),
            email: None,
            groups: HashSet::new(),
            guest: true,
            created: Utc::now(),
        }
    }

    pub fn id_typed(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn groups(&self) -> &HashSet<GroupId> {
        &self.groups
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn is_guest(&self) -> bool {
        self.guest
    }

    /// Whether this record stands for a real account (not a guest placeholder).
    pub fn is_registered(&self) -> bool {
        !self.guest
    }

    pub fn join_group(&mut self, group: GroupId) {
        self.groups.insert(group);
    }

    pub fn leave_group(&mut self, group: GroupId) {
        self.groups.remove(&group);
    }

    pub fn in_group(&self, group: GroupId) -> bool {
        self.groups.contains(&group)
    }

    /// Whether this customer belongs to at least one of the given groups.
    pub fn in_any_group(&self, groups: &HashSet<GroupId>) -> bool {
        !self.groups.is_disjoint(groups)
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
