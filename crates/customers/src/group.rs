use std::borrow::Cow;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shoptier_core::{DomainError, DomainResult, Entity, EntityId};

/// Customer group identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub EntityId);

impl GroupId {
    pub fn new(id: EntityId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for GroupId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Symbolic group code used for lookups (e.g. `"wholesale"`).
///
/// Codes are intentionally opaque strings at this layer; mapping a code to
/// business meaning is done by the caller. The one exception is
/// [`GroupCode::ANONYMOUS`], the designated cohort for customers without an
/// account, which the pricing layer keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupCode(Cow<'static, str>);

impl GroupCode {
    /// Cohort for customers browsing without an account (or as guests).
    pub const ANONYMOUS: GroupCode = GroupCode(Cow::Borrowed("anonymous"));

    pub fn new(code: impl Into<Cow<'static, str>>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for GroupCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named customer cohort used for price eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerGroup {
    id: GroupId,
    code: GroupCode,
    title: String,
    created: DateTime<Utc>,
}

impl CustomerGroup {
    pub fn new(id: GroupId, code: GroupCode, title: impl Into<String>) -> DomainResult<Self> {
        if code.as_str().trim().is_empty() {
            return Err(DomainError::validation("group code cannot be empty"));
        }
        Ok(Self {
            id,
            code,
            title: title.into(),
            created: Utc::now(),
        })
    }

    pub fn id_typed(&self) -> GroupId {
        self.id
    }

    pub fn code(&self) -> &GroupCode {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Entity for CustomerGroup {
    type Id = GroupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// In-memory registry of customer groups.
///
/// The pricing layer uses this to resolve the anonymous cohort and to render
/// group names on rule records.
#[derive(Debug, Default)]
pub struct GroupDirectory {
    groups: HashMap<GroupId, CustomerGroup>,
}

impl GroupDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a group. Re-registering an id is a conflict.
    pub fn register(&mut self, group: CustomerGroup) -> DomainResult<()> {
        if self.groups.contains_key(&group.id_typed()) {
            return Err(DomainError::conflict("group already registered"));
        }
        self.groups.insert(group.id_typed(), group);
        Ok(())
    }

    pub fn group(&self, id: GroupId) -> Option<&CustomerGroup> {
        self.groups.get(&id)
    }

    /// First group carrying the given code, if any.
    pub fn group_by_code(&self, code: &GroupCode) -> Option<&CustomerGroup> {
        self.groups.values().find(|g| g.code() == code)
    }

    pub fn title_of(&self, id: GroupId) -> Option<&str> {
        self.groups.get(&id).map(CustomerGroup::title)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_group(code: GroupCode, title: &str) -> CustomerGroup {
        CustomerGroup::new(GroupId::new(EntityId::new()), code, title).unwrap()
    }

    #[test]
    fn rejects_empty_code() {
        let err = CustomerGroup::new(GroupId::new(EntityId::new()), GroupCode::new("  "), "Blank")
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty code"),
        }
    }

    #[test]
    fn register_rejects_duplicate_id() {
        let mut directory = GroupDirectory::new();
        let group = test_group(GroupCode::new("wholesale"), "Wholesale");
        directory.register(group.clone()).unwrap();

        let err = directory.register(group).unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate group"),
        }
    }

    #[test]
    fn finds_group_by_code() {
        let mut directory = GroupDirectory::new();
        let anonymous = test_group(GroupCode::ANONYMOUS, "Anonymous customers");
        let wholesale = test_group(GroupCode::new("wholesale"), "Wholesale");
        directory.register(anonymous.clone()).unwrap();
        directory.register(wholesale).unwrap();

        let found = directory.group_by_code(&GroupCode::ANONYMOUS).unwrap();
        assert_eq!(found.id_typed(), anonymous.id_typed());
        assert!(directory.group_by_code(&GroupCode::new("retail")).is_none());
    }
}
