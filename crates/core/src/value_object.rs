//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two instances
/// with the same attribute values are the same value. `Money` is the
/// canonical example in this workspace: `12.34 EUR` equals `12.34 EUR`
/// regardless of where either value came from. Entities, in contrast, are
/// identified by their `Id` and keep their identity across attribute changes.
///
/// To "modify" a value object, construct a new one. This keeps values safe to
/// share and to use as cache keys.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
