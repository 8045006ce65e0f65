//! Graduated prices for a product catalog.
//!
//! Customers belonging to particular customer groups get a different unit
//! price once they buy at or above a configured quantity threshold (e.g.
//! "10+: 9.00 EUR, 50+: 7.00 EUR"). This crate holds the rule record and the
//! resolution pipeline that selects the applicable rule for a product,
//! customer, and quantity. Resolution is a pure read: absence of a match is
//! a normal result, never an error.

pub mod cart;
pub mod context;
pub mod qualify;
pub mod resolver;
pub mod rule;
pub mod source;

pub use cart::{CartView, InMemoryCart, UnitCart};
pub use context::ResolutionContext;
pub use qualify::QualificationHook;
pub use resolver::PriceResolver;
pub use rule::{GraduatedPrice, PriceRuleId};
pub use source::{InMemoryPriceRuleStore, PriceRuleSource};
