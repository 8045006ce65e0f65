//! Customers domain module (identity and customer groups).
//!
//! This crate contains the customer-side inputs to price resolution: who the
//! customer is and which groups they belong to. Pure domain logic (no IO, no
//! HTTP, no storage).

pub mod customer;
pub mod group;

pub use customer::{Customer, CustomerId};
pub use group::{CustomerGroup, GroupCode, GroupDirectory, GroupId};
