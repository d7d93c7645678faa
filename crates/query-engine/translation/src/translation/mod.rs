//! Translate an incoming filter request to a query descriptor for the relational engine.

pub mod error;
pub mod helpers;
pub mod query;
