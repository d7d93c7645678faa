//! Planning and running filtered queries against a relational engine.

pub mod engine;
pub mod error;
pub mod query;
