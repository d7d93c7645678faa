//! A query descriptor for the relational engine, and its rendering to SQL.

pub mod ast;
pub mod convert;
pub mod descriptor;
pub mod helpers;
pub mod string;
