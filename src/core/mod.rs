//! Core business logic modules.

pub mod catalog;
pub mod enrich;
pub mod filter;
pub mod parser;
pub mod store;
