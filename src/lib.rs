//! Movie Catalog Library
//!
//! Catalogs a directory of movie folders, enriches each entry from TMDB and
//! filters the result by attribute.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};
