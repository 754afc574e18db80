//! Core library for the `citywx` lookup tool.
//!
//! This crate defines:
//! - The weather record model and the read-only catalog
//! - Catalog sources (local file, http) and the one-shot loader
//! - City matching (substring / exact) and the query session
//! - Configuration handling
//!
//! It is used by `citywx-cli`, but can also be embedded in other front ends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod session;
pub mod source;

pub use catalog::{ParsedCatalog, WeatherCatalog};
pub use config::Config;
pub use error::LoadError;
pub use matcher::{MatchMode, QueryState, QueryStatus, normalize, run_query};
pub use model::WeatherRecord;
pub use session::{LoadReport, Session};
pub use source::{CatalogSource, SourceLocation, source_from_location};
