//! tr-catalog
//!
//! Context-scoped UI translation catalogs: lookup with source fallback,
//! plural forms, quality checks, statistics and template merging.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod indexer;
pub mod input;
pub mod lookup;
pub mod markers;
pub mod merge;
pub mod qa;
pub mod stats;
pub mod types;

mod test_utils;

pub use catalog::{
    Catalog,
    CatalogError,
};
pub use lookup::{
    Translator,
    TranslatorChain,
};
