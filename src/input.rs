//! Reading catalog files from disk.

pub mod catalog;
pub mod language;

pub use catalog::{
    CatalogRanges,
    ContextRanges,
    LoadedCatalog,
    load_catalog_file,
};
