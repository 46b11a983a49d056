//! Translation catalog data model and its JSON rendition.

mod error;
mod model;

pub use error::CatalogError;
pub use model::{
    Catalog,
    Context,
    Message,
    Translation,
    TranslationStatus,
};
