//! Workspace indexing.

pub mod types;
pub mod workspace;

pub use types::{
    CatalogIndex,
    IndexerError,
    LoadFailure,
};
pub use workspace::WorkspaceIndexer;
