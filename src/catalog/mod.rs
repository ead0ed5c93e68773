//! Response catalog — the static menu tree the conversation walks.

pub mod loader;
pub mod model;

pub use loader::{CatalogIssue, LoadedCatalog, load_catalog};
pub use model::{Catalog, CatalogEntry, Greeting, MenuOption};
