mod batch;
mod catalog;

pub use batch::{BatchImportError, BatchImporter};
pub use catalog::{CatalogImportError, ProductCatalogImporter};
