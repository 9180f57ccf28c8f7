// Service exports
pub mod catalog;
pub mod llm;

pub use catalog::{load_catalog, open_store, Catalog, CatalogError, CatalogStore, EmbeddedCatalog, FileCatalog, SqliteCatalog};
pub use llm::{AnthropicClient, LanguageModel, LlmError};
