//! Infrastructure layer module
//!
//! Everything that touches the outside world:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Catalog asset loading

pub mod catalog_loader;
pub mod config;
pub mod logging;

pub use catalog_loader::CatalogLoader;
