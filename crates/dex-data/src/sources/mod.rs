pub mod http_source;
pub mod static_source;

use std::sync::Arc;
use std::time::Duration;

use dex_core::RemoteCatalog;
use tracing::info;

use crate::config::{SourceKind, ViewerConfig};
use crate::DataError;

pub use http_source::HttpCatalog;
pub use static_source::StaticCatalog;

/// Build the catalogue source selected by the configuration.
///
/// Demo mode has no built-in records here; the caller supplies them.
pub fn catalog_from_config(
    config: &ViewerConfig,
    demo: impl FnOnce() -> StaticCatalog,
) -> Result<Arc<dyn RemoteCatalog>, DataError> {
    let catalog: Arc<dyn RemoteCatalog> = match &config.source {
        SourceKind::Http => Arc::new(HttpCatalog::new(
            config.base_url.clone(),
            Duration::from_millis(config.request_timeout_ms),
        )?),
        SourceKind::File { path } => Arc::new(StaticCatalog::from_json_file(path)?),
        SourceKind::Demo => Arc::new(demo()),
    };

    info!(source = catalog.source_name(), "Catalogue source ready");
    Ok(catalog)
}
