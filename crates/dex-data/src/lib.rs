//! Catalogue sources and configuration for the viewer

pub mod config;
pub mod schema;
pub mod sources;

use dex_core::CatalogError;
use thiserror::Error;

// Re-exports
pub use config::{SourceKind, ViewerConfig};
pub use sources::{catalog_from_config, HttpCatalog, StaticCatalog};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry #{0} not found")]
    NotFound(u32),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<DataError> for CatalogError {
    fn from(error: DataError) -> Self {
        match error {
            DataError::NotFound(key) => CatalogError::NotFound(format!("entry #{key}")),
            DataError::Http(err) if err.status() == Some(reqwest::StatusCode::NOT_FOUND) => {
                CatalogError::NotFound(err.to_string())
            }
            DataError::Json(err) => CatalogError::NotFound(format!("malformed record: {err}")),
            other => CatalogError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            CatalogError::from(DataError::NotFound(9000)),
            CatalogError::NotFound(_)
        ));
        assert!(matches!(
            CatalogError::from(DataError::Config("bad".into())),
            CatalogError::Network(_)
        ));

        let json = serde_json::from_str::<u32>("{").unwrap_err();
        assert!(matches!(
            CatalogError::from(DataError::Json(json)),
            CatalogError::NotFound(_)
        ));
    }
}
