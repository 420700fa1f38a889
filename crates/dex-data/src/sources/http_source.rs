//! HTTP catalogue source backed by a PokeAPI-compatible server

use std::time::Duration;

use async_trait::async_trait;
use dex_core::{CatalogError, CatalogRecord, RemoteCatalog};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::schema::{self, PokemonResponse, SpeciesResponse};
use crate::DataError;

/// Default public API base URL
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Looks entries up over HTTP.
///
/// A lookup fetches the entry and its species record concurrently; either
/// one failing fails the whole lookup.
#[derive(Clone)]
pub struct HttpCatalog {
    base_url: String,
    http: Client,
}

impl HttpCatalog {
    /// Create a new HTTP source
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DataError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, key: u32) -> Result<T, DataError> {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.http.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(DataError::NotFound(key));
        }

        let body = response.error_for_status()?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalog {
    async fn lookup(&self, key: u32) -> Result<CatalogRecord, CatalogError> {
        let pokemon_path = format!("pokemon/{key}");
        let species_path = format!("pokemon-species/{key}");

        let (pokemon, species) = tokio::try_join!(
            self.get_json::<PokemonResponse>(&pokemon_path, key),
            self.get_json::<SpeciesResponse>(&species_path, key),
        )?;

        Ok(schema::into_record(pokemon, species))
    }

    fn source_name(&self) -> &str {
        &self.base_url
    }
}
