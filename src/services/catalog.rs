use crate::models::Catalog;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading the shoe catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Catalog {
    /// Parse a catalog from its JSON representation
    ///
    /// The document is a list of `{model, sport, sizes}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a catalog file
    pub async fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_json_str(&json)
    }
}

/// Read-only catalog cache
///
/// Keeps the parsed catalog in memory for `ttl_secs` and reloads it from disk
/// on the first request after expiry. Clones share the same cache.
#[derive(Clone)]
pub struct CatalogStore {
    path: PathBuf,
    cache: moka::future::Cache<PathBuf, Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new<P: Into<PathBuf>>(path: P, ttl_secs: u64) -> Self {
        let cache = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            path: path.into(),
            cache,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the catalog, loading it if the cached copy is missing or expired
    ///
    /// Concurrent callers on a cold cache share a single load. A failed load
    /// is not cached, so the next call retries.
    pub async fn get(&self) -> Result<Arc<Catalog>, Arc<CatalogError>> {
        self.cache
            .try_get_with(self.path.clone(), async {
                let catalog = Catalog::load_from_path(&self.path).await?;
                tracing::info!(
                    "Loaded catalog from {} ({} models)",
                    self.path.display(),
                    catalog.len()
                );
                Ok::<_, CatalogError>(Arc::new(catalog))
            })
            .await
    }

    /// Drop the cached copy so the next `get` reads the file again
    pub async fn invalidate(&self) {
        self.cache.invalidate(&self.path).await;
        tracing::debug!("Invalidated catalog cache: {}", self.path.display());
    }
}
