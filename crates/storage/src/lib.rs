use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nordic_core::{Catalog, CatalogDocument, Route};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const DEFAULT_CATALOG_PATH: &str = "data/content-db.json";

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed reading catalog at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed parsing catalog document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError>;
}

#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogLoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(Catalog::from_json_str(&raw)?)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogSource {
    routes: Vec<Route>,
}

impl MemoryCatalogSource {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogLoadError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;
        Ok(Self::new(document.routes))
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn describe(&self) -> String {
        format!("memory:{} routes", self.routes.len())
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        Ok(Catalog::new(self.routes.clone()))
    }
}

#[derive(Debug, Clone)]
pub enum CatalogStore {
    File(FileCatalogSource),
    Memory(MemoryCatalogSource),
}

impl CatalogStore {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(FileCatalogSource::new(path))
    }

    pub fn memory(routes: Vec<Route>) -> Self {
        Self::Memory(MemoryCatalogSource::new(routes))
    }
}

impl CatalogSource for CatalogStore {
    fn describe(&self) -> String {
        match self {
            CatalogStore::File(source) => source.describe(),
            CatalogStore::Memory(source) => source.describe(),
        }
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogLoadError> {
        match self {
            CatalogStore::File(source) => source.load_catalog().await,
            CatalogStore::Memory(source) => source.load_catalog().await,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub source: String,
    pub routes: usize,
    pub regions: usize,
    pub loaded_at: DateTime<Utc>,
    pub degraded: bool,
    pub error: Option<String>,
}

/// Loads a catalog, degrading to an empty one when the source fails.
pub async fn load_or_empty<S: CatalogSource>(source: &S) -> (Catalog, LoadReport) {
    let described = source.describe();

    let (catalog, error) = match source.load_catalog().await {
        Ok(catalog) => (catalog, None),
        Err(err) => {
            warn!(source = %described, error = %err, "catalog unavailable, continuing with empty catalog");
            (Catalog::empty(), Some(err.to_string()))
        }
    };

    let report = LoadReport {
        source: described,
        routes: catalog.routes().len(),
        regions: catalog.index().len(),
        loaded_at: Utc::now(),
        degraded: error.is_some(),
        error,
    };

    info!(
        source = %report.source,
        routes = report.routes,
        regions = report.regions,
        degraded = report.degraded,
        "catalog loaded"
    );

    (catalog, report)
}

/// Shared slot for the session catalog; `ready()` resolves once one is published.
#[derive(Debug, Clone)]
pub struct CatalogHandle {
    state: Arc<watch::Sender<Option<Arc<Catalog>>>>,
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::pending()
    }
}

impl CatalogHandle {
    pub fn pending() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn ready_with(catalog: Catalog) -> Self {
        let handle = Self::pending();
        handle.publish(catalog);
        handle
    }

    /// First publication wins; the catalog is immutable for the session.
    pub fn publish(&self, catalog: Catalog) -> bool {
        let catalog = Arc::new(catalog);
        self.state.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(catalog);
            true
        })
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub async fn ready(&self) -> Arc<Catalog> {
        let mut rx = self.state.subscribe();
        // the handle owns the sender, so the wait only ends on publication
        let catalog = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|current| current.as_ref().cloned());
        catalog.unwrap_or_default()
    }

    pub async fn load_from<S: CatalogSource>(&self, source: &S) -> LoadReport {
        let (catalog, report) = load_or_empty(source).await;
        if !self.publish(catalog) {
            warn!(source = %report.source, "catalog already published, ignoring reload");
        }
        report
    }

    /// Starts loading in the background and returns immediately.
    pub fn spawn_load(store: CatalogStore) -> (Self, JoinHandle<LoadReport>) {
        let handle = Self::pending();
        let loader = handle.clone();
        let task = tokio::spawn(async move { loader.load_from(&store).await });
        (handle, task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "routes": [
            { "id": "fjords", "name": "Fjord Circuit", "region": "Norway", "length": 5, "days": [] },
            { "id": "ring", "name": "Ring Road", "region": "Iceland", "minDays": 7, "maxDays": 12, "days": [] }
        ]
    }"#;

    #[tokio::test]
    async fn memory_source_loads_routes() {
        let source = MemoryCatalogSource::from_json(SAMPLE).unwrap();
        let (catalog, report) = load_or_empty(&source).await;

        assert_eq!(catalog.routes().len(), 2);
        assert_eq!(report.regions, 2);
        assert!(!report.degraded);
    }

    #[tokio::test]
    async fn missing_file_degrades_to_empty_catalog() {
        let store = CatalogStore::file("/definitely/not/here/content-db.json");
        let (catalog, report) = load_or_empty(&store).await;

        assert!(catalog.is_empty());
        assert!(report.degraded);
        assert!(report.error.is_some());
    }

    #[tokio::test]
    async fn malformed_file_degrades_to_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content-db.json");
        std::fs::write(&path, "{ not json").unwrap();

        let (catalog, report) = load_or_empty(&CatalogStore::file(&path)).await;

        assert!(catalog.is_empty());
        assert!(report.degraded);
        assert_eq!(report.routes, 0);
        assert!(report
            .error
            .as_deref()
            .is_some_and(|err| err.starts_with("failed parsing catalog document")));
    }

    #[tokio::test]
    async fn ready_waits_for_publication() {
        let handle = CatalogHandle::pending();
        assert!(!handle.is_ready());

        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.ready().await })
        };

        let source = MemoryCatalogSource::from_json(SAMPLE).unwrap();
        handle.load_from(&source).await;

        let catalog = waiter.await.unwrap();
        assert_eq!(catalog.routes().len(), 2);
        assert!(handle.is_ready());
    }

    #[tokio::test]
    async fn catalog_is_published_only_once() {
        let handle = CatalogHandle::ready_with(Catalog::empty());
        assert!(!handle.publish(Catalog::new(vec![Route::default()])));
        assert!(handle.ready().await.is_empty());
    }

    #[tokio::test]
    async fn spawn_load_resolves_handle() {
        let (handle, task) = CatalogHandle::spawn_load(CatalogStore::memory(vec![Route {
            id: "solo".to_string(),
            ..Route::default()
        }]));

        let catalog = handle.ready().await;
        assert!(catalog.find_route("solo").is_some());
        assert_eq!(task.await.unwrap().routes, 1);
    }
}
