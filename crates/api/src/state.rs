use std::sync::{Arc, Mutex, MutexGuard};

use charcut_core::assets::AssetStore;
use charcut_core::catalog::CatalogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Categorized listing catalog. Mutations hold the lock across the
    /// in-memory change and the synchronous snapshot write, so insert
    /// and delete are atomic with respect to each other.
    pub catalog: Arc<Mutex<CatalogStore>>,
    /// Uploaded image blobs on disk.
    pub assets: Arc<AssetStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Lock the catalog, recovering from a poisoned lock. A panicking
    /// handler cannot leave the catalog half-mutated: each mutation is
    /// a single `Vec` push or remove.
    pub fn catalog(&self) -> MutexGuard<'_, CatalogStore> {
        self.catalog.lock().unwrap_or_else(|e| e.into_inner())
    }
}
