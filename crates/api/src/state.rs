use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::AssetStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: techhub_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractors).
    pub config: Arc<ServerConfig>,
    /// Local object storage for uploaded product images.
    pub assets: Arc<AssetStore>,
}

impl AppState {
    pub fn new(pool: techhub_db::DbPool, config: ServerConfig) -> Self {
        let assets = AssetStore::new(
            config.storage.root.clone(),
            config.storage.public_base_url.clone(),
        );
        Self {
            pool,
            config: Arc::new(config),
            assets: Arc::new(assets),
        }
    }
}
