use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::store::{KvStore, MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KvStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Result<Self> {
        Ok(Self::with_store(Arc::new(MemoryStore::new()), config))
    }

    /// Mount a specific store binding (alternate backend, tests).
    pub fn with_store(store: Arc<dyn KvStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
