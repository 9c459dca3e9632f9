use std::sync::Arc;

use mediaconv_core::{Config, Converter, FileStore};

/// Shared application state
pub struct AppState {
    config: Config,
    converter: Arc<dyn Converter>,
    store: Arc<FileStore>,
}

impl AppState {
    pub fn new(config: Config, converter: Arc<dyn Converter>, store: Arc<FileStore>) -> Self {
        Self {
            config,
            converter,
            store,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn converter(&self) -> &dyn Converter {
        self.converter.as_ref()
    }

    pub fn store(&self) -> &FileStore {
        self.store.as_ref()
    }
}
