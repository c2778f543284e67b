use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;

/// Process-wide shared state, constructed once at startup and injected
/// into every handler. The store handle is the only data dependency.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,

    pub store: Store,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self {
            config: Arc::new(config),
            store,
        })
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}
