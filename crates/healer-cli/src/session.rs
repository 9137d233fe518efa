use std::path::Path;

use healer_core::config::HealerConfig;
use healer_db::MongoStore;

/// Loaded config plus a live connection, shared by every data command.
pub struct Session {
    pub config: HealerConfig,
    pub store: MongoStore,
}

impl Session {
    pub async fn open(config_path: &Path) -> anyhow::Result<Self> {
        let config = HealerConfig::from_file(config_path)?;
        tracing::info!(
            path = %config_path.display(),
            databases = config.databases().len(),
            "Loaded configuration"
        );
        let store = MongoStore::connect(&config).await?;
        Ok(Self { config, store })
    }

    pub async fn close(self) {
        self.store.shutdown().await;
    }
}
