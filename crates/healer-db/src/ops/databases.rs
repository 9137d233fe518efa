use mongodb::bson::doc;

use healer_core::error::{HealerError, HealerResult};
use healer_core::layer::Layer;
use healer_core::names::{
    contains_name, is_system_database, require_listed, require_unlisted, validate_database_name,
};
use healer_core::provision;
use healer_core::report::ProvisionReport;

use crate::store::MongoStore;

/// Collection written to materialize an otherwise empty database.
pub const EXISTS_MARKER: &str = "exists";

impl MongoStore {
    pub async fn list_databases(&self) -> HealerResult<Vec<String>> {
        let names = self
            .client()
            .list_database_names()
            .await
            .map_err(|e| HealerError::driver("listing databases", e))?;
        tracing::debug!(count = names.len(), "Listed databases");
        Ok(names)
    }

    /// Databases other than `admin`, `local` and `config`.
    pub async fn list_user_databases(&self) -> HealerResult<Vec<String>> {
        Ok(self
            .list_databases()
            .await?
            .into_iter()
            .filter(|name| !is_system_database(name))
            .collect())
    }

    pub async fn database_exists(&self, database: &str) -> HealerResult<bool> {
        Ok(contains_name(&self.list_databases().await?, database))
    }

    /// MongoDB creates databases lazily, so write a marker document into
    /// `exists` to make the new database visible.
    pub async fn create_database(&self, database: &str) -> HealerResult<()> {
        validate_database_name(database)?;
        require_unlisted(&self.list_databases().await?, Layer::Database, database)?;

        self.coll(database, EXISTS_MARKER)
            .insert_one(doc! { "exists": true })
            .await
            .map_err(|e| HealerError::driver(format!("creating database '{database}'"), e))?;

        tracing::info!(database, "Created database");
        Ok(())
    }

    pub async fn drop_database(&self, database: &str) -> HealerResult<()> {
        require_listed(&self.list_databases().await?, Layer::Database, database)?;

        self.db(database)
            .drop()
            .await
            .map_err(|e| HealerError::driver(format!("dropping database '{database}'"), e))?;

        tracing::info!(database, "Dropped database");
        Ok(())
    }

    /// Drop every non-system database.
    pub async fn purge_databases(&self) -> HealerResult<ProvisionReport> {
        provision::purge(self).await
    }

    pub async fn count_databases(&self) -> HealerResult<usize> {
        Ok(self.list_databases().await?.len())
    }
}
