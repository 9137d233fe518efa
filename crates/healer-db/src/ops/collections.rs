use healer_core::error::{HealerError, HealerResult};
use healer_core::layer::Layer;
use healer_core::names::{
    contains_name, is_system_collection, require_listed, require_unlisted, validate_collection_name,
};

use crate::store::MongoStore;

impl MongoStore {
    pub async fn list_collections(&self, database: &str) -> HealerResult<Vec<String>> {
        let names = self
            .db(database)
            .list_collection_names()
            .await
            .map_err(|e| {
                HealerError::driver(format!("listing collections in '{database}'"), e)
            })?;
        tracing::debug!(database, count = names.len(), "Listed collections");
        Ok(names)
    }

    pub async fn collection_exists(&self, database: &str, collection: &str) -> HealerResult<bool> {
        Ok(contains_name(&self.list_collections(database).await?, collection))
    }

    pub async fn create_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
        validate_collection_name(collection)?;
        let existing = self.list_collections(database).await?;
        require_unlisted(&existing, Layer::Collection, collection)?;

        self.db(database)
            .create_collection(collection)
            .await
            .map_err(|e| {
                HealerError::driver(format!("creating collection '{database}.{collection}'"), e)
            })?;

        tracing::info!(database, collection, "Created collection");
        Ok(())
    }

    pub async fn drop_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
        let existing = self.list_collections(database).await?;
        require_listed(&existing, Layer::Collection, collection)?;

        self.coll(database, collection)
            .drop()
            .await
            .map_err(|e| {
                HealerError::driver(format!("dropping collection '{database}.{collection}'"), e)
            })?;

        tracing::info!(database, collection, "Dropped collection");
        Ok(())
    }

    /// Drop every non-system collection in `database`. Returns the dropped names.
    pub async fn drop_all_collections(&self, database: &str) -> HealerResult<Vec<String>> {
        let mut dropped = Vec::new();
        for collection in self.list_collections(database).await? {
            if is_system_collection(&collection) {
                continue;
            }
            self.drop_collection(database, &collection).await?;
            dropped.push(collection);
        }
        Ok(dropped)
    }

    pub async fn count_collections(&self, database: &str) -> HealerResult<usize> {
        Ok(self.list_collections(database).await?.len())
    }
}
