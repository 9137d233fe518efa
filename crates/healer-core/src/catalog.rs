use async_trait::async_trait;

use crate::error::HealerResult;

/// Name-level view of a document database: what exists, plus create and drop.
///
/// Provisioning is written against this trait so it can run on any backend.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn database_names(&self) -> HealerResult<Vec<String>>;

    async fn collection_names(&self, database: &str) -> HealerResult<Vec<String>>;

    /// Materialize a database. Fails with `AlreadyExists` if it is present.
    async fn create_database(&self, database: &str) -> HealerResult<()>;

    /// Fails with `NotFound` if the database is absent.
    async fn drop_database(&self, database: &str) -> HealerResult<()>;

    /// Fails with `AlreadyExists` if the collection is present.
    async fn create_collection(&self, database: &str, collection: &str) -> HealerResult<()>;

    /// Fails with `NotFound` if the collection is absent.
    async fn drop_collection(&self, database: &str, collection: &str) -> HealerResult<()>;
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::{BTreeMap, BTreeSet};
    use tokio::sync::Mutex;

    use super::*;
    use crate::error::HealerError;
    use crate::layer::Layer;

    /// In-memory catalog used by provisioning tests.
    #[derive(Default)]
    pub struct MemoryCatalog {
        dbs: Mutex<BTreeMap<String, BTreeSet<String>>>,
        /// Listed by `database_names` but already gone when dropped, as when
        /// another client drops a database between the two calls.
        vanished: BTreeSet<String>,
    }

    impl MemoryCatalog {
        pub fn with_databases(names: &[&str]) -> Self {
            let dbs = names
                .iter()
                .map(|n| (n.to_string(), BTreeSet::from(["exists".to_string()])))
                .collect();
            Self {
                dbs: Mutex::new(dbs),
                vanished: BTreeSet::new(),
            }
        }

        pub fn with_vanished(mut self, names: &[&str]) -> Self {
            self.vanished = names.iter().map(|n| n.to_string()).collect();
            self
        }
    }

    #[async_trait]
    impl Catalog for MemoryCatalog {
        async fn database_names(&self) -> HealerResult<Vec<String>> {
            let dbs = self.dbs.lock().await;
            let names: BTreeSet<String> = dbs.keys().chain(&self.vanished).cloned().collect();
            Ok(names.into_iter().collect())
        }

        async fn collection_names(&self, database: &str) -> HealerResult<Vec<String>> {
            Ok(self
                .dbs
                .lock()
                .await
                .get(database)
                .map(|c| c.iter().cloned().collect())
                .unwrap_or_default())
        }

        async fn create_database(&self, database: &str) -> HealerResult<()> {
            let mut dbs = self.dbs.lock().await;
            if dbs.contains_key(database) {
                return Err(HealerError::already_exists(Layer::Database, database));
            }
            dbs.insert(database.to_string(), BTreeSet::from(["exists".to_string()]));
            Ok(())
        }

        async fn drop_database(&self, database: &str) -> HealerResult<()> {
            self.dbs
                .lock()
                .await
                .remove(database)
                .map(|_| ())
                .ok_or_else(|| HealerError::not_found(Layer::Database, database))
        }

        async fn create_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
            let mut dbs = self.dbs.lock().await;
            let colls = dbs.entry(database.to_string()).or_default();
            if !colls.insert(collection.to_string()) {
                return Err(HealerError::already_exists(Layer::Collection, collection));
            }
            Ok(())
        }

        async fn drop_collection(&self, database: &str, collection: &str) -> HealerResult<()> {
            let mut dbs = self.dbs.lock().await;
            let removed = dbs
                .get_mut(database)
                .map(|c| c.remove(collection))
                .unwrap_or(false);
            if !removed {
                return Err(HealerError::not_found(Layer::Collection, collection));
            }
            Ok(())
        }
    }
}
