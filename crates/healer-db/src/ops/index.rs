use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;

use healer_core::error::{HealerError, HealerResult};

use crate::store::MongoStore;

/// Ascending single-field index with a uniqueness constraint.
pub fn unique_index_model(field: &str) -> HealerResult<IndexModel> {
    if field.trim().is_empty() {
        return Err(HealerError::InvalidDocument("index field is empty".into()));
    }
    let mut options = IndexOptions::default();
    options.unique = Some(true);
    Ok(IndexModel::builder()
        .keys(doc! { field: 1 })
        .options(options)
        .build())
}

impl MongoStore {
    /// Returns the name of the created index.
    pub async fn add_unique_index(
        &self,
        database: &str,
        collection: &str,
        field: &str,
    ) -> HealerResult<String> {
        let model = unique_index_model(field)?;
        let result = self
            .coll(database, collection)
            .create_index(model)
            .await
            .map_err(|e| {
                HealerError::driver(format!("adding unique index on '{field}'"), e)
            })?;

        tracing::info!(database, collection, index = %result.index_name, "Added unique index");
        Ok(result.index_name)
    }

    pub async fn list_indexes(&self, database: &str, collection: &str) -> HealerResult<Vec<String>> {
        self.coll(database, collection)
            .list_index_names()
            .await
            .map_err(|e| HealerError::driver("listing indexes", e))
    }
}
