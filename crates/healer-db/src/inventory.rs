use serde::Serialize;

use healer_core::error::{HealerError, HealerResult};
use healer_core::names::{is_system_collection, is_system_database};

use crate::store::MongoStore;

/// One collection and its estimated size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub database: String,
    pub collection: String,
    pub document_count: u64,
}

/// Keep a database when it is user data and passes the optional filter.
pub fn include_database(name: &str, filter_databases: &[String]) -> bool {
    if is_system_database(name) {
        return false;
    }
    filter_databases.is_empty() || filter_databases.iter().any(|f| f == name)
}

/// Walk user databases and their collections with estimated document counts.
pub async fn inventory(
    store: &MongoStore,
    filter_databases: &[String],
) -> HealerResult<Vec<CollectionSummary>> {
    let mut summaries = Vec::new();

    for db_name in store.list_databases().await? {
        if !include_database(&db_name, filter_databases) {
            continue;
        }

        for coll_name in store.list_collections(&db_name).await? {
            if is_system_collection(&coll_name) {
                continue;
            }

            let document_count = store
                .coll(&db_name, &coll_name)
                .estimated_document_count()
                .await
                .map_err(|e| {
                    HealerError::driver(format!("counting '{db_name}.{coll_name}'"), e)
                })?;

            summaries.push(CollectionSummary {
                database: db_name.clone(),
                collection: coll_name,
                document_count,
            });
        }
    }

    tracing::info!(collections = summaries.len(), "Inventory complete");
    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_database() {
        assert!(include_database("enum", &[]));
        assert!(!include_database("admin", &[]));
        assert!(!include_database("local", &["local".to_string()]));

        let filter = vec!["vuln".to_string()];
        assert!(include_database("vuln", &filter));
        assert!(!include_database("enum", &filter));
    }
}
