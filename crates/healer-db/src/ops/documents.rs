use futures::TryStreamExt;
use mongodb::bson::{doc, Document};

use healer_core::error::{HealerError, HealerResult};
use healer_core::layer::Layer;

use crate::json::{id_to_string, parse_document, parse_documents, parse_object_id};
use crate::store::MongoStore;

/// Matched / modified counts of an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateCounts {
    pub matched: u64,
    pub modified: u64,
}

/// Result of a delete-then-insert replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub removed: u64,
    pub inserted_id: String,
}

/// A lookup by `_id` that matched nothing is `NotFound`.
pub fn require_document(found: Option<Document>, id: &str) -> HealerResult<Document> {
    found.ok_or_else(|| HealerError::not_found(Layer::Document, id))
}

/// An update document must consist only of operators such as `$set`.
pub fn validate_update(update: &Document) -> HealerResult<()> {
    if update.is_empty() {
        return Err(HealerError::InvalidDocument("update is empty".into()));
    }
    if let Some(key) = update.keys().find(|k| !k.starts_with('$')) {
        return Err(HealerError::InvalidDocument(format!(
            "update key '{key}' is not an operator; wrap fields in $set"
        )));
    }
    Ok(())
}

impl MongoStore {
    /// Insert one JSON object. Returns the inserted `_id`.
    pub async fn insert_document(
        &self,
        database: &str,
        collection: &str,
        json: &str,
    ) -> HealerResult<String> {
        let document = parse_document(json)?;
        self.insert_bson(database, collection, document).await
    }

    pub async fn insert_bson(
        &self,
        database: &str,
        collection: &str,
        document: Document,
    ) -> HealerResult<String> {
        let result = self
            .coll(database, collection)
            .insert_one(document)
            .await
            .map_err(|e| HealerError::driver("inserting document", e))?;

        let id = id_to_string(&result.inserted_id);
        tracing::info!(database, collection, id = %id, "Inserted document");
        Ok(id)
    }

    /// Insert a JSON array of objects. Returns how many were inserted.
    pub async fn insert_documents(
        &self,
        database: &str,
        collection: &str,
        json: &str,
    ) -> HealerResult<usize> {
        let documents = parse_documents(json)?;
        if documents.is_empty() {
            return Ok(0);
        }

        let result = self
            .coll(database, collection)
            .insert_many(documents)
            .await
            .map_err(|e| HealerError::driver("inserting documents", e))?;

        let count = result.inserted_ids.len();
        tracing::info!(database, collection, count, "Inserted documents");
        Ok(count)
    }

    pub async fn list_documents(
        &self,
        database: &str,
        collection: &str,
    ) -> HealerResult<Vec<Document>> {
        self.query_documents(database, collection, Document::new())
            .await
    }

    pub async fn query_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> HealerResult<Vec<Document>> {
        let cursor = self
            .coll(database, collection)
            .find(filter)
            .await
            .map_err(|e| HealerError::driver("querying documents", e))?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| HealerError::driver("reading query results", e))?;

        tracing::debug!(database, collection, count = documents.len(), "Queried documents");
        Ok(documents)
    }

    pub async fn get_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> HealerResult<Document> {
        let oid = parse_object_id(id)?;
        self.coll(database, collection)
            .find_one(doc! { "_id": oid })
            .await
            .map_err(|e| HealerError::driver("fetching document", e))
            .and_then(|found| require_document(found, id))
    }

    pub async fn document_exists(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> HealerResult<bool> {
        let oid = parse_object_id(id)?;
        let count = self
            .coll(database, collection)
            .count_documents(doc! { "_id": oid })
            .await
            .map_err(|e| HealerError::driver("checking document", e))?;
        Ok(count > 0)
    }

    /// Delete by `_id`, returning the removed document.
    pub async fn delete_document(
        &self,
        database: &str,
        collection: &str,
        id: &str,
    ) -> HealerResult<Document> {
        let oid = parse_object_id(id)?;
        let removed = self
            .coll(database, collection)
            .find_one_and_delete(doc! { "_id": oid })
            .await
            .map_err(|e| HealerError::driver("deleting document", e))
            .and_then(|found| require_document(found, id))?;

        tracing::info!(database, collection, id, "Deleted document");
        Ok(removed)
    }

    /// Delete every match of `filter`; an empty filter empties the collection.
    pub async fn delete_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> HealerResult<u64> {
        let result = self
            .coll(database, collection)
            .delete_many(filter)
            .await
            .map_err(|e| HealerError::driver("deleting documents", e))?;

        tracing::info!(database, collection, deleted = result.deleted_count, "Deleted documents");
        Ok(result.deleted_count)
    }

    pub async fn update_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> HealerResult<UpdateCounts> {
        validate_update(&update)?;
        let result = self
            .coll(database, collection)
            .update_many(filter, update)
            .await
            .map_err(|e| HealerError::driver("updating documents", e))?;

        tracing::info!(
            database,
            collection,
            matched = result.matched_count,
            modified = result.modified_count,
            "Updated documents"
        );
        Ok(UpdateCounts {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Remove every match of `filter`, then insert `replacement`.
    ///
    /// Not atomic: a failed insert leaves the matches removed.
    pub async fn replace_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> HealerResult<Replacement> {
        let removed = self.delete_documents(database, collection, filter).await?;
        let inserted_id = self.insert_bson(database, collection, replacement).await?;
        Ok(Replacement {
            removed,
            inserted_id,
        })
    }

    pub async fn count_documents(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
    ) -> HealerResult<u64> {
        self.coll(database, collection)
            .count_documents(filter)
            .await
            .map_err(|e| HealerError::driver("counting documents", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_document_is_not_found() {
        let id = "64b7f0c2e13f4a1d2c3b4a59";
        let err = require_document(None, id).unwrap_err();
        assert!(matches!(err, HealerError::NotFound { layer: Layer::Document, .. }));
        assert_eq!(err.to_string(), format!("document '{id}' does not exist"));

        let found = require_document(Some(doc! { "domain": "uber.com" }), id).unwrap();
        assert_eq!(found.get_str("domain").unwrap(), "uber.com");
    }

    #[test]
    fn test_update_requires_operators() {
        assert!(validate_update(&doc! { "$set": { "alive": true } }).is_ok());
        assert!(validate_update(&doc! { "$set": { "a": 1 }, "$unset": { "b": "" } }).is_ok());
        assert!(validate_update(&doc! { "alive": true }).is_err());
        assert!(validate_update(&doc! { "$set": { "a": 1 }, "b": 2 }).is_err());
        assert!(validate_update(&Document::new()).is_err());
    }
}
