//! Conversion between JSON text at the edge and BSON documents.

use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;

use healer_core::error::{HealerError, HealerResult};

/// Parse a JSON object (extended JSON accepted) into a BSON document.
pub fn parse_document(text: &str) -> HealerResult<Document> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| HealerError::InvalidDocument(format!("malformed JSON: {e}")))?;
    value_to_document(value)
}

/// Parse a JSON array of objects.
pub fn parse_documents(text: &str) -> HealerResult<Vec<Document>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| HealerError::InvalidDocument(format!("malformed JSON: {e}")))?;
    match value {
        Value::Array(items) => items.into_iter().map(value_to_document).collect(),
        _ => Err(HealerError::InvalidDocument(
            "expected a JSON array of objects".into(),
        )),
    }
}

/// Parse an optional filter; `None` or blank text means "match everything".
pub fn parse_filter(text: Option<&str>) -> HealerResult<Document> {
    match text.map(str::trim) {
        None | Some("") => Ok(Document::new()),
        Some(t) => parse_document(t),
    }
}

pub fn parse_object_id(text: &str) -> HealerResult<ObjectId> {
    ObjectId::parse_str(text.trim()).map_err(|_| HealerError::InvalidId(text.to_string()))
}

pub fn to_relaxed_json(doc: &Document) -> Value {
    Bson::Document(doc.clone()).into_relaxed_extjson()
}

/// Render an inserted `_id`: hex for ObjectIds, relaxed JSON for anything else.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

fn value_to_document(value: Value) -> HealerResult<Document> {
    if !value.is_object() {
        return Err(HealerError::InvalidDocument(format!(
            "expected a JSON object, got {value}"
        )));
    }
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(HealerError::InvalidDocument(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(HealerError::InvalidDocument(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_parse_plain_object() {
        let doc = parse_document(r#"{"domain": "uber.com", "alive": true, "ports": [80, 443]}"#)
            .unwrap();
        assert_eq!(doc.get_str("domain").unwrap(), "uber.com");
        assert!(doc.get_bool("alive").unwrap());
        assert_eq!(doc.get_array("ports").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_extended_json_object_id() {
        let doc = parse_document(r#"{"_id": {"$oid": "64b7f0c2a1b2c3d4e5f60718"}}"#).unwrap();
        assert_eq!(
            doc.get_object_id("_id").unwrap().to_hex(),
            "64b7f0c2a1b2c3d4e5f60718"
        );
    }

    #[test]
    fn test_rejects_non_objects() {
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(HealerError::InvalidDocument(_))
        ));
        assert!(matches!(
            parse_document("{not json"),
            Err(HealerError::InvalidDocument(_))
        ));
        assert!(parse_documents(r#"{"a": 1}"#).is_err());
        assert!(parse_documents(r#"[{"a": 1}, 2]"#).is_err());
    }

    #[test]
    fn test_parse_documents() {
        let docs = parse_documents(r#"[{"domain": "a.com"}, {"domain": "b.com"}]"#).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].get_str("domain").unwrap(), "b.com");
    }

    #[test]
    fn test_blank_filter_matches_all() {
        assert!(parse_filter(None).unwrap().is_empty());
        assert!(parse_filter(Some("  ")).unwrap().is_empty());
        assert_eq!(
            parse_filter(Some(r#"{"domain": "uber.com"}"#)).unwrap(),
            doc! { "domain": "uber.com" }
        );
    }

    #[test]
    fn test_object_id_parsing() {
        let oid = parse_object_id("64b7f0c2a1b2c3d4e5f60718").unwrap();
        assert_eq!(oid.to_hex(), "64b7f0c2a1b2c3d4e5f60718");
        assert!(matches!(parse_object_id("xyz"), Err(HealerError::InvalidId(_))));
    }

    #[test]
    fn test_relaxed_json_and_ids() {
        let oid = ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap();
        let json = to_relaxed_json(&doc! { "_id": oid, "n": 3 });
        assert_eq!(json["_id"]["$oid"], "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(json["n"], 3);

        assert_eq!(id_to_string(&Bson::ObjectId(oid)), "64b7f0c2a1b2c3d4e5f60718");
        assert_eq!(id_to_string(&Bson::String("custom".into())), "custom");
        assert_eq!(id_to_string(&Bson::Int32(7)), "7");
    }
}
