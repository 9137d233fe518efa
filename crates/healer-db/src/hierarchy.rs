//! Typed view of a domain document and its nested layers.
//!
//! ```text
//! { domain, subdomains: [ { subdomain, directories: [ { path, files: [ { path, parameters } ] } ] } ] }
//! ```
//!
//! Arrays missing from stored documents decode as empty. Fields the nodes do
//! not model are kept in `extra` at every level, so a write-back never loses
//! them. All lookups are exact string matches.

use mongodb::bson::{self, doc, Bson, Document};
use serde::{Deserialize, Serialize};

use healer_core::error::{HealerError, HealerResult};
use healer_core::layer::Layer;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainNode {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Bson>,
    pub domain: String,
    #[serde(default)]
    pub subdomains: Vec<SubdomainNode>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubdomainNode {
    pub subdomain: String,
    #[serde(default)]
    pub directories: Vec<DirectoryNode>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryNode {
    pub path: String,
    #[serde(default)]
    pub files: Vec<FileNode>,
    #[serde(flatten)]
    pub extra: Document,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub path: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(flatten)]
    pub extra: Document,
}

fn require_name(layer: Layer, name: &str) -> HealerResult<()> {
    if name.trim().is_empty() {
        return Err(HealerError::InvalidName {
            layer,
            name: name.to_string(),
            reason: "name is empty".into(),
        });
    }
    Ok(())
}

impl DomainNode {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            ..Self::default()
        }
    }

    pub fn subdomain(&self, name: &str) -> Option<&SubdomainNode> {
        self.subdomains.iter().find(|s| s.subdomain == name)
    }

    fn subdomain_mut(&mut self, name: &str) -> HealerResult<&mut SubdomainNode> {
        self.subdomains
            .iter_mut()
            .find(|s| s.subdomain == name)
            .ok_or_else(|| HealerError::not_found(Layer::Subdomain, name))
    }

    pub fn has_subdomain(&self, name: &str) -> bool {
        self.subdomain(name).is_some()
    }

    pub fn subdomain_names(&self) -> Vec<&str> {
        self.subdomains.iter().map(|s| s.subdomain.as_str()).collect()
    }

    pub fn insert_subdomain(&mut self, name: &str) -> HealerResult<()> {
        require_name(Layer::Subdomain, name)?;
        if self.has_subdomain(name) {
            return Err(HealerError::already_exists(Layer::Subdomain, name));
        }
        self.subdomains.push(SubdomainNode {
            subdomain: name.to_string(),
            ..SubdomainNode::default()
        });
        Ok(())
    }

    pub fn remove_subdomain(&mut self, name: &str) -> HealerResult<SubdomainNode> {
        let idx = self
            .subdomains
            .iter()
            .position(|s| s.subdomain == name)
            .ok_or_else(|| HealerError::not_found(Layer::Subdomain, name))?;
        Ok(self.subdomains.remove(idx))
    }

    pub fn insert_directory(&mut self, subdomain: &str, path: &str) -> HealerResult<()> {
        require_name(Layer::Directory, path)?;
        let sub = self.subdomain_mut(subdomain)?;
        if sub.directories.iter().any(|d| d.path == path) {
            return Err(HealerError::already_exists(Layer::Directory, path));
        }
        sub.directories.push(DirectoryNode {
            path: path.to_string(),
            ..DirectoryNode::default()
        });
        Ok(())
    }

    pub fn insert_file(&mut self, subdomain: &str, directory: &str, path: &str) -> HealerResult<()> {
        require_name(Layer::File, path)?;
        let dir = self
            .subdomain_mut(subdomain)?
            .directories
            .iter_mut()
            .find(|d| d.path == directory)
            .ok_or_else(|| HealerError::not_found(Layer::Directory, directory))?;
        if dir.files.iter().any(|f| f.path == path) {
            return Err(HealerError::already_exists(Layer::File, path));
        }
        dir.files.push(FileNode {
            path: path.to_string(),
            ..FileNode::default()
        });
        Ok(())
    }

    pub fn insert_parameter(
        &mut self,
        subdomain: &str,
        directory: &str,
        file: &str,
        parameter: &str,
    ) -> HealerResult<()> {
        require_name(Layer::Parameter, parameter)?;
        let file_node = self
            .subdomain_mut(subdomain)?
            .directories
            .iter_mut()
            .find(|d| d.path == directory)
            .ok_or_else(|| HealerError::not_found(Layer::Directory, directory))?
            .files
            .iter_mut()
            .find(|f| f.path == file)
            .ok_or_else(|| HealerError::not_found(Layer::File, file))?;
        if file_node.parameters.iter().any(|p| p == parameter) {
            return Err(HealerError::already_exists(Layer::Parameter, parameter));
        }
        file_node.parameters.push(parameter.to_string());
        Ok(())
    }
}

/// How a domain edit reaches the store.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainWrite {
    /// No document matched; insert this one.
    Insert(DomainNode),
    /// The stored document was changed; write its subdomains back.
    Update(DomainNode),
}

/// New domain document for `add_domain`, given whether one already exists.
pub fn plan_domain_add(domain: &str, exists: bool) -> HealerResult<DomainNode> {
    require_name(Layer::Document, domain)?;
    if exists {
        return Err(HealerError::already_exists(Layer::Document, domain));
    }
    Ok(DomainNode::new(domain))
}

/// Add `subdomain` to the stored domain, or to a fresh domain when none is stored.
pub fn plan_subdomain_add(
    existing: Option<DomainNode>,
    domain: &str,
    subdomain: &str,
) -> HealerResult<DomainWrite> {
    match existing {
        Some(mut node) => {
            node.insert_subdomain(subdomain)?;
            Ok(DomainWrite::Update(node))
        }
        None => {
            let mut node = plan_domain_add(domain, false)?;
            node.insert_subdomain(subdomain)?;
            Ok(DomainWrite::Insert(node))
        }
    }
}

/// Apply `change` to a stored domain. A missing domain is `NotFound`.
pub fn plan_domain_edit<F>(
    existing: Option<DomainNode>,
    domain: &str,
    change: F,
) -> HealerResult<DomainNode>
where
    F: FnOnce(&mut DomainNode) -> HealerResult<()>,
{
    let mut node = existing.ok_or_else(|| HealerError::not_found(Layer::Document, domain))?;
    change(&mut node)?;
    Ok(node)
}

/// Filter and `$set` update writing a node's subdomains back to its document.
pub fn subdomains_update(node: &DomainNode) -> HealerResult<(Document, Document)> {
    let id = node
        .id
        .clone()
        .ok_or_else(|| HealerError::InvalidDocument(format!("domain '{}' has no _id", node.domain)))?;
    let subdomains = bson::to_bson(&node.subdomains)
        .map_err(|e| HealerError::InvalidDocument(format!("encoding subdomains: {e}")))?;
    Ok((doc! { "_id": id }, doc! { "$set": { "subdomains": subdomains } }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    fn sample() -> DomainNode {
        let mut node = DomainNode::new("uber.com");
        node.insert_subdomain("www.uber.com").unwrap();
        node.insert_directory("www.uber.com", "/admin").unwrap();
        node.insert_file("www.uber.com", "/admin", "/admin/login.php").unwrap();
        node
    }

    #[test]
    fn test_subdomain_insert_and_duplicate() {
        let mut node = DomainNode::new("uber.com");
        node.insert_subdomain("www.uber.com").unwrap();
        node.insert_subdomain("api.uber.com").unwrap();
        assert_eq!(node.subdomain_names(), vec!["www.uber.com", "api.uber.com"]);

        let err = node.insert_subdomain("www.uber.com").unwrap_err();
        assert!(err.is_already_exists());
        assert!(node.insert_subdomain(" ").is_err());
    }

    #[test]
    fn test_remove_subdomain() {
        let mut node = sample();
        let removed = node.remove_subdomain("www.uber.com").unwrap();
        assert_eq!(removed.directories.len(), 1);
        assert!(!node.has_subdomain("www.uber.com"));
        assert!(node.remove_subdomain("www.uber.com").unwrap_err().is_not_found());
    }

    #[test]
    fn test_nested_layers_require_parents() {
        let mut node = sample();

        let err = node.insert_directory("ghost.uber.com", "/x").unwrap_err();
        assert!(matches!(err, HealerError::NotFound { layer: Layer::Subdomain, .. }));

        let err = node.insert_file("www.uber.com", "/nope", "/nope/a").unwrap_err();
        assert!(matches!(err, HealerError::NotFound { layer: Layer::Directory, .. }));

        let err = node
            .insert_parameter("www.uber.com", "/admin", "/admin/missing.php", "id")
            .unwrap_err();
        assert!(matches!(err, HealerError::NotFound { layer: Layer::File, .. }));

        node.insert_parameter("www.uber.com", "/admin", "/admin/login.php", "username")
            .unwrap();
        let err = node
            .insert_parameter("www.uber.com", "/admin", "/admin/login.php", "username")
            .unwrap_err();
        assert!(err.is_already_exists());

        let file = &node.subdomain("www.uber.com").unwrap().directories[0].files[0];
        assert_eq!(file.parameters, vec!["username"]);
    }

    #[test]
    fn test_decodes_sparse_documents() {
        let stored = doc! {
            "domain": "semrush.com",
            "subdomains": [ { "subdomain": "www.semrush.com" } ],
            "notes": "kept as is",
        };
        let node: DomainNode = bson::from_document(stored).unwrap();
        assert!(node.id.is_none());
        assert_eq!(node.extra.get_str("notes").unwrap(), "kept as is");
        assert!(node.has_subdomain("www.semrush.com"));
        assert!(node.subdomain("www.semrush.com").unwrap().directories.is_empty());

        let bare: DomainNode = bson::from_document(doc! { "domain": "a.com" }).unwrap();
        assert!(bare.subdomains.is_empty());
    }

    #[test]
    fn test_new_node_serializes_without_id() {
        let doc = bson::to_document(&DomainNode::new("a.com")).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("domain").unwrap(), "a.com");
    }

    #[test]
    fn test_unmodelled_fields_survive_nested_edits() {
        let stored = doc! {
            "_id": ObjectId::new(),
            "domain": "uber.com",
            "subdomains": [
                { "subdomain": "www.uber.com", "ip": "1.2.3.4", "alive": true,
                  "directories": [ { "path": "/api", "status": 403,
                                     "files": [ { "path": "/api/v1", "size": 512 } ] } ] }
            ],
        };
        let mut node: DomainNode = bson::from_document(stored).unwrap();
        node.insert_directory("www.uber.com", "/admin").unwrap();
        node.insert_parameter("www.uber.com", "/api", "/api/v1", "key").unwrap();

        let (_, update) = subdomains_update(&node).unwrap();
        let written = update.get_document("$set").unwrap().get_array("subdomains").unwrap();
        let sub = written[0].as_document().unwrap();
        assert_eq!(sub.get_str("ip").unwrap(), "1.2.3.4");
        assert!(sub.get_bool("alive").unwrap());

        let dirs = sub.get_array("directories").unwrap();
        assert_eq!(dirs.len(), 2);
        let api = dirs[0].as_document().unwrap();
        assert_eq!(api.get_i32("status").unwrap(), 403);
        let file = api.get_array("files").unwrap()[0].as_document().unwrap();
        assert_eq!(file.get_i32("size").unwrap(), 512);
        assert_eq!(file.get_array("parameters").unwrap(), &vec![Bson::from("key")]);
    }

    #[test]
    fn test_decodes_non_object_id() {
        let node: DomainNode =
            bson::from_document(doc! { "_id": "uber.com", "domain": "uber.com" }).unwrap();
        assert_eq!(node.id, Some(Bson::from("uber.com")));

        let (filter, _) = subdomains_update(&node).unwrap();
        assert_eq!(filter, doc! { "_id": "uber.com" });
    }

    #[test]
    fn test_object_id_keys_the_write_back() {
        let oid = ObjectId::new();
        let node: DomainNode = bson::from_document(doc! { "_id": oid, "domain": "a.com" }).unwrap();
        let (filter, _) = subdomains_update(&node).unwrap();
        assert_eq!(filter, doc! { "_id": oid });

        let err = subdomains_update(&DomainNode::new("a.com")).unwrap_err();
        assert!(matches!(err, HealerError::InvalidDocument(_)));
    }

    #[test]
    fn test_plan_domain_add() {
        let node = plan_domain_add("uber.com", false).unwrap();
        assert_eq!(node.domain, "uber.com");
        assert!(node.id.is_none());

        assert!(plan_domain_add("uber.com", true).unwrap_err().is_already_exists());
        let err = plan_domain_add(" ", false).unwrap_err();
        assert!(matches!(err, HealerError::InvalidName { layer: Layer::Document, .. }));
    }

    #[test]
    fn test_plan_subdomain_add_creates_missing_domain() {
        match plan_subdomain_add(None, "uber.com", "www.uber.com").unwrap() {
            DomainWrite::Insert(node) => {
                assert_eq!(node.domain, "uber.com");
                assert!(node.has_subdomain("www.uber.com"));
            }
            other => panic!("expected insert, got {other:?}"),
        }
    }

    #[test]
    fn test_plan_subdomain_add_updates_existing_domain() {
        let stored = bson::from_document::<DomainNode>(doc! {
            "_id": "uber.com",
            "domain": "uber.com",
            "owner": "sec",
            "subdomains": [ { "subdomain": "www.uber.com" } ],
        })
        .unwrap();

        match plan_subdomain_add(Some(stored.clone()), "uber.com", "api.uber.com").unwrap() {
            DomainWrite::Update(node) => {
                assert_eq!(node.subdomain_names(), vec!["www.uber.com", "api.uber.com"]);
                assert_eq!(node.id, stored.id);
                assert_eq!(node.extra.get_str("owner").unwrap(), "sec");
            }
            other => panic!("expected update, got {other:?}"),
        }

        let err = plan_subdomain_add(Some(stored), "uber.com", "www.uber.com").unwrap_err();
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_plan_domain_edit() {
        let err = plan_domain_edit(None, "uber.com", |_| Ok(())).unwrap_err();
        assert!(matches!(err, HealerError::NotFound { layer: Layer::Document, .. }));

        let node = plan_domain_edit(Some(sample()), "uber.com", |n| {
            n.insert_file("www.uber.com", "/admin", "/admin/index.php")
        })
        .unwrap();
        assert_eq!(node.subdomain("www.uber.com").unwrap().directories[0].files.len(), 2);

        let err = plan_domain_edit(Some(sample()), "uber.com", |n| {
            n.remove_subdomain("ghost.uber.com").map(|_| ())
        })
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
