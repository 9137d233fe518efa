use clap::Subcommand;

use healer_db::json::to_relaxed_json;
use healer_db::Document;

pub mod collection;
pub mod db;
pub mod document;
pub mod domain;
pub mod index;
pub mod inventory;
pub mod node;
pub mod purge;
pub mod setup;
pub mod subdomain;
pub mod target;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Create every configured database that does not exist yet
    Setup(setup::SetupArgs),
    /// Drop every non-system database
    Purge(purge::PurgeArgs),
    /// Validate the config file without connecting
    Validate,
    /// List user collections with estimated document counts
    Inventory(inventory::InventoryArgs),
    /// Database-level operations
    Db(db::DbArgs),
    /// Collection-level operations
    Collection(collection::CollectionArgs),
    /// Document-level operations (JSON in, relaxed extended JSON out)
    Document(document::DocumentArgs),
    /// Index operations
    Index(index::IndexArgs),
    /// Add, remove or check a target across the target-based databases
    Target(target::TargetArgs),
    /// Domain documents inside a target collection
    Domain(domain::DomainArgs),
    /// Subdomains of a domain document
    Subdomain(subdomain::SubdomainArgs),
    /// Directories, files and parameters below a subdomain
    Node(node::NodeArgs),
}

pub(crate) fn print_documents(documents: &[Document]) -> anyhow::Result<()> {
    for document in documents {
        print_document(document)?;
    }
    Ok(())
}

pub(crate) fn print_document(document: &Document) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&to_relaxed_json(document))?);
    Ok(())
}

pub(crate) fn print_names(names: &[String]) {
    if names.is_empty() {
        println!("(none)");
    }
    for name in names {
        println!("{name}");
    }
}
