use std::path::Path;

use clap::{Args, Subcommand};

use healer_db::json::{parse_document, parse_filter};

use crate::commands::{print_document, print_documents};
use crate::session::Session;

#[derive(Args)]
pub struct DocumentArgs {
    #[command(subcommand)]
    pub action: DocumentAction,
}

#[derive(Subcommand)]
pub enum DocumentAction {
    /// Print every document in a collection
    List { database: String, collection: String },
    /// Print documents matching a JSON filter
    Query {
        database: String,
        collection: String,
        filter: String,
    },
    /// Print one document by ObjectId
    Get {
        database: String,
        collection: String,
        id: String,
    },
    /// Print whether a document with this ObjectId exists
    Check {
        database: String,
        collection: String,
        id: String,
    },
    /// Insert one JSON object
    Insert {
        database: String,
        collection: String,
        json: String,
    },
    /// Insert a JSON array of objects
    InsertMany {
        database: String,
        collection: String,
        json: String,
    },
    /// Delete one document by ObjectId
    Delete {
        database: String,
        collection: String,
        id: String,
    },
    /// Delete documents matching a JSON filter (omit to delete all)
    DeleteMany {
        database: String,
        collection: String,
        filter: Option<String>,
    },
    /// Apply an operator update (e.g. {"$set": {...}}) to matching documents
    Update {
        database: String,
        collection: String,
        filter: String,
        update: String,
    },
    /// Delete documents matching the filter, then insert the replacement
    Replace {
        database: String,
        collection: String,
        filter: String,
        replacement: String,
    },
    /// Count documents, optionally matching a JSON filter
    Count {
        database: String,
        collection: String,
        filter: Option<String>,
    },
}

pub async fn execute(args: DocumentArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        DocumentAction::List { database, collection } => {
            print_documents(&store.list_documents(&database, &collection).await?)?;
        }
        DocumentAction::Query {
            database,
            collection,
            filter,
        } => {
            let filter = parse_filter(Some(&filter))?;
            print_documents(&store.query_documents(&database, &collection, filter).await?)?;
        }
        DocumentAction::Get {
            database,
            collection,
            id,
        } => {
            print_document(&store.get_document(&database, &collection, &id).await?)?;
        }
        DocumentAction::Check {
            database,
            collection,
            id,
        } => {
            println!("{}", store.document_exists(&database, &collection, &id).await?);
        }
        DocumentAction::Insert {
            database,
            collection,
            json,
        } => {
            let id = store.insert_document(&database, &collection, &json).await?;
            println!("Inserted document {id}");
        }
        DocumentAction::InsertMany {
            database,
            collection,
            json,
        } => {
            let count = store.insert_documents(&database, &collection, &json).await?;
            println!("Inserted {count} document(s)");
        }
        DocumentAction::Delete {
            database,
            collection,
            id,
        } => {
            store.delete_document(&database, &collection, &id).await?;
            println!("Deleted document {id}");
        }
        DocumentAction::DeleteMany {
            database,
            collection,
            filter,
        } => {
            let filter = parse_filter(filter.as_deref())?;
            let deleted = store.delete_documents(&database, &collection, filter).await?;
            println!("Deleted {deleted} document(s)");
        }
        DocumentAction::Update {
            database,
            collection,
            filter,
            update,
        } => {
            let counts = store
                .update_documents(
                    &database,
                    &collection,
                    parse_filter(Some(&filter))?,
                    parse_document(&update)?,
                )
                .await?;
            println!("Matched {}, modified {}", counts.matched, counts.modified);
        }
        DocumentAction::Replace {
            database,
            collection,
            filter,
            replacement,
        } => {
            let outcome = store
                .replace_documents(
                    &database,
                    &collection,
                    parse_filter(Some(&filter))?,
                    parse_document(&replacement)?,
                )
                .await?;
            println!(
                "Removed {} document(s), inserted {}",
                outcome.removed, outcome.inserted_id
            );
        }
        DocumentAction::Count {
            database,
            collection,
            filter,
        } => {
            let filter = parse_filter(filter.as_deref())?;
            println!("{}", store.count_documents(&database, &collection, filter).await?);
        }
    }

    session.close().await;
    Ok(())
}
