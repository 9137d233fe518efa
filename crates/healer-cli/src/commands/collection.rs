use std::path::Path;

use clap::{Args, Subcommand};

use crate::commands::print_names;
use crate::session::Session;

#[derive(Args)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub action: CollectionAction,
}

#[derive(Subcommand)]
pub enum CollectionAction {
    /// List collections in a database
    List { database: String },
    /// Print whether a collection exists
    Check { database: String, collection: String },
    /// Create a collection (fails if it exists)
    Create { database: String, collection: String },
    /// Drop a collection (fails if it does not exist)
    Drop { database: String, collection: String },
    /// Drop every non-system collection in a database
    DropAll { database: String },
    /// Print the number of collections in a database
    Count { database: String },
}

pub async fn execute(args: CollectionArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        CollectionAction::List { database } => {
            print_names(&store.list_collections(&database).await?);
        }
        CollectionAction::Check { database, collection } => {
            println!("{}", store.collection_exists(&database, &collection).await?);
        }
        CollectionAction::Create { database, collection } => {
            store.create_collection(&database, &collection).await?;
            println!("Created collection '{database}.{collection}'");
        }
        CollectionAction::Drop { database, collection } => {
            store.drop_collection(&database, &collection).await?;
            println!("Dropped collection '{database}.{collection}'");
        }
        CollectionAction::DropAll { database } => {
            let dropped = store.drop_all_collections(&database).await?;
            println!("Dropped {} collection(s) from '{database}'", dropped.len());
        }
        CollectionAction::Count { database } => {
            println!("{}", store.count_collections(&database).await?);
        }
    }

    session.close().await;
    Ok(())
}
