use std::path::Path;

use clap::{Args, Subcommand};

use crate::commands::print_names;
use crate::session::Session;

#[derive(Args)]
pub struct IndexArgs {
    #[command(subcommand)]
    pub action: IndexAction,
}

#[derive(Subcommand)]
pub enum IndexAction {
    /// Create a unique ascending index on one field
    Unique {
        database: String,
        collection: String,
        field: String,
    },
    /// List index names of a collection
    List { database: String, collection: String },
}

pub async fn execute(args: IndexArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        IndexAction::Unique {
            database,
            collection,
            field,
        } => {
            let name = store.add_unique_index(&database, &collection, &field).await?;
            println!("Created index '{name}'");
        }
        IndexAction::List { database, collection } => {
            print_names(&store.list_indexes(&database, &collection).await?);
        }
    }

    session.close().await;
    Ok(())
}
