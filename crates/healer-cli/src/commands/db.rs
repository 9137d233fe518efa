use std::path::Path;

use clap::{Args, Subcommand};

use crate::commands::print_names;
use crate::session::Session;

#[derive(Args)]
pub struct DbArgs {
    #[command(subcommand)]
    pub action: DbAction,
}

#[derive(Subcommand)]
pub enum DbAction {
    /// List databases
    List {
        /// Include admin, local and config
        #[arg(long)]
        all: bool,
    },
    /// Print whether a database exists
    Check { name: String },
    /// Create a database (fails if it exists)
    Create { name: String },
    /// Drop a database (fails if it does not exist)
    Drop { name: String },
    /// Print the number of databases
    Count,
}

pub async fn execute(args: DbArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        DbAction::List { all } => {
            let names = if all {
                store.list_databases().await?
            } else {
                store.list_user_databases().await?
            };
            print_names(&names);
        }
        DbAction::Check { name } => {
            println!("{}", store.database_exists(&name).await?);
        }
        DbAction::Create { name } => {
            store.create_database(&name).await?;
            println!("Created database '{name}'");
        }
        DbAction::Drop { name } => {
            store.drop_database(&name).await?;
            println!("Dropped database '{name}'");
        }
        DbAction::Count => {
            println!("{}", store.count_databases().await?);
        }
    }

    session.close().await;
    Ok(())
}
