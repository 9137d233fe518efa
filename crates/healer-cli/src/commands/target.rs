use std::path::Path;

use clap::{Args, Subcommand};

use healer_core::provision;

use crate::session::Session;

#[derive(Args)]
pub struct TargetArgs {
    #[command(subcommand)]
    pub action: TargetAction,
}

#[derive(Subcommand)]
pub enum TargetAction {
    /// Create the target collection in every target-based database
    Add {
        target: String,
        /// Only this database; fails if the target already exists there
        #[arg(long)]
        database: Option<String>,
    },
    /// Drop the target collection from every target-based database
    Remove {
        target: String,
        /// Only this database; fails if the target does not exist there
        #[arg(long)]
        database: Option<String>,
    },
    /// Show which target-based databases hold the target
    Check {
        target: String,
        #[arg(long)]
        database: Option<String>,
    },
}

pub async fn execute(args: TargetArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let (store, config) = (&session.store, &session.config);

    match args.action {
        TargetAction::Add { target, database } => match database {
            Some(db) => {
                store.add_target(&db, &target).await?;
                println!("Added target '{target}' to '{db}'");
            }
            None => print!("{}", provision::add_target(store, config, &target).await?),
        },
        TargetAction::Remove { target, database } => match database {
            Some(db) => {
                store.remove_target(&db, &target).await?;
                println!("Removed target '{target}' from '{db}'");
            }
            None => print!("{}", provision::remove_target(store, config, &target).await?),
        },
        TargetAction::Check { target, database } => match database {
            Some(db) => println!("{}", store.target_exists(&db, &target).await?),
            None => print!("{}", provision::target_presence(store, config, &target).await?),
        },
    }

    session.close().await;
    Ok(())
}
