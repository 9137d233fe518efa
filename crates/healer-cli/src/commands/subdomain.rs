use std::path::Path;

use clap::{Args, Subcommand};

use crate::session::Session;

#[derive(Args)]
pub struct SubdomainArgs {
    #[command(subcommand)]
    pub action: SubdomainAction,
}

#[derive(Subcommand)]
pub enum SubdomainAction {
    /// Add a subdomain, creating the domain document if needed
    Add {
        database: String,
        target: String,
        domain: String,
        subdomain: String,
    },
    /// Print whether a subdomain is recorded under a domain
    Check {
        database: String,
        target: String,
        domain: String,
        subdomain: String,
    },
    /// Remove a subdomain and everything below it
    Remove {
        database: String,
        target: String,
        domain: String,
        subdomain: String,
    },
}

pub async fn execute(args: SubdomainArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        SubdomainAction::Add {
            database,
            target,
            domain,
            subdomain,
        } => {
            store
                .add_subdomain(&database, &target, &domain, &subdomain)
                .await?;
            println!("Added subdomain '{subdomain}' to '{domain}'");
        }
        SubdomainAction::Check {
            database,
            target,
            domain,
            subdomain,
        } => {
            let exists = store
                .subdomain_exists(&database, &target, &domain, &subdomain)
                .await?;
            println!("{exists}");
        }
        SubdomainAction::Remove {
            database,
            target,
            domain,
            subdomain,
        } => {
            store
                .remove_subdomain(&database, &target, &domain, &subdomain)
                .await?;
            println!("Removed subdomain '{subdomain}' from '{domain}'");
        }
    }

    session.close().await;
    Ok(())
}
