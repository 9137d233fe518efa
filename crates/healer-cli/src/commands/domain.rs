use std::path::Path;

use clap::{Args, Subcommand};

use healer_db::hierarchy::DomainNode;

use crate::session::Session;

#[derive(Args)]
pub struct DomainArgs {
    #[command(subcommand)]
    pub action: DomainAction,
}

#[derive(Subcommand)]
pub enum DomainAction {
    /// Add a domain document to a target
    Add {
        database: String,
        target: String,
        domain: String,
    },
    /// Print whether a domain document exists
    Check {
        database: String,
        target: String,
        domain: String,
    },
    /// List the domains of a target
    List { database: String, target: String },
    /// Print a domain and everything below it
    Show {
        database: String,
        target: String,
        domain: String,
    },
}

pub async fn execute(args: DomainArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        DomainAction::Add {
            database,
            target,
            domain,
        } => {
            let id = store.add_domain(&database, &target, &domain).await?;
            println!("Added domain '{domain}' ({id})");
        }
        DomainAction::Check {
            database,
            target,
            domain,
        } => {
            println!("{}", store.domain_exists(&database, &target, &domain).await?);
        }
        DomainAction::List { database, target } => {
            let domains = store.list_domains(&database, &target).await?;
            if domains.is_empty() {
                println!("(none)");
            }
            for node in &domains {
                println!("{:<40} {} subdomain(s)", node.domain, node.subdomains.len());
            }
        }
        DomainAction::Show {
            database,
            target,
            domain,
        } => {
            print_tree(&store.get_domain(&database, &target, &domain).await?);
        }
    }

    session.close().await;
    Ok(())
}

fn print_tree(node: &DomainNode) {
    println!("{}", node.domain);
    for sub in &node.subdomains {
        println!("  {}", sub.subdomain);
        for dir in &sub.directories {
            println!("    {}", dir.path);
            for file in &dir.files {
                if file.parameters.is_empty() {
                    println!("      {}", file.path);
                } else {
                    println!("      {}?{}", file.path, file.parameters.join("&"));
                }
            }
        }
    }
}
