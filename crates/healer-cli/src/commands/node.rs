use std::path::Path;

use clap::{Args, Subcommand};

use crate::session::Session;

/// Location of a subdomain inside the hierarchy.
#[derive(Args)]
pub struct SubdomainPath {
    pub database: String,
    pub target: String,
    pub domain: String,
    pub subdomain: String,
}

#[derive(Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub action: NodeAction,
}

#[derive(Subcommand)]
pub enum NodeAction {
    /// Add a directory (e.g. /admin) under a subdomain
    Directory {
        #[command(flatten)]
        at: SubdomainPath,
        path: String,
    },
    /// Add a file (e.g. /admin/login.php) under a directory
    File {
        #[command(flatten)]
        at: SubdomainPath,
        directory: String,
        path: String,
    },
    /// Add a parameter name under a file
    Parameter {
        #[command(flatten)]
        at: SubdomainPath,
        directory: String,
        file: String,
        parameter: String,
    },
}

pub async fn execute(args: NodeArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let store = &session.store;

    match args.action {
        NodeAction::Directory { at, path } => {
            store
                .add_directory(&at.database, &at.target, &at.domain, &at.subdomain, &path)
                .await?;
            println!("Added directory '{path}' to '{}'", at.subdomain);
        }
        NodeAction::File {
            at,
            directory,
            path,
        } => {
            store
                .add_file(
                    &at.database,
                    &at.target,
                    &at.domain,
                    &at.subdomain,
                    &directory,
                    &path,
                )
                .await?;
            println!("Added file '{path}' to '{directory}'");
        }
        NodeAction::Parameter {
            at,
            directory,
            file,
            parameter,
        } => {
            store
                .add_parameter(
                    &at.database,
                    &at.target,
                    &at.domain,
                    &at.subdomain,
                    &directory,
                    &file,
                    &parameter,
                )
                .await?;
            println!("Added parameter '{parameter}' to '{file}'");
        }
    }

    session.close().await;
    Ok(())
}
