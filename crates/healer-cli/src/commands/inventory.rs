use std::path::Path;

use clap::Args;

use healer_db::inventory::inventory;

use crate::session::Session;

#[derive(Args)]
pub struct InventoryArgs {
    /// Only these databases (default: all user databases)
    pub databases: Vec<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: InventoryArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;
    let summaries = inventory(&session.store, &args.databases).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{:<16} {:<32} {}", "DATABASE", "COLLECTION", "DOCUMENTS");
        println!("{}", "-".repeat(60));
        for s in &summaries {
            println!("{:<16} {:<32} {}", s.database, s.collection, s.document_count);
        }
    }

    session.close().await;
    Ok(())
}
