use std::path::Path;

use clap::Args;

use crate::session::Session;

#[derive(Args)]
pub struct PurgeArgs {
    /// Confirm that every non-system database should be dropped
    #[arg(long)]
    pub yes: bool,
}

pub async fn execute(args: PurgeArgs, config_path: &Path) -> anyhow::Result<()> {
    if !args.yes {
        anyhow::bail!("purge drops every non-system database; re-run with --yes to confirm");
    }

    let session = Session::open(config_path).await?;
    let report = session.store.purge_databases().await?;
    print!("{report}");
    session.close().await;
    Ok(())
}
