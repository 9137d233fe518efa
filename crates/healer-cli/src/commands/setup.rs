use std::path::Path;

use clap::Args;

use healer_core::provision;

use crate::session::Session;

#[derive(Args)]
pub struct SetupArgs {
    /// Also drop user databases that the config does not name
    #[arg(long)]
    pub prune: bool,
}

pub async fn execute(args: SetupArgs, config_path: &Path) -> anyhow::Result<()> {
    let session = Session::open(config_path).await?;

    let report = provision::first_setup(&session.store, &session.config).await?;
    print!("{report}");

    if args.prune {
        let pruned = provision::prune_unconfigured(&session.store, &session.config).await?;
        print!("{pruned}");
    }

    println!("Database setup complete");
    session.close().await;
    Ok(())
}
