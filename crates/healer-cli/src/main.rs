use std::path::PathBuf;

use clap::Parser;

use healer_core::config::DEFAULT_CONFIG_PATH;

mod commands;
mod session;

#[derive(Parser)]
#[command(
    name = "healerdb",
    about = "healerdb - provision and query the reconnaissance databases",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Path to the healerdb YAML config
    #[arg(long, global = true, env = "HEALERDB_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = cli.config.as_path();
    match cli.command {
        commands::Commands::Setup(args) => commands::setup::execute(args, config).await,
        commands::Commands::Purge(args) => commands::purge::execute(args, config).await,
        commands::Commands::Validate => commands::validate::execute(config).await,
        commands::Commands::Inventory(args) => commands::inventory::execute(args, config).await,
        commands::Commands::Db(args) => commands::db::execute(args, config).await,
        commands::Commands::Collection(args) => commands::collection::execute(args, config).await,
        commands::Commands::Document(args) => commands::document::execute(args, config).await,
        commands::Commands::Index(args) => commands::index::execute(args, config).await,
        commands::Commands::Target(args) => commands::target::execute(args, config).await,
        commands::Commands::Domain(args) => commands::domain::execute(args, config).await,
        commands::Commands::Subdomain(args) => commands::subdomain::execute(args, config).await,
        commands::Commands::Node(args) => commands::node::execute(args, config).await,
    }
}
