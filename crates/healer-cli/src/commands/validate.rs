use std::path::Path;

use healer_core::config::HealerConfig;
use healer_db::store::redact_uri;

pub async fn execute(config_path: &Path) -> anyhow::Result<()> {
    println!("Validating {}...", config_path.display());

    let config = HealerConfig::from_file(config_path)?;
    println!("  YAML parsing: OK");
    println!("  Connection: {}", redact_uri(config.connection_string()));
    println!("  Timeout: {:?}", config.connect_timeout());
    println!(
        "  Credentials: {}",
        if config.credentials().is_some() { "set" } else { "none" }
    );
    println!("  Databases: {}", config.databases().len());
    for db in config.databases() {
        let kind = if db.target_based { "target-based" } else { "global" };
        println!("    {:<16} {kind}", db.name);
    }

    println!("\nValidation PASSED");
    Ok(())
}
