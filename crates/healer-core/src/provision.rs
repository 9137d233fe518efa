//! Provisioning of the configured databases and per-target collections.
//!
//! Every operation lists first and only creates or drops what is missing or
//! present, so re-running one is harmless.

use crate::catalog::Catalog;
use crate::config::HealerConfig;
use crate::error::HealerResult;
use crate::names::{contains_name, is_system_database, validate_collection_name};
use crate::report::{ProvisionAction, ProvisionReport, StepOutcome};

/// Create every configured database that does not exist yet.
pub async fn first_setup(
    catalog: &dyn Catalog,
    config: &HealerConfig,
) -> HealerResult<ProvisionReport> {
    let mut report = ProvisionReport::begin(ProvisionAction::FirstSetup);
    let existing = catalog.database_names().await?;

    for name in config.database_names() {
        if contains_name(&existing, name) {
            report.record(name, None, StepOutcome::AlreadyPresent);
        } else {
            catalog.create_database(name).await?;
            report.record(name, None, StepOutcome::Created);
        }
    }

    Ok(report.finish())
}

/// Drop every user database that the config does not name.
pub async fn prune_unconfigured(
    catalog: &dyn Catalog,
    config: &HealerConfig,
) -> HealerResult<ProvisionReport> {
    let mut report = ProvisionReport::begin(ProvisionAction::PruneUnconfigured);

    for name in catalog.database_names().await? {
        if is_system_database(&name) || config.is_configured(&name) {
            continue;
        }
        catalog.drop_database(&name).await?;
        report.record(&name, None, StepOutcome::Dropped);
    }

    Ok(report.finish())
}

/// Drop every database except the server's own.
pub async fn purge(catalog: &dyn Catalog) -> HealerResult<ProvisionReport> {
    let mut report = ProvisionReport::begin(ProvisionAction::Purge);

    for name in catalog.database_names().await? {
        if is_system_database(&name) {
            continue;
        }
        catalog.drop_database(&name).await?;
        report.record(&name, None, StepOutcome::Dropped);
    }

    Ok(report.finish())
}

/// Create a collection named `target` in each target-based database lacking one.
pub async fn add_target(
    catalog: &dyn Catalog,
    config: &HealerConfig,
    target: &str,
) -> HealerResult<ProvisionReport> {
    validate_collection_name(target)?;
    let mut report = ProvisionReport::begin(ProvisionAction::AddTarget(target.to_string()));

    for db in config.target_databases() {
        let collections = catalog.collection_names(&db.name).await?;
        if contains_name(&collections, target) {
            report.record(&db.name, Some(target), StepOutcome::AlreadyPresent);
        } else {
            catalog.create_collection(&db.name, target).await?;
            report.record(&db.name, Some(target), StepOutcome::Created);
        }
    }

    Ok(report.finish())
}

/// Drop the `target` collection from each target-based database holding one.
pub async fn remove_target(
    catalog: &dyn Catalog,
    config: &HealerConfig,
    target: &str,
) -> HealerResult<ProvisionReport> {
    let mut report = ProvisionReport::begin(ProvisionAction::RemoveTarget(target.to_string()));

    for db in config.target_databases() {
        let collections = catalog.collection_names(&db.name).await?;
        if contains_name(&collections, target) {
            catalog.drop_collection(&db.name, target).await?;
            report.record(&db.name, Some(target), StepOutcome::Dropped);
        } else {
            report.record(&db.name, Some(target), StepOutcome::Absent);
        }
    }

    Ok(report.finish())
}

/// Report, per target-based database, whether `target` has a collection.
pub async fn target_presence(
    catalog: &dyn Catalog,
    config: &HealerConfig,
    target: &str,
) -> HealerResult<ProvisionReport> {
    let mut report = ProvisionReport::begin(ProvisionAction::TargetPresence(target.to_string()));

    for db in config.target_databases() {
        let collections = catalog.collection_names(&db.name).await?;
        let outcome = if contains_name(&collections, target) {
            StepOutcome::Present
        } else {
            StepOutcome::Absent
        };
        report.record(&db.name, Some(target), outcome);
    }

    Ok(report.finish())
}
