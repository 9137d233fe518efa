use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// What a provisioning run was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionAction {
    FirstSetup,
    PruneUnconfigured,
    Purge,
    AddTarget(String),
    RemoveTarget(String),
    TargetPresence(String),
}

impl fmt::Display for ProvisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstSetup => write!(f, "first setup"),
            Self::PruneUnconfigured => write!(f, "prune unconfigured databases"),
            Self::Purge => write!(f, "purge databases"),
            Self::AddTarget(t) => write!(f, "add target '{t}'"),
            Self::RemoveTarget(t) => write!(f, "remove target '{t}'"),
            Self::TargetPresence(t) => write!(f, "check target '{t}'"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Created,
    AlreadyPresent,
    Dropped,
    Absent,
    Present,
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::AlreadyPresent => write!(f, "already present"),
            Self::Dropped => write!(f, "dropped"),
            Self::Absent => write!(f, "absent"),
            Self::Present => write!(f, "present"),
        }
    }
}

/// Outcome for one database (and optionally one collection in it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionStep {
    pub database: String,
    pub collection: Option<String>,
    pub outcome: StepOutcome,
}

/// Ordered record of a provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub id: Uuid,
    pub action: ProvisionAction,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub steps: Vec<ProvisionStep>,
}

impl ProvisionReport {
    pub fn begin(action: ProvisionAction) -> Self {
        Self {
            id: Uuid::new_v4(),
            action,
            started_at: Utc::now(),
            completed_at: None,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, database: &str, collection: Option<&str>, outcome: StepOutcome) {
        tracing::info!(
            database,
            collection = collection.unwrap_or(""),
            outcome = %outcome,
            "{}",
            self.action
        );
        self.steps.push(ProvisionStep {
            database: database.to_string(),
            collection: collection.map(str::to_string),
            outcome,
        });
    }

    pub fn finish(mut self) -> Self {
        self.completed_at = Some(Utc::now());
        self
    }

    pub fn count(&self, outcome: StepOutcome) -> usize {
        self.steps.iter().filter(|s| s.outcome == outcome).count()
    }

    pub fn databases_with(&self, outcome: StepOutcome) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.outcome == outcome)
            .map(|s| s.database.as_str())
            .collect()
    }
}

impl fmt::Display for ProvisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let thin = "-".repeat(60);

        writeln!(f, "{thin}")?;
        writeln!(f, "  {} ({})", self.action, self.id)?;
        writeln!(f, "{thin}")?;
        if self.steps.is_empty() {
            writeln!(f, "  (nothing to do)")?;
        } else {
            writeln!(f, "  {:<16} {:<24} {}", "DATABASE", "COLLECTION", "OUTCOME")?;
            for step in &self.steps {
                writeln!(
                    f,
                    "  {:<16} {:<24} {}",
                    step.database,
                    step.collection.as_deref().unwrap_or("-"),
                    step.outcome
                )?;
            }
        }
        if let Some(done) = self.completed_at {
            let millis = (done - self.started_at).num_milliseconds();
            writeln!(f, "{thin}")?;
            writeln!(f, "  {} step(s) in {millis}ms", self.steps.len())?;
        }
        Ok(())
    }
}
