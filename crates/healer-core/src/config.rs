use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use crate::error::{HealerError, HealerResult};
use crate::names::{is_system_database, validate_database_name};

/// Where the config file lives when nothing overrides it.
pub const DEFAULT_CONFIG_PATH: &str = "/ptv/healer/healerdb/config/config.yaml";

/// Top-level config file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealerConfig {
    pub healerdb: HealerDbSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealerDbSection {
    pub connstr: String,
    #[serde(default)]
    pub conncreds: ConnCredentials,
    /// Connect and server-selection timeout, e.g. "10s".
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,
    #[serde(default)]
    pub dbs: Vec<DatabaseSpec>,
}

/// Username / password pair. Blank values mean "no authentication".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnCredentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    pub name: String,
    /// Partitioned per target: one collection per target handle.
    #[serde(default)]
    pub target_based: bool,
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(10)
}

impl HealerConfig {
    pub fn from_file(path: &Path) -> HealerResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HealerError::Config(format!("Cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> HealerResult<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| HealerError::Config(format!("Invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> HealerResult<()> {
        if self.healerdb.connstr.trim().is_empty() {
            return Err(HealerError::Config("connstr is empty".into()));
        }

        let mut seen = HashSet::new();
        for db in &self.healerdb.dbs {
            validate_database_name(&db.name).map_err(|e| HealerError::Config(e.to_string()))?;
            if is_system_database(&db.name) {
                return Err(HealerError::Config(format!(
                    "'{}' is a system database and cannot be provisioned",
                    db.name
                )));
            }
            if !seen.insert(db.name.as_str()) {
                return Err(HealerError::Config(format!(
                    "database '{}' is listed more than once",
                    db.name
                )));
            }
        }
        Ok(())
    }

    pub fn connection_string(&self) -> &str {
        &self.healerdb.connstr
    }

    pub fn connect_timeout(&self) -> Duration {
        self.healerdb.connect_timeout
    }

    /// Returns `None` unless a non-blank username is configured.
    pub fn credentials(&self) -> Option<(&str, Option<&str>)> {
        let creds = &self.healerdb.conncreds;
        let username = creds.username.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
        let password = creds.password.as_deref().filter(|p| !p.is_empty());
        Some((username, password))
    }

    pub fn databases(&self) -> &[DatabaseSpec] {
        &self.healerdb.dbs
    }

    pub fn database_names(&self) -> Vec<&str> {
        self.healerdb.dbs.iter().map(|db| db.name.as_str()).collect()
    }

    pub fn target_databases(&self) -> impl Iterator<Item = &DatabaseSpec> {
        self.healerdb.dbs.iter().filter(|db| db.target_based)
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.healerdb.dbs.iter().any(|db| db.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
healerdb:
    connstr: "mongodb://localhost:27017"
    conncreds:
        username:
        password:
    dbs:
        - name: "enum"
          target_based: true
        - name: "vuln"
          target_based: true
        - name: "notifio"
          target_based: false
        - name: "creds"
          target_based: false
        - name: "log"
          target_based: true
"#;

    #[test]
    fn test_parse_sample() {
        let config = HealerConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.connection_string(), "mongodb://localhost:27017");
        assert_eq!(
            config.database_names(),
            vec!["enum", "vuln", "notifio", "creds", "log"]
        );
        let targets: Vec<&str> = config.target_databases().map(|d| d.name.as_str()).collect();
        assert_eq!(targets, vec!["enum", "vuln", "log"]);
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_blank_credentials_are_none() {
        let config = HealerConfig::from_yaml_str(SAMPLE).unwrap();
        assert!(config.credentials().is_none());
    }

    #[test]
    fn test_credentials_and_timeout() {
        let yaml = r#"
healerdb:
  connstr: "mongodb://db:27017"
  conncreds: { username: "healer", password: "s3cret" }
  connect_timeout: 3s
  dbs: []
"#;
        let config = HealerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.credentials(), Some(("healer", Some("s3cret"))));
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert!(config.databases().is_empty());
    }

    #[test]
    fn test_rejects_duplicate_database() {
        let yaml = r#"
healerdb:
  connstr: "mongodb://db:27017"
  dbs:
    - { name: enum, target_based: true }
    - { name: enum }
"#;
        let err = HealerConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, HealerError::Config(_)));
    }

    #[test]
    fn test_rejects_system_database_and_empty_connstr() {
        let yaml = r#"
healerdb:
  connstr: "mongodb://db:27017"
  dbs:
    - { name: admin }
"#;
        assert!(HealerConfig::from_yaml_str(yaml).is_err());

        let yaml = "healerdb:\n  connstr: \"  \"\n";
        assert!(HealerConfig::from_yaml_str(yaml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = HealerConfig::from_file(file.path()).unwrap();
        assert!(config.is_configured("creds"));
        assert!(!config.is_configured("web"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = HealerConfig::from_file(Path::new("/nonexistent/healer.yaml")).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
