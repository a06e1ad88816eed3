//! Configuration
//!
//! Collection layout and database name for a deployment. Loaded from a
//! TOML file (path taken from the `STUDYLOG_CONFIG` environment variable,
//! falling back to `./studylog.toml`, falling back to the defaults), or
//! built programmatically.
//!
//! The store is expected to keep equality/range indexes on the owner key,
//! study key and event type of the audit collection; that is declared at
//! deployment time, not enforced here.

use std::{env, path::Path};

use serde::{Deserialize, Serialize};

use crate::errors::StudylogError;

const DEFAULT_CONFIG_PATH: &str = "./studylog.toml";

/// Complete store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub database: String,
    #[serde(default)]
    pub collections: CollectionNames,
}

/// Names of the collections the services operate on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionNames {
    pub audit_log: String,
    pub users: String,
    pub task_responses: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            audit_log: "auditlogs".to_string(),
            users: "users".to_string(),
            task_responses: "tasksResults".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database: "studylog".to_string(),
            collections: CollectionNames::default(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from the environment-selected TOML file, the
    /// default path, or the built-in defaults, in that order
    pub fn load() -> Result<Self, StudylogError> {
        dotenvy::dotenv().ok();

        if let Ok(config_path) = env::var("STUDYLOG_CONFIG") {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StudylogError> {
        let content = std::fs::read_to_string(path)
            .map_err(|err| StudylogError::Configuration(err.to_string()))?;
        let config: Self = toml::from_str(&content)
            .map_err(|err| StudylogError::Configuration(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), StudylogError> {
        if self.database.is_empty() {
            return Err(StudylogError::Configuration(
                "database name cannot be empty".to_string(),
            ));
        }
        for (name, value) in [
            ("audit_log", &self.collections.audit_log),
            ("users", &self.collections.users),
            ("task_responses", &self.collections.task_responses),
        ] {
            if value.is_empty() {
                return Err(StudylogError::Configuration(format!(
                    "collection name {name} cannot be empty"
                )));
            }
        }
        Ok(())
    }
}
