//! Core studylog coordinator
//!
//! [`Studylog`] owns the store handle and the configuration and hands out
//! the services built on them. Construction is explicit (no module-level
//! state initialized behind the caller's back) and the handle has an
//! explicit lifecycle: open at service start, close at shutdown.

use std::sync::Arc;

use crate::audit::AuditLog;
use crate::config::StoreConfig;
use crate::errors::StudylogError;
use crate::responses::TaskResponses;
use crate::store::{Database, MemoryDatabase};

/// Coordinator tying a configuration to a store backend
pub struct Studylog {
    db: Arc<dyn Database>,
    config: StoreConfig,
}

impl Studylog {
    /// Open against an existing store backend
    pub fn open(config: StoreConfig, db: Arc<dyn Database>) -> Result<Self, StudylogError> {
        config.validate()?;
        Ok(Self { db, config })
    }

    /// Open against a fresh in-memory backend with default configuration
    pub fn in_memory() -> Self {
        Self {
            db: Arc::new(MemoryDatabase::new()),
            config: StoreConfig::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn database(&self) -> Arc<dyn Database> {
        Arc::clone(&self.db)
    }

    /// Audit log service over this store
    pub fn audit_log(&self) -> AuditLog {
        AuditLog::new(Arc::clone(&self.db), &self.config)
    }

    /// Task response service over this store
    pub fn task_responses(&self) -> TaskResponses {
        TaskResponses::new(Arc::clone(&self.db), &self.config)
    }

    /// Shut the store handle down
    pub async fn close(self) -> Result<(), StudylogError> {
        self.db.close().await
    }
}
