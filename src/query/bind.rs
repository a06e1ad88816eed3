//! Bind parameter map
//!
//! Every value that appears in a predicate travels through this map and is
//! referenced from query text by name only. Names are fixed per clause;
//! inserting the same name twice is an error, never a silent overwrite.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::errors::StudylogError;

/// Ordered mapping of bind parameter names to values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindVars {
    vars: BTreeMap<String, Value>,
}

impl BindVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bind value under a fixed name.
    ///
    /// Fails with [`StudylogError::BindCollision`] if the name is taken.
    pub fn insert(&mut self, name: &'static str, value: Value) -> Result<(), StudylogError> {
        if self.vars.contains_key(name) {
            return Err(StudylogError::BindCollision(name));
        }
        self.vars.insert(name.to_string(), value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_get() {
        let mut binds = BindVars::new();
        binds.insert("eventType", json!("login")).unwrap();
        assert_eq!(binds.get("eventType"), Some(&json!("login")));
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut binds = BindVars::new();
        binds.insert("studyKey", json!("s1")).unwrap();
        let err = binds.insert("studyKey", json!("s2")).unwrap_err();
        assert!(matches!(err, StudylogError::BindCollision("studyKey")));
        // the original value survives
        assert_eq!(binds.get("studyKey"), Some(&json!("s1")));
    }
}
