//! In-memory variable group store.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::error::{MigrateError, Result};

use super::{overlay, VariableSink};

/// Variable groups held in memory, keyed by group id.
///
/// # Example
///
/// ```
/// use octomigrate::sink::{InMemorySink, VariableSink};
/// use std::collections::BTreeMap;
///
/// let sink = InMemorySink::new().with_group(7, [("Existing", "keep")]);
///
/// let mut incoming = BTreeMap::new();
/// incoming.insert("Port".to_string(), "9090".to_string());
/// sink.upsert_variable_group(7, &incoming).unwrap();
///
/// let group = sink.group(7).unwrap();
/// assert_eq!(group["Existing"], "keep");
/// assert_eq!(group["Port"], "9090");
/// ```
#[derive(Debug, Default)]
pub struct InMemorySink {
    groups: RefCell<BTreeMap<u32, BTreeMap<String, String>>>,
    writes: Cell<usize>,
}

impl InMemorySink {
    /// Create a sink with no groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group with initial variables.
    pub fn with_group<I, K, V>(self, group_id: u32, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variables = variables
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.groups.borrow_mut().insert(group_id, variables);
        self
    }

    /// Current contents of a group.
    pub fn group(&self, group_id: u32) -> Option<BTreeMap<String, String>> {
        self.groups.borrow().get(&group_id).cloned()
    }

    /// Number of successful upserts.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl VariableSink for InMemorySink {
    fn upsert_variable_group(
        &self,
        group_id: u32,
        variables: &BTreeMap<String, String>,
    ) -> Result<()> {
        let mut groups = self.groups.borrow_mut();
        let group = groups
            .get_mut(&group_id)
            .ok_or_else(|| MigrateError::RemoteWriteFailure {
                group_id,
                message: "variable group does not exist".to_string(),
            })?;

        for (name, value) in variables {
            overlay(group, name, value.clone());
        }
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn overwrites_existing_and_inserts_new() {
        let sink = InMemorySink::new().with_group(1, [("A", "old"), ("B", "keep")]);

        sink.upsert_variable_group(1, &mapping(&[("A", "new"), ("C", "added")]))
            .unwrap();

        assert_eq!(
            sink.group(1).unwrap(),
            mapping(&[("A", "new"), ("B", "keep"), ("C", "added")])
        );
        assert_eq!(sink.write_count(), 1);
    }

    #[test]
    fn overwrite_keeps_existing_key_casing() {
        let sink = InMemorySink::new().with_group(1, [("port", "1")]);

        sink.upsert_variable_group(1, &mapping(&[("Port", "2")]))
            .unwrap();

        assert_eq!(sink.group(1).unwrap(), mapping(&[("port", "2")]));
    }

    #[test]
    fn missing_group_is_write_failure() {
        let sink = InMemorySink::new();

        let err = sink
            .upsert_variable_group(42, &mapping(&[("A", "1")]))
            .unwrap_err();

        assert!(matches!(
            err,
            MigrateError::RemoteWriteFailure { group_id: 42, .. }
        ));
        assert_eq!(sink.write_count(), 0);
    }
}
