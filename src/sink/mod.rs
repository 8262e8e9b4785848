//! Writing resolved variables into a destination variable group.
//!
//! This module provides:
//! - [`VariableSink`] trait for the sink boundary
//! - [`AzureDevOpsClient`] for Azure DevOps variable groups
//! - [`InMemorySink`] for tests and dry runs
//!
//! An upsert reads the whole group, overlays the incoming names, and
//! writes the whole group back. Names not in the incoming mapping are
//! preserved. Names are matched ignoring case, and an existing key keeps
//! its spelling when its value is replaced. The sequence is not atomic: a concurrent edit of the same
//! group between the read and the write is overwritten.

pub mod azure;
pub mod memory;

pub use azure::{AzureDevOpsClient, AzureDevOpsSettings};
pub use memory::InMemorySink;

use std::collections::BTreeMap;

use crate::error::Result;
use crate::variables::names_match;

/// Destination for resolved variables.
pub trait VariableSink {
    /// Insert or overwrite `variables` in the group, keeping every other key.
    ///
    /// # Errors
    ///
    /// Returns `RemoteWriteFailure` if the group cannot be read or written.
    fn upsert_variable_group(
        &self,
        group_id: u32,
        variables: &BTreeMap<String, String>,
    ) -> Result<()>;
}

/// Set `name` in `group`, replacing the value of a key that matches it
/// ignoring case. Returns `true` when a new key was added.
pub(crate) fn overlay<V>(group: &mut BTreeMap<String, V>, name: &str, value: V) -> bool {
    let existing = group.keys().find(|key| names_match(key, name)).cloned();
    match existing {
        Some(key) => {
            group.insert(key, value);
            false
        }
        None => {
            group.insert(name.to_string(), value);
            true
        }
    }
}
