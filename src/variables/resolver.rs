//! Environment scope resolution.
//!
//! Unscoped variables act as defaults for every environment. Variables
//! scoped to the target environment override a default of the same name.
//!
//! # Resolution Rules
//!
//! - Unscoped variables are always included
//! - Scoped variables are included only when their environment set
//!   contains the target environment id
//! - A scoped value replaces an unscoped value with the same name
//! - Every value is masked when its variable is sensitive
//! - The result is sorted by name, ignoring case

use std::collections::HashMap;

use super::order::{compare_names, sort_by_name};
use super::{EffectiveVariable, RawVariable};

/// Resolve the variables that apply to an environment.
///
/// `target_environment_id` must already refer to an existing environment.
/// `None` or an empty id resolves unscoped variables only.
///
/// # Example
///
/// ```
/// use octomigrate::variables::{resolve, RawVariable};
///
/// let variables = vec![
///     RawVariable::new("LogLevel", "info"),
///     RawVariable::new("LogLevel", "warn").scoped_to(["Environments-2"]),
///     RawVariable::new("ApiKey", "s3cr3t").sensitive(),
/// ];
///
/// let staging = resolve(&variables, Some("Environments-2"));
/// assert_eq!(staging.len(), 2);
/// assert_eq!(staging[0].name, "ApiKey");
/// assert_eq!(staging[0].value, "[SECRET]");
/// assert_eq!(staging[1].value, "warn");
///
/// let everywhere = resolve(&variables, None);
/// assert_eq!(everywhere[1].value, "info");
/// ```
pub fn resolve(
    variables: &[RawVariable],
    target_environment_id: Option<&str>,
) -> Vec<EffectiveVariable> {
    let mut resolved: HashMap<&str, EffectiveVariable> = HashMap::new();

    // Defaults
    for variable in variables.iter().filter(|v| v.scope.is_unscoped()) {
        resolved.insert(variable.name.as_str(), EffectiveVariable::from(variable));
    }

    // Overrides, visited in name order so a later duplicate wins predictably
    if let Some(environment_id) = target_environment_id.filter(|id| !id.is_empty()) {
        let mut scoped: Vec<&RawVariable> = variables
            .iter()
            .filter(|v| v.scope.applies_to(environment_id))
            .collect();
        scoped.sort_by(|a, b| compare_names(&a.name, &b.name));

        for variable in scoped {
            resolved.insert(variable.name.as_str(), EffectiveVariable::from(variable));
        }
    }

    let mut result: Vec<EffectiveVariable> = resolved.into_values().collect();
    sort_by_name(&mut result);
    result
}
