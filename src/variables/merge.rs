//! Merging of library and project results.
//!
//! Library variables are defaults; project variables with the same name
//! replace them. Environment scoping has already been applied to both
//! inputs.

use std::collections::HashMap;

use super::order::sort_by_name;
use super::EffectiveVariable;

/// Merge a resolved library set with a resolved project set.
///
/// # Example
///
/// ```
/// use octomigrate::variables::{merge, EffectiveVariable};
///
/// let library = vec![EffectiveVariable::new("B", "1")];
/// let project = vec![EffectiveVariable::new("B", "2"), EffectiveVariable::new("C", "3")];
///
/// let merged = merge(&library, &project);
/// assert_eq!(merged, vec![EffectiveVariable::new("B", "2"), EffectiveVariable::new("C", "3")]);
/// ```
pub fn merge(
    library: &[EffectiveVariable],
    project: &[EffectiveVariable],
) -> Vec<EffectiveVariable> {
    let mut merged: HashMap<&str, &EffectiveVariable> = HashMap::new();

    for variable in library.iter().chain(project) {
        merged.insert(variable.name.as_str(), variable);
    }

    let mut result: Vec<EffectiveVariable> = merged.into_values().cloned().collect();
    sort_by_name(&mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str, value: &str) -> EffectiveVariable {
        EffectiveVariable::new(name, value)
    }

    #[test]
    fn project_overrides_library() {
        let merged = merge(&[var("B", "1")], &[var("B", "2"), var("C", "3")]);
        assert_eq!(merged, vec![var("B", "2"), var("C", "3")]);
    }

    #[test]
    fn library_only_names_pass_through() {
        let merged = merge(&[var("a", "1"), var("Z", "2")], &[var("m", "3")]);
        assert_eq!(merged, vec![var("a", "1"), var("m", "3"), var("Z", "2")]);
    }

    #[test]
    fn precedence_is_by_source_not_position() {
        // Project wins even though the library list is the longer, later-sorted one.
        let merged = merge(
            &[var("X", "library"), var("Y", "library")],
            &[var("X", "project")],
        );
        assert_eq!(merged, vec![var("X", "project"), var("Y", "library")]);
    }

    #[test]
    fn masked_project_value_overrides_plain_library_value() {
        let merged = merge(&[var("Key", "plain")], &[EffectiveVariable::secret("Key")]);
        assert_eq!(merged, vec![EffectiveVariable::secret("Key")]);
        assert!(merged[0].is_masked());
    }

    #[test]
    fn empty_inputs() {
        assert!(merge(&[], &[]).is_empty());
        assert_eq!(merge(&[], &[var("A", "1")]), vec![var("A", "1")]);
        assert_eq!(merge(&[var("A", "1")], &[]), vec![var("A", "1")]);
    }
}
