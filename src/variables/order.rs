//! Case-insensitive ordering of variable and resource names.

use std::cmp::Ordering;

use super::EffectiveVariable;

/// Compare two names ignoring case, character by character.
///
/// Names that only differ by case fall back to an ordinal comparison so
/// the order is total.
///
/// # Example
///
/// ```
/// use octomigrate::variables::compare_names;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_names("apple", "Banana"), Ordering::Less);
/// assert_eq!(compare_names("Port", "port"), Ordering::Less);
/// ```
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let folded = a.chars().map(fold).cmp(b.chars().map(fold));
    folded.then_with(|| a.cmp(b))
}

/// Whether two names are equal ignoring case.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars().map(fold).eq(b.chars().map(fold))
}

/// Uppercase a single character one-to-one.
///
/// Characters whose uppercase form expands to several characters (`ß`)
/// are kept as they are, so names are never compared by expansion.
fn fold(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Sort resolved variables by name, ignoring case.
pub fn sort_by_name(variables: &mut [EffectiveVariable]) {
    variables.sort_by(|a, b| compare_names(&a.name, &b.name));
}

/// Sort plain names, ignoring case.
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| compare_names(a, b));
}
