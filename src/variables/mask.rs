//! Masking of sensitive variable values.
//!
//! Sensitive values are replaced by [`SECRET_MARKER`] whenever a raw
//! variable becomes an effective one. The rule has no off switch.

use super::RawVariable;

/// Literal written in place of a sensitive value.
pub const SECRET_MARKER: &str = "[SECRET]";

/// Return the value a raw variable contributes to a resolved result.
///
/// # Example
///
/// ```
/// use octomigrate::variables::{mask_value, RawVariable};
///
/// let plain = RawVariable::new("Port", "8080");
/// assert_eq!(mask_value(&plain), "8080");
///
/// let secret = RawVariable::new("ApiKey", "s3cr3t").sensitive();
/// assert_eq!(mask_value(&secret), "[SECRET]");
/// ```
pub fn mask_value(variable: &RawVariable) -> String {
    if variable.is_sensitive {
        SECRET_MARKER.to_string()
    } else {
        variable.value.clone()
    }
}
