//! Clinic file numbers.

use crate::validation::validate_file_no_prefix;
use crate::IntakeResult;
use uuid::Uuid;

const SUFFIX_LEN: usize = 8;

/// Generate a file number such as `PT-3F2A9C1B`.
///
/// The suffix is the first eight hex digits of a random UUID, upper-cased.
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` if `prefix` is not a valid file number prefix.
pub fn generate(prefix: &str) -> IntakeResult<String> {
    validate_file_no_prefix(prefix)?;
    let simple = Uuid::new_v4().simple().to_string();
    let suffix = simple[..SUFFIX_LEN].to_ascii_uppercase();
    Ok(format!("{prefix}-{suffix}"))
}
