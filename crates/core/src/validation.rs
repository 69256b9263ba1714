//! Input validation utilities.
//!
//! Only configuration values are validated here. Form content is never validated beyond the
//! presence check done at submission (see [`crate::submission`]).

use crate::constants::MAX_FILE_NO_PREFIX_LEN;
use crate::{IntakeError, IntakeResult};

/// Validates that a file number prefix is safe to embed in a generated file number.
///
/// The prefix becomes the first part of `PREFIX-1A2B3C4D`, which is printed on forms and
/// typed back into searches, so it is kept short and plain:
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to [`MAX_FILE_NO_PREFIX_LEN`]
/// - Restricts characters to ASCII letters and digits
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` if the prefix is invalid.
pub fn validate_file_no_prefix(prefix: &str) -> IntakeResult<()> {
    if prefix.trim().is_empty() {
        return Err(IntakeError::InvalidInput(
            "file number prefix cannot be empty".into(),
        ));
    }

    if prefix.len() > MAX_FILE_NO_PREFIX_LEN {
        return Err(IntakeError::InvalidInput(format!(
            "file number prefix exceeds maximum length of {} characters",
            MAX_FILE_NO_PREFIX_LEN
        )));
    }

    if !prefix.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(IntakeError::InvalidInput(
            "file number prefix contains invalid characters (only ASCII letters and digits allowed)"
                .into(),
        ));
    }

    Ok(())
}
