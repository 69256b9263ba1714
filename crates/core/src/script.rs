//! Update scripts.
//!
//! A script is a YAML (or JSON, which YAML accepts) sequence of [`Update`] messages, replayed
//! in order onto a fresh form:
//!
//! ```yaml
//! - { op: set_field, key: name, value: Jane Roe }
//! - { op: set_nested, section: dermatologicExam, path: basicLesions.papule, value: true }
//! - { op: append, list: differentialDiagnosis }
//! ```

use crate::store::Update;
use crate::{IntakeError, IntakeResult};
use std::path::Path;

/// Parse an update script from YAML or JSON text.
///
/// Blank input is an empty script.
///
/// # Errors
///
/// Returns `IntakeError::Translation` naming the failing position (e.g. `[2].section`) when
/// the text is not a sequence of update messages.
pub fn parse_script(text: &str) -> IntakeResult<Vec<Update>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let deserializer = serde_yaml::Deserializer::from_str(text);

    match serde_path_to_error::deserialize(deserializer) {
        Ok(updates) => Ok(updates),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(IntakeError::Translation(format!(
                "update script mismatch at {path}: {source}"
            )))
        }
    }
}

/// Read and parse an update script file.
pub fn load_script(path: &Path) -> IntakeResult<Vec<Update>> {
    let text = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
    let updates = parse_script(&text)?;
    tracing::debug!(path = %path.display(), count = updates.len(), "loaded update script");
    Ok(updates)
}
