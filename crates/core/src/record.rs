//! The in-progress patient record.
//!
//! A [`PatientRecord`] is never changed in place. The functions in [`crate::update`] and
//! [`crate::lists`] derive a new record from an old one, and the old one stays valid.

use crate::constants::SEX_KEY;
use crate::path::FieldPath;
use crate::value::{FormValue, Record};
use crate::{IntakeError, IntakeResult};
use derma_types::Sex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientRecord {
    root: Record,
}

impl PatientRecord {
    /// A record with no keys at all. Every read falls back to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fresh record with every known leaf at its default, as shown when the form opens.
    pub fn blank() -> Self {
        crate::schema::blank_record()
    }

    pub fn from_root(root: Record) -> Self {
        Self { root }
    }

    /// Parse a record from JSON.
    pub fn from_json(input: &str) -> IntakeResult<Self> {
        serde_json::from_str(input).map_err(IntakeError::Deserialization)
    }

    /// Read a record previously written as JSON.
    pub fn load(path: &Path) -> IntakeResult<Self> {
        let text = std::fs::read_to_string(path).map_err(IntakeError::FileRead)?;
        Self::from_json(&text)
    }

    pub fn root(&self) -> &Record {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.root.get(key)
    }

    pub fn text(&self, key: &str) -> &str {
        self.root.text(key)
    }

    pub fn flag(&self, key: &str) -> bool {
        self.root.flag(key)
    }

    pub fn section(&self, key: &str) -> Option<&Arc<Record>> {
        self.root.record(key)
    }

    pub fn list(&self, key: &str) -> Option<&Arc<Vec<FormValue>>> {
        self.root.list(key)
    }

    /// Items of a list field; an absent or non-list field reads as no items.
    pub fn items(&self, key: &str) -> &[FormValue] {
        self.list(key).map(|items| items.as_slice()).unwrap_or(&[])
    }

    /// Value at `path` inside `section`, if every step exists.
    pub fn nested(&self, section: &str, path: &FieldPath) -> Option<&FormValue> {
        let section = self.section(section)?;
        match path {
            FieldPath::Field(field) => section.get(field),
            FieldPath::GroupField { group, field } => section.record(group)?.get(field),
        }
    }

    /// Text at `path` inside `section`, or `""`.
    pub fn nested_text(&self, section: &str, path: &FieldPath) -> &str {
        self.nested(section, path)
            .and_then(FormValue::as_text)
            .unwrap_or("")
    }

    /// Flag at `path` inside `section`, or `false`.
    pub fn nested_flag(&self, section: &str, path: &FieldPath) -> bool {
        self.nested(section, path)
            .and_then(FormValue::as_flag)
            .unwrap_or(false)
    }

    /// The selected sex, when one of the known codes is set.
    pub fn sex(&self) -> Option<Sex> {
        Sex::from_code(self.text(SEX_KEY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_record_reads_defaults() {
        let record = PatientRecord::empty();
        assert_eq!(record.text("name"), "");
        assert!(!record.flag("anything"));
        assert!(record.items("differentialDiagnosis").is_empty());
        let path = FieldPath::group_field("basicLesions", "papule");
        assert!(record.nested("dermatologicExam", &path).is_none());
        assert!(!record.nested_flag("dermatologicExam", &path));
        assert_eq!(record.nested_text("history", &FieldPath::field("itchyDetails")), "");
        assert_eq!(record.sex(), None);
    }

    #[test]
    fn test_from_json_reads_nested_values() {
        let record = PatientRecord::from_json(
            r#"{"sex": "F", "dermatologicExam": {"scales": {"type": "Fine"}, "crust": true}}"#,
        )
        .expect("valid record");
        assert_eq!(record.sex(), Some(Sex::Female));
        assert_eq!(
            record.nested_text("dermatologicExam", &FieldPath::group_field("scales", "type")),
            "Fine"
        );
        assert!(record.nested_flag("dermatologicExam", &FieldPath::field("crust")));
    }

    #[test]
    fn test_load_reads_saved_record() {
        let record = crate::update::set_field(&PatientRecord::blank(), "name", "Jane Roe");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        serde_json::to_writer(&mut file, &record).expect("write");

        let loaded = PatientRecord::load(file.path()).expect("loads");
        assert_eq!(loaded, record);

        let dir = tempfile::tempdir().expect("temp dir");
        let err = PatientRecord::load(&dir.path().join("missing.json")).expect_err("no file");
        assert!(matches!(err, IntakeError::FileRead(_)));
    }

    #[test]
    fn test_from_json_reports_bad_input() {
        let err = PatientRecord::from_json("[1, 2]").expect_err("not a mapping");
        assert!(matches!(err, IntakeError::Deserialization(_)));
    }
}
