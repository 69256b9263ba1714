//! The form's single record owner.
//!
//! Widgets never touch the record. They describe a change as an [`Update`] and hand it to
//! the [`FormStore`], which derives the next record with the pure functions of
//! [`crate::update`] and [`crate::lists`] and swaps it in. A record handed out earlier is
//! never modified afterwards.

use crate::config::IntakeConfig;
use crate::constants::FILE_NO_KEY;
use crate::file_number;
use crate::lists::{append_item, remove_item, update_item};
use crate::path::FieldPath;
use crate::record::PatientRecord;
use crate::schema::{RepeatableList, Section};
use crate::submission::{submit, Submission};
use crate::update::{set_field, set_nested_field};
use crate::value::FormValue;
use crate::IntakeResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single change requested by the form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Update {
    /// Replace a top-level field.
    SetField { key: String, value: FormValue },

    /// Replace a field inside a section, or inside a group of a section.
    SetNested {
        section: Section,
        path: FieldPath,
        value: FormValue,
    },

    /// Add an item to a list. Without an item, the list's blank item is added.
    Append {
        list: RepeatableList,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item: Option<FormValue>,
    },

    /// Remove the item at `index`.
    Remove { list: RepeatableList, index: usize },

    /// Replace, or for record items merge into, the item at `index`.
    UpdateItem {
        list: RepeatableList,
        index: usize,
        value: FormValue,
    },
}

impl Update {
    pub fn set_field(key: impl Into<String>, value: impl Into<FormValue>) -> Self {
        Update::SetField {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn set_nested(section: Section, path: FieldPath, value: impl Into<FormValue>) -> Self {
        Update::SetNested {
            section,
            path,
            value: value.into(),
        }
    }

    /// Derive the record that results from applying this update to `record`.
    pub fn apply(&self, record: &PatientRecord) -> IntakeResult<PatientRecord> {
        match self {
            Update::SetField { key, value } => Ok(set_field(record, key, value.clone())),
            Update::SetNested {
                section,
                path,
                value,
            } => set_nested_field(record, section.key(), path, value.clone()),
            Update::Append { list, item } => {
                let item = item.clone().unwrap_or_else(|| list.default_item());
                append_item(record, list.key(), item)
            }
            Update::Remove { list, index } => remove_item(record, list.key(), *index),
            Update::UpdateItem { list, index, value } => {
                update_item(record, list.key(), *index, value.clone())
            }
        }
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::SetField { key, .. } => write!(f, "set {key}"),
            Update::SetNested { section, path, .. } => write!(f, "set {section}.{path}"),
            Update::Append { list, .. } => write!(f, "append to {list}"),
            Update::Remove { list, index } => write!(f, "remove {list}[{index}]"),
            Update::UpdateItem { list, index, .. } => write!(f, "update {list}[{index}]"),
        }
    }
}

/// Owner of the in-progress record.
#[derive(Clone, Debug)]
pub struct FormStore {
    record: PatientRecord,
    revision: u64,
}

impl FormStore {
    /// Open a fresh form.
    ///
    /// When automatic numbering is enabled the blank `fileNo` is filled in.
    pub fn open(config: &IntakeConfig) -> IntakeResult<Self> {
        Ok(Self::with_record(fresh_record(config)?))
    }

    /// Take ownership of an existing record.
    pub fn with_record(record: PatientRecord) -> Self {
        Self {
            record,
            revision: 0,
        }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Number of updates applied since the form was opened or reset.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply one update. On error the current record and revision are kept.
    pub fn apply(&mut self, update: &Update) -> IntakeResult<&PatientRecord> {
        let next = update.apply(&self.record)?;
        self.record = next;
        self.revision += 1;
        tracing::debug!(revision = self.revision, %update, "applied form update");
        Ok(&self.record)
    }

    /// Apply updates in order, stopping at the first failure.
    ///
    /// Updates before the failing one stay applied.
    pub fn apply_all<'a>(
        &mut self,
        updates: impl IntoIterator<Item = &'a Update>,
    ) -> IntakeResult<&PatientRecord> {
        for update in updates {
            self.apply(update)?;
        }
        Ok(&self.record)
    }

    /// Discard the record and start again from a fresh form.
    pub fn reset(&mut self, config: &IntakeConfig) -> IntakeResult<()> {
        self.record = fresh_record(config)?;
        self.revision = 0;
        tracing::debug!("form reset");
        Ok(())
    }

    /// Check the required fields of the current record. The record is not changed.
    pub fn submit(&self) -> Submission {
        submit(&self.record)
    }
}

fn fresh_record(config: &IntakeConfig) -> IntakeResult<PatientRecord> {
    let record = PatientRecord::blank();
    if !config.auto_file_number() {
        return Ok(record);
    }
    let file_no = file_number::generate(config.file_no_prefix())?;
    Ok(set_field(&record, FILE_NO_KEY, file_no))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::IntakeError;

    fn manual_config() -> IntakeConfig {
        IntakeConfig::new("PT".into(), OutputFormat::Yaml, false).expect("valid config")
    }

    fn path(input: &str) -> FieldPath {
        FieldPath::parse(input).expect("valid path")
    }

    #[test]
    fn test_open_assigns_file_number_when_enabled() {
        let config = IntakeConfig::new("DERM".into(), OutputFormat::Json, true).expect("valid");
        let store = FormStore::open(&config).expect("opens");
        assert!(store.record().text("fileNo").starts_with("DERM-"));
        assert_eq!(store.revision(), 0);

        let manual = FormStore::open(&manual_config()).expect("opens");
        assert_eq!(manual.record().text("fileNo"), "");
    }

    #[test]
    fn test_apply_replaces_record_and_keeps_old_snapshot() {
        let mut store = FormStore::open(&manual_config()).expect("opens");
        let snapshot = store.record().clone();

        store
            .apply(&Update::set_field("name", "Jane Roe"))
            .expect("applies");

        assert_eq!(store.record().text("name"), "Jane Roe");
        assert_eq!(snapshot.text("name"), "");
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_failed_update_leaves_store_unchanged() {
        let mut store = FormStore::open(&manual_config()).expect("opens");
        store
            .apply(&Update::set_field("history", "not a section"))
            .expect("any shape is accepted at top level");
        let before = store.record().clone();

        let err = store
            .apply(&Update::set_nested(Section::History, path("itchy"), true))
            .expect_err("history is text");

        assert!(matches!(err, IntakeError::NotARecord { .. }));
        assert_eq!(store.record(), &before);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_list_updates_through_store() {
        let mut store = FormStore::open(&manual_config()).expect("opens");
        let updates = [
            Update::Append {
                list: RepeatableList::TreatmentRecords,
                item: None,
            },
            Update::UpdateItem {
                list: RepeatableList::TreatmentRecords,
                index: 0,
                value: [("observation", "Improving")]
                    .into_iter()
                    .collect::<crate::value::Record>()
                    .into(),
            },
            Update::Append {
                list: RepeatableList::FinalDiagnosis,
                item: Some("Psoriasis".into()),
            },
        ];

        store.apply_all(&updates).expect("applies");

        let items = store.record().items("treatmentRecords");
        let first = items[0].as_record().expect("record item");
        assert_eq!(first.text("observation"), "Improving");
        assert_eq!(first.text("date"), "");
        assert!(first.contains_key("action"));
        assert_eq!(
            store.record().items("finalDiagnosis"),
            &[FormValue::from("Psoriasis")]
        );
        assert_eq!(store.revision(), 3);
    }

    #[test]
    fn test_reset_starts_a_fresh_form() {
        let config = manual_config();
        let mut store = FormStore::open(&config).expect("opens");
        store
            .apply(&Update::set_nested(
                Section::DermatologicExam,
                path("basicLesions.papule"),
                true,
            ))
            .expect("applies");

        store.reset(&config).expect("resets");

        assert_eq!(store.record(), &PatientRecord::blank());
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_submit_does_not_change_store() {
        let mut store = FormStore::open(&manual_config()).expect("opens");
        store.apply(&Update::set_field("phone", "5550100")).expect("applies");
        let before = store.record().clone();

        let outcome = store.submit();

        assert!(!outcome.is_accepted());
        assert_eq!(store.record(), &before);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_update_deserializes_from_tagged_json() {
        let update: Update = serde_json::from_str(
            r#"{"op": "set_nested", "section": "dermatologicExam", "path": "basicLesions.papule", "value": true}"#,
        )
        .expect("valid update");
        assert_eq!(
            update,
            Update::set_nested(Section::DermatologicExam, path("basicLesions.papule"), true)
        );

        let append: Update =
            serde_json::from_str(r#"{"op": "append", "list": "clinicalPhotos"}"#).expect("valid");
        assert_eq!(
            append,
            Update::Append {
                list: RepeatableList::ClinicalPhotos,
                item: None
            }
        );
        assert_eq!(append.to_string(), "append to clinicalPhotos");
    }
}
