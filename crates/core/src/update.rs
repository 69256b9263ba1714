//! Field and nested field updates.
//!
//! Both operations are pure: they take the current record by reference and return the next
//! one. Only the branch on the way to the updated leaf is copied; every other section, group
//! and list keeps its allocation.

use crate::path::FieldPath;
use crate::record::PatientRecord;
use crate::value::{FormValue, Record};
use crate::{IntakeError, IntakeResult};

/// Set a top-level field. Absent keys are created; any value shape is accepted.
pub fn set_field(
    record: &PatientRecord,
    key: &str,
    value: impl Into<FormValue>,
) -> PatientRecord {
    PatientRecord::from_root(record.root().with(key, value))
}

/// Set a field inside a section, or inside a group of a section.
///
/// The section (and for two-level paths the group) is created empty when absent.
///
/// # Errors
///
/// Returns `IntakeError::NotARecord` when the section or the group key holds a value that is
/// not a record. The input record is unaffected either way.
pub fn set_nested_field(
    record: &PatientRecord,
    section: &str,
    path: &FieldPath,
    value: impl Into<FormValue>,
) -> IntakeResult<PatientRecord> {
    let current_section = child_record(record.root(), section, section)?;

    let next_section = match path {
        FieldPath::Field(field) => current_section.with(field.as_str(), value),
        FieldPath::GroupField { group, field } => {
            let qualified = format!("{section}.{group}");
            let current_group = child_record(&current_section, group, &qualified)?;
            current_section.with(group.as_str(), current_group.with(field.as_str(), value))
        }
    };

    Ok(set_field(record, section, next_section))
}

/// The record held at `key` (cloned shallowly), an empty record when absent.
fn child_record(parent: &Record, key: &str, label: &str) -> IntakeResult<Record> {
    match parent.get(key) {
        None => Ok(Record::new()),
        Some(FormValue::Record(child)) => Ok(child.as_ref().clone()),
        Some(other) => Err(IntakeError::NotARecord {
            key: label.to_string(),
            found: other.kind(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample() -> PatientRecord {
        PatientRecord::blank()
    }

    #[test]
    fn test_set_field_replaces_only_the_key() {
        let before = sample();
        let after = set_field(&before, "name", "Jane Roe");

        assert_eq!(after.text("name"), "Jane Roe");
        assert_eq!(before.text("name"), "");
        for key in before.root().keys().filter(|k| *k != "name") {
            assert_eq!(after.get(key), before.get(key), "{key}");
        }
        let history_before = before.section("history").expect("history");
        let history_after = after.section("history").expect("history");
        assert!(Arc::ptr_eq(history_before, history_after));
        let dd_before = before.list("differentialDiagnosis").expect("list");
        let dd_after = after.list("differentialDiagnosis").expect("list");
        assert!(Arc::ptr_eq(dd_before, dd_after));
    }

    #[test]
    fn test_set_field_creates_absent_key_with_any_shape() {
        let after = set_field(&PatientRecord::empty(), "clinicalPhotos", vec![FormValue::from("a")]);
        assert_eq!(after.items("clinicalPhotos"), &[FormValue::from("a")]);
    }

    #[test]
    fn test_set_nested_field_one_level() {
        let before = set_nested_field(&sample(), "gpe", &FieldPath::field("pulse"), "72")
            .expect("gpe is a record");
        let after = set_nested_field(&before, "gpe", &FieldPath::field("bp"), "120/80")
            .expect("gpe is a record");

        let gpe = after.section("gpe").expect("gpe");
        assert_eq!(gpe.text("bp"), "120/80");
        assert_eq!(gpe.text("pulse"), "72");
        let old_gpe = before.section("gpe").expect("gpe");
        for key in old_gpe.keys().filter(|k| *k != "bp") {
            assert_eq!(gpe.get(key), old_gpe.get(key), "{key}");
        }
        assert!(!Arc::ptr_eq(old_gpe, gpe));
        assert!(Arc::ptr_eq(
            before.section("history").expect("history"),
            after.section("history").expect("history")
        ));
    }

    #[test]
    fn test_set_nested_field_two_levels_keeps_siblings() {
        let before = set_nested_field(
            &sample(),
            "dermatologicExam",
            &FieldPath::field("scarType"),
            "Atrophic",
        )
        .expect("valid");
        let path = FieldPath::parse("basicLesions.papule").expect("valid path");
        let after = set_nested_field(&before, "dermatologicExam", &path, true).expect("valid");

        assert!(after.nested_flag("dermatologicExam", &path));
        let exam_before = before.section("dermatologicExam").expect("exam");
        let exam_after = after.section("dermatologicExam").expect("exam");
        assert_eq!(exam_after.text("scarType"), "Atrophic");
        assert!(Arc::ptr_eq(
            exam_before.record("shapes").expect("shapes"),
            exam_after.record("shapes").expect("shapes")
        ));
        let lesions_before = exam_before.record("basicLesions").expect("group");
        let lesions_after = exam_after.record("basicLesions").expect("group");
        assert!(!Arc::ptr_eq(lesions_before, lesions_after));
        for key in lesions_before.keys().filter(|k| *k != "papule") {
            assert_eq!(lesions_after.get(key), lesions_before.get(key), "{key}");
        }
    }

    #[test]
    fn test_papule_and_pustule_are_independent() {
        let start = set_nested_field(
            &PatientRecord::empty(),
            "dermatologicExam",
            &FieldPath::field("scarType"),
            "Hypertrophic",
        )
        .expect("valid");
        let papule = FieldPath::parse("basicLesions.papule").expect("valid");
        let pustule = FieldPath::parse("basicLesions.pustule").expect("valid");

        let first = set_nested_field(&start, "dermatologicExam", &papule, true).expect("valid");
        let second = set_nested_field(&first, "dermatologicExam", &pustule, true).expect("valid");

        assert!(second.nested_flag("dermatologicExam", &papule));
        assert!(second.nested_flag("dermatologicExam", &pustule));
        assert!(!first.nested_flag("dermatologicExam", &pustule));
        assert_eq!(
            second.nested_text("dermatologicExam", &FieldPath::field("scarType")),
            "Hypertrophic"
        );
    }

    #[test]
    fn test_set_nested_field_creates_section_and_group() {
        let path = FieldPath::group_field("scales", "type");
        let after = set_nested_field(&PatientRecord::empty(), "dermatologicExam", &path, "Fine")
            .expect("absent section is created");
        assert_eq!(after.nested_text("dermatologicExam", &path), "Fine");
        let exam = after.section("dermatologicExam").expect("created");
        assert_eq!(exam.len(), 1);
    }

    #[test]
    fn test_set_nested_field_rejects_scalar_section() {
        let before = set_field(&PatientRecord::empty(), "history", "oops");
        let err = set_nested_field(&before, "history", &FieldPath::field("itchy"), true)
            .expect_err("text section");
        assert!(matches!(
            err,
            IntakeError::NotARecord { ref key, found: "text" } if key == "history"
        ));
        assert_eq!(before.text("history"), "oops");
    }

    #[test]
    fn test_set_nested_field_rejects_scalar_group() {
        let before = set_nested_field(
            &PatientRecord::empty(),
            "dermatologicExam",
            &FieldPath::field("scales"),
            false,
        )
        .expect("valid");
        let err = set_nested_field(
            &before,
            "dermatologicExam",
            &FieldPath::group_field("scales", "type"),
            "Fine",
        )
        .expect_err("flag group");
        assert!(matches!(
            err,
            IntakeError::NotARecord { ref key, found: "flag" } if key == "dermatologicExam.scales"
        ));
    }
}
