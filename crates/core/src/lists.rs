//! Repeatable list editing.
//!
//! Differential diagnoses, final diagnoses, diagnosis reviews, treatment records and clinical
//! photo captions are all top-level lists edited by index. Every operation builds a new list
//! for the touched field; the previous list and its items are left as they were.

use crate::record::PatientRecord;
use crate::update::set_field;
use crate::value::FormValue;
use crate::{IntakeError, IntakeResult};

/// Append `item` to the list at `field`. An absent field is treated as an empty list.
pub fn append_item(
    record: &PatientRecord,
    field: &str,
    item: impl Into<FormValue>,
) -> IntakeResult<PatientRecord> {
    let current = current_items(record, field)?;
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(item.into());
    Ok(set_field(record, field, next))
}

/// Remove the item at `index`, keeping the order of the rest.
///
/// An out-of-range index removes nothing; the field still receives a new list equal to the
/// old one.
pub fn remove_item(
    record: &PatientRecord,
    field: &str,
    index: usize,
) -> IntakeResult<PatientRecord> {
    let next: Vec<FormValue> = current_items(record, field)?
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect();
    Ok(set_field(record, field, next))
}

/// Update the item at `index`.
///
/// When both the existing item and `value` are records, `value` is a partial record that is
/// laid over the item, so `{date: "2024-01-01"}` keeps the item's other fields. Otherwise the
/// item is replaced. An out-of-range index changes nothing.
pub fn update_item(
    record: &PatientRecord,
    field: &str,
    index: usize,
    value: impl Into<FormValue>,
) -> IntakeResult<PatientRecord> {
    let current = current_items(record, field)?;
    let value = value.into();

    let mut next = current.to_vec();
    if let Some(existing) = current.get(index) {
        next[index] = match (existing, value) {
            (FormValue::Record(existing), FormValue::Record(patch)) => {
                FormValue::from(existing.merged(&patch))
            }
            (_, replacement) => replacement,
        };
    }

    Ok(set_field(record, field, next))
}

fn current_items<'a>(record: &'a PatientRecord, field: &str) -> IntakeResult<&'a [FormValue]> {
    match record.get(field) {
        None => Ok(&[]),
        Some(FormValue::List(items)) => Ok(items.as_slice()),
        Some(other) => Err(IntakeError::NotAList {
            field: field.to_string(),
            found: other.kind(),
        }),
    }
}
