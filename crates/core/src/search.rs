//! Patient lookup by phone number.
//!
//! There is no patient store behind the intake form, so lookups run against a small
//! in-memory directory. [`PatientDirectory::sample`] holds the demonstration patient.

use crate::constants::{FILE_NO_KEY, NAME_KEY, PHONE_KEY, SEX_KEY};
use crate::notification::Notification;
use crate::record::PatientRecord;
use crate::schema::RepeatableList;
use crate::value::FormValue;
use serde::Serialize;

/// The fields shown on a search result card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub phone: String,
    pub file_no: String,
    pub date: String,
    pub complaints: String,
    pub duration: String,
    pub provisional_diagnosis: String,
    pub final_diagnosis: String,
    pub treatment_prescribed: String,
}

impl PatientSummary {
    /// Summarise a record. Final diagnoses are joined with `", "`; blank entries are skipped.
    pub fn from_record(record: &PatientRecord) -> Self {
        let final_diagnosis = record
            .items(RepeatableList::FinalDiagnosis.key())
            .iter()
            .filter_map(FormValue::as_text)
            .filter(|d| !d.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            name: record.text(NAME_KEY).to_string(),
            age: record.text("age").to_string(),
            sex: record.text(SEX_KEY).to_string(),
            phone: record.text(PHONE_KEY).to_string(),
            file_no: record.text(FILE_NO_KEY).to_string(),
            date: record.text("date").to_string(),
            complaints: record.text("complaints").to_string(),
            duration: record.text("duration").to_string(),
            provisional_diagnosis: record.text("provisionalDiagnosis").to_string(),
            final_diagnosis,
            treatment_prescribed: record.text("treatmentPrescribed").to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchResult {
    pub patient: Option<PatientSummary>,
    pub notification: Notification,
}

#[derive(Clone, Debug, Default)]
pub struct PatientDirectory {
    patients: Vec<PatientSummary>,
}

impl PatientDirectory {
    pub fn new(patients: Vec<PatientSummary>) -> Self {
        Self { patients }
    }

    /// A directory holding the single demonstration patient.
    pub fn sample() -> Self {
        Self::new(vec![PatientSummary {
            name: "John Doe".into(),
            age: "35".into(),
            sex: "M".into(),
            phone: "1234567890".into(),
            file_no: "PT001".into(),
            date: "2024-01-15".into(),
            complaints: "Rash on arms and legs, itching for 2 weeks".into(),
            duration: "2 weeks".into(),
            provisional_diagnosis: "Contact dermatitis".into(),
            final_diagnosis: "Allergic contact dermatitis".into(),
            treatment_prescribed: "Topical corticosteroids, antihistamines".into(),
        }])
    }

    /// Find the patient whose phone number matches `phone` exactly.
    ///
    /// A whitespace-only query is treated as no query at all.
    pub fn search_by_phone(&self, phone: &str) -> SearchResult {
        if phone.trim().is_empty() {
            return SearchResult {
                patient: None,
                notification: Notification::warning(
                    "Missing Information",
                    "Please enter a phone number to search",
                ),
            };
        }

        match self.patients.iter().find(|p| p.phone == phone) {
            Some(patient) => {
                tracing::info!(file_no = %patient.file_no, "patient found");
                SearchResult {
                    patient: Some(patient.clone()),
                    notification: Notification::info(
                        "Patient Found",
                        "Patient record retrieved successfully",
                    ),
                }
            }
            None => {
                tracing::info!("no patient matched phone search");
                SearchResult {
                    patient: None,
                    notification: Notification::warning(
                        "No Results",
                        "No patient found with this phone number",
                    ),
                }
            }
        }
    }
}
