//! Submission of a completed form.
//!
//! Submission only checks that the patient can be identified: name and phone number must
//! both hold text. Nothing is persisted and the record is never changed, so a refused form
//! can be corrected and submitted again.

use crate::constants::{FILE_NO_KEY, NAME_KEY, PHONE_KEY};
use crate::notification::Notification;
use crate::record::PatientRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MISSING_INFORMATION_TITLE: &str = "Missing Information";

/// Identifying details of an accepted submission.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub name: String,
    pub phone: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Submission {
    Accepted {
        receipt: SubmissionReceipt,
        notification: Notification,
    },
    Rejected {
        /// Record keys that were blank, in form order.
        missing: Vec<&'static str>,
        notification: Notification,
    },
}

impl Submission {
    pub fn notification(&self) -> &Notification {
        match self {
            Submission::Accepted { notification, .. } | Submission::Rejected { notification, .. } => {
                notification
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted { .. })
    }
}

/// Check the required fields of `record`.
///
/// A field counts as missing only when it holds no text at all; values are taken as typed.
pub fn submit(record: &PatientRecord) -> Submission {
    let name = record.text(NAME_KEY);
    let phone = record.text(PHONE_KEY);

    if !name.is_empty() && !phone.is_empty() {
        tracing::info!(file_no = record.text(FILE_NO_KEY), "patient form accepted");
        return Submission::Accepted {
            receipt: SubmissionReceipt {
                name: name.to_string(),
                phone: phone.to_string(),
                submitted_at: Utc::now(),
            },
            notification: Notification::info("Success", "Patient data saved successfully!"),
        };
    }

    let missing: Vec<&'static str> = [(NAME_KEY, name), (PHONE_KEY, phone)]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key)
        .collect();
    tracing::warn!(?missing, "patient form refused: required fields missing");
    Submission::Rejected {
        missing,
        notification: Notification::warning(
            MISSING_INFORMATION_TITLE,
            "Please fill in required fields: Name and Phone Number",
        ),
    }
}
