//! # Derma Core
//!
//! Core logic for the dermatology patient intake form.
//!
//! This crate holds the in-progress patient record and everything that operates on it:
//! - The record model ([`FormValue`], [`Record`], [`PatientRecord`]) and its canonical schema
//! - Copy-on-write field, nested field and list updates
//! - The single record owner ([`FormStore`]) fed by typed [`Update`] messages
//! - Detail visibility rules, submission checks, file numbers
//! - Demonstration patient search and analytics
//!
//! **No UI or persistence concerns**: rendering and storage belong to the callers
//! (`derma-cli`, `derma-run`).

pub mod analytics;
pub mod config;
pub mod constants;
pub mod error;
pub mod file_number;
pub mod lists;
pub mod notification;
pub mod path;
pub mod record;
pub mod schema;
pub mod script;
pub mod search;
pub mod store;
pub mod submission;
pub mod update;
pub mod validation;
pub mod value;
pub mod visibility;

pub use config::{IntakeConfig, OutputFormat};
pub use error::{IntakeError, IntakeResult};
pub use notification::{Notification, NotificationVariant};
pub use path::FieldPath;
pub use record::PatientRecord;
pub use schema::{RepeatableList, Section};
pub use store::{FormStore, Update};
pub use submission::{Submission, SubmissionReceipt};
pub use value::{FormValue, Record};

pub use derma_types::Sex;
