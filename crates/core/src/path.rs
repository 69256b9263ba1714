//! Addresses of leaves inside a section.
//!
//! A [`FieldPath`] is either a field directly inside a section (`scarType`) or a field inside
//! a group of that section (`basicLesions.papule`). Deeper nesting is not part of the form
//! and is rejected at parse time.

use crate::constants::PATH_SEPARATOR;
use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldPath {
    /// A field held directly by the section.
    Field(String),
    /// A field held by a group inside the section.
    GroupField { group: String, field: String },
}

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        FieldPath::Field(name.into())
    }

    pub fn group_field(group: impl Into<String>, field: impl Into<String>) -> Self {
        FieldPath::GroupField {
            group: group.into(),
            field: field.into(),
        }
    }

    /// Parse `field` or `group.field`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidFieldPath` when the input is empty, has an empty segment,
    /// has a segment with leading or trailing whitespace, or has more than two segments.
    /// Inner spaces are kept, so option labels like `Head & Neck` are valid.
    pub fn parse(input: &str) -> IntakeResult<Self> {
        let segments: Vec<&str> = input.split(PATH_SEPARATOR).collect();

        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(IntakeError::InvalidFieldPath(format!(
                "'{input}' has an empty segment"
            )));
        }

        if segments.iter().any(|s| s.trim() != *s) {
            return Err(IntakeError::InvalidFieldPath(format!(
                "'{input}' has a segment with surrounding whitespace"
            )));
        }

        match segments.as_slice() {
            [field] => Ok(FieldPath::field(*field)),
            [group, field] => Ok(FieldPath::group_field(*group, *field)),
            _ => Err(IntakeError::InvalidFieldPath(format!(
                "'{input}' has {} segments, at most 2 are supported",
                segments.len()
            ))),
        }
    }

    /// The leaf name, without the group.
    pub fn leaf(&self) -> &str {
        match self {
            FieldPath::Field(field) | FieldPath::GroupField { field, .. } => field,
        }
    }

    pub fn group(&self) -> Option<&str> {
        match self {
            FieldPath::Field(_) => None,
            FieldPath::GroupField { group, .. } => Some(group),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(field) => f.write_str(field),
            FieldPath::GroupField { group, field } => {
                write!(f, "{group}{PATH_SEPARATOR}{field}")
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FieldPath::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_segment() {
        let path = FieldPath::parse("scarType").expect("valid");
        assert_eq!(path, FieldPath::field("scarType"));
        assert_eq!(path.group(), None);
        assert_eq!(path.leaf(), "scarType");
    }

    #[test]
    fn test_parse_two_segments() {
        let path = FieldPath::parse("basicLesions.papule").expect("valid");
        assert_eq!(path, FieldPath::group_field("basicLesions", "papule"));
        assert_eq!(path.group(), Some("basicLesions"));
        assert_eq!(path.to_string(), "basicLesions.papule");
    }

    #[test]
    fn test_parse_keeps_option_labels_with_spaces() {
        let path = FieldPath::parse("areasInvolved.Head & Neck").expect("valid");
        assert_eq!(path.leaf(), "Head & Neck");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        for bad in ["", ".", "basicLesions.", ".papule", "a..b"] {
            let err = FieldPath::parse(bad).expect_err("should reject");
            assert!(matches!(err, IntakeError::InvalidFieldPath(_)), "{bad}");
        }
    }

    #[test]
    fn test_parse_rejects_padded_segments() {
        for bad in ["basicLesions. papule", "basicLesions .papule", " scarType", "scarType\t"] {
            let err = FieldPath::parse(bad).expect_err("should reject");
            assert!(
                matches!(err, IntakeError::InvalidFieldPath(ref msg) if msg.contains("whitespace")),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_three_segments() {
        let err = FieldPath::parse("a.b.c").expect_err("should reject");
        assert!(matches!(err, IntakeError::InvalidFieldPath(msg) if msg.contains("3 segments")));
    }

    #[test]
    fn test_deserialize_from_string() {
        let path: FieldPath = serde_json::from_str("\"scales.type\"").expect("valid");
        assert_eq!(path, FieldPath::group_field("scales", "type"));
        assert!(serde_json::from_str::<FieldPath>("\"a.b.c\"").is_err());
    }
}
