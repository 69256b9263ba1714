//! Validated primitive types shared by the intake crates.
//!
//! - [`Sex`]: the closed set of values offered by the identity section's sex selector.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing coded values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodeError {
    /// The input is not one of the accepted codes
    #[error("unrecognised code: {0}")]
    UnknownCode(String),
}

/// Patient sex as offered by the identity section.
///
/// Stored in the record as its short code (`M`, `F`, `Other`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    /// Short code written into the record.
    pub const fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Other => "Other",
        }
    }

    /// Parse a short code. Unknown and blank codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            "Other" => Some(Sex::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Sex {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sex::from_code(s).ok_or_else(|| CodeError::UnknownCode(s.to_owned()))
    }
}

impl serde::Serialize for Sex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> serde::Deserialize<'de> for Sex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_codes_round_trip() {
        for sex in [Sex::Male, Sex::Female, Sex::Other] {
            assert_eq!(Sex::from_code(sex.code()), Some(sex));
        }
        assert_eq!(Sex::from_code(""), None);
        assert_eq!(Sex::from_code("f"), None);
    }

    #[test]
    fn test_sex_parse_reports_unknown_code() {
        let err = "X".parse::<Sex>().expect_err("should reject");
        assert_eq!(err, CodeError::UnknownCode("X".into()));
    }

    #[test]
    fn test_sex_serde_uses_code() {
        let json = serde_json::to_string(&Sex::Female).expect("serializes");
        assert_eq!(json, "\"F\"");
        let parsed: Sex = serde_json::from_str("\"Other\"").expect("parses");
        assert_eq!(parsed, Sex::Other);
        assert!(serde_json::from_str::<Sex>("\"Female\"").is_err());
    }
}
