//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the store and the
//! renderers. Nothing in the core reads environment variables while handling updates.

use crate::constants::DEFAULT_FILE_NO_PREFIX;
use crate::validation::validate_file_no_prefix;
use crate::{IntakeError, IntakeResult};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Serialisation format for records, notifications and reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    /// Render any serialisable value in this format.
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> IntakeResult<String> {
        match self {
            OutputFormat::Yaml => {
                serde_yaml::to_string(value).map_err(IntakeError::YamlSerialization)
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(value).map_err(IntakeError::Serialization)
            }
        }
    }
}

impl FromStr for OutputFormat {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(IntakeError::InvalidInput(format!(
                "unknown output format '{other}' (expected 'yaml' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Intake configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct IntakeConfig {
    file_no_prefix: String,
    output_format: OutputFormat,
    auto_file_number: bool,
}

impl IntakeConfig {
    /// Create a new `IntakeConfig`, validating the file number prefix.
    pub fn new(
        file_no_prefix: String,
        output_format: OutputFormat,
        auto_file_number: bool,
    ) -> IntakeResult<Self> {
        validate_file_no_prefix(&file_no_prefix)?;

        Ok(Self {
            file_no_prefix,
            output_format,
            auto_file_number,
        })
    }

    /// Build a configuration from raw environment values.
    ///
    /// The caller reads the variables; this keeps the parsing testable without touching
    /// process-wide state.
    pub fn from_env_values(
        file_no_prefix: Option<String>,
        output_format: Option<String>,
        auto_file_number: Option<String>,
    ) -> IntakeResult<Self> {
        Self::new(
            file_no_prefix_from_env_value(file_no_prefix),
            output_format_from_env_value(output_format)?,
            auto_file_number_from_env_value(auto_file_number)?,
        )
    }

    pub fn file_no_prefix(&self) -> &str {
        &self.file_no_prefix
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn auto_file_number(&self) -> bool {
        self.auto_file_number
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            file_no_prefix: DEFAULT_FILE_NO_PREFIX.to_string(),
            output_format: OutputFormat::default(),
            auto_file_number: true,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve the file number prefix. Unset or blank values yield the default prefix.
pub fn file_no_prefix_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_FILE_NO_PREFIX.to_string())
}

/// Parse the output format. Unset or blank values yield YAML.
pub fn output_format_from_env_value(value: Option<String>) -> IntakeResult<OutputFormat> {
    let parsed = non_blank(value).map(|v| v.parse::<OutputFormat>()).transpose()?;
    Ok(parsed.unwrap_or_default())
}

/// Parse the automatic file number switch. Unset or blank values enable it.
pub fn auto_file_number_from_env_value(value: Option<String>) -> IntakeResult<bool> {
    match non_blank(value).map(|v| v.to_ascii_lowercase()) {
        None => Ok(true),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(IntakeError::InvalidInput(format!(
                "invalid boolean '{v}' for automatic file numbers"
            ))),
        },
    }
}
