#[allow(clippy::single_component_path_imports)]
use serde_yaml;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid field path: {0}")]
    InvalidFieldPath(String),
    #[error("'{key}' holds a {found}, expected a record")]
    NotARecord { key: String, found: &'static str },
    #[error("'{field}' holds a {found}, expected a list")]
    NotAList { field: String, found: &'static str },

    #[error("failed to read update script: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("translation error: {0}")]
    Translation(String),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
