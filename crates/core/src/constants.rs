//! Constants used throughout the intake core crate.
//!
//! Record keys that more than one module needs live here so the schema, the visibility
//! rules and the submission check agree on spelling.

/// Top-level key holding the patient's name (required at submission).
pub const NAME_KEY: &str = "name";

/// Top-level key holding the patient's phone number (required at submission).
pub const PHONE_KEY: &str = "phone";

/// Top-level key holding the sex code (`M`, `F`, `Other`).
pub const SEX_KEY: &str = "sex";

/// Top-level key holding the clinic file number.
pub const FILE_NO_KEY: &str = "fileNo";

/// Separator between the group and field segments of a two-level field path.
pub const PATH_SEPARATOR: char = '.';

/// Default prefix for generated file numbers.
pub const DEFAULT_FILE_NO_PREFIX: &str = "PT";

/// Maximum length of a file number prefix.
pub const MAX_FILE_NO_PREFIX_LEN: usize = 8;

/// Environment variable overriding the file number prefix.
pub const FILE_NO_PREFIX_ENV: &str = "DERMA_FILE_NO_PREFIX";

/// Environment variable selecting the output format (`yaml` or `json`).
pub const OUTPUT_FORMAT_ENV: &str = "DERMA_OUTPUT_FORMAT";

/// Environment variable toggling automatic file numbers for new forms.
pub const AUTO_FILE_NO_ENV: &str = "DERMA_AUTO_FILE_NO";
