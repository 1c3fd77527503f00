//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: simulation error (unknown law, grid mismatch)
//! - 11: I/O error (file read/write, snapshot)
//! - 12: input error (bad JSON params, unknown parameter, bad scene, image size)
//! - 13: serialization error

use maxwell_core::FieldError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A simulation-level error.
    Field(FieldError),
    /// An I/O error (file read/write, snapshot rendering).
    Io(String),
    /// A user input error (bad JSON params, unknown parameter name).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        match e {
            FieldError::Io(msg) => CliError::Io(msg),
            e @ (FieldError::ParamNotFound(_)
            | FieldError::ParamNotFinite(_)
            | FieldError::InvalidScene(_)
            | FieldError::InvalidDimensions) => CliError::Input(e.to_string()),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_exit_code_is_10() {
        let err = CliError::from(FieldError::UnknownLaw("coulomb".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("coulomb"));
    }

    #[test]
    fn io_error_exit_code_is_11() {
        let err = CliError::from(FieldError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn parameter_errors_route_to_input() {
        let err = CliError::from(FieldError::ParamNotFound("charge".into()));
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("charge"));
        let err = CliError::from(FieldError::InvalidScene("frames must be at least 1".into()));
        assert_eq!(err.exit_code(), 12);
        assert_eq!(CliError::from(FieldError::InvalidDimensions).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let err = CliError::from(bad_json.unwrap_err());
        assert_eq!(err.exit_code(), 13);
    }
}
