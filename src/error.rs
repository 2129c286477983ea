use std::path::PathBuf;
use thiserror::Error;

/// The main error type for paramgate operations.
///
/// Every failure is raised synchronously to the caller; there is no
/// internal recovery or partial resolution. The only non-error fallback
/// is the explicit default path, which is a designed success path.
#[derive(Debug, Error)]
pub enum ParamgateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse log data JSON from {path}: {source}")]
    LogDataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Log data must be a JSON object, got {found}")]
    LogDataNotObject { found: &'static str },

    #[error("Invalid extraction spec: {message}")]
    InvalidSpec { message: String },

    #[error("Required parameter with key(s) {keys} of type {expected} not found{hint}")]
    MissingRequired {
        keys: String,
        expected: &'static str,
        hint: String,
    },

    #[error("Value {value} for key '{key}' cannot be coerced to {expected}")]
    Coerce {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Value {value} for key '{key}' cannot be converted to int without losing precision")]
    PrecisionLoss { key: String, value: String },

    #[error("Value for key '{key}' is null but the parameter is not optional")]
    UnexpectedNull { key: String },

    #[error("Value {value} for key '{key}' is out of the allowed range [{min}, {max}]")]
    OutOfRange {
        key: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Invalid value {value} for enum {enum_name} at key '{key}'. Valid values are: {valid}")]
    UnknownEnumValue {
        key: String,
        value: String,
        enum_name: &'static str,
        valid: String,
    },

    #[error(
        "Ambiguous value {value} for enum {enum_name} at key '{key}': \
         matches both {first} and {second}"
    )]
    AmbiguousEnumValue {
        key: String,
        value: String,
        enum_name: &'static str,
        first: &'static str,
        second: &'static str,
    },

    #[error("Unknown parameter set: '{0}' (supported: hyper, augmentation, export)")]
    UnknownParamSet(String),

    #[error("Strict resolution failed: {defaulted} parameter(s) fell back to defaults")]
    StrictDefaults { defaulted: usize },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(serde_json::Error),
}

impl ParamgateError {
    /// Builds the missing-required-parameter error, naming every tried
    /// key and the declared range when one was given.
    pub(crate) fn missing_required(
        keys: &[&str],
        expected: &'static str,
        range: Option<(String, String)>,
    ) -> Self {
        let keys = format!(
            "[{}]",
            keys.iter()
                .map(|k| format!("\"{k}\""))
                .collect::<Vec<_>>()
                .join(", ")
        );
        let hint = match range {
            Some((min, max)) => format!(". Expected value within the range [{min}, {max}]"),
            None => String::new(),
        };
        ParamgateError::MissingRequired {
            keys,
            expected,
            hint,
        }
    }
}
