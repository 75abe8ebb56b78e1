//! Structured error types shared across RTSC crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`RtscError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message naming the offending value.
    pub message: String,
    /// Contextual key value pairs (parameter names, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Records the file the error refers to under the `path` key.
    pub fn with_path(self, path: &Path) -> Self {
        self.with_context("path", path.display().to_string())
    }

    /// Records a numeric quantity in `Debug` float form (`-1.0`, `0.4`).
    pub fn with_value(self, key: impl Into<String>, value: f64) -> Self {
        self.with_context(key, format!("{value:?}"))
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the RTSC toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum RtscError {
    /// A physical parameter lies outside its declared bounds.
    #[error("parameter out of range: {0}")]
    OutOfRange(ErrorInfo),
    /// The Allen-Dynes denominator is zero or negative.
    #[error("non-positive denominator: {0}")]
    NonPositiveDenominator(ErrorInfo),
    /// The exponential factor is too small to yield a meaningful Tc.
    #[error("numeric underflow: {0}")]
    NumericUnderflow(ErrorInfo),
    /// A required input file is missing or unreadable.
    #[error("missing input: {0}")]
    MissingInput(ErrorInfo),
    /// Measurement data is malformed or insufficient.
    #[error("data error: {0}")]
    Data(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

/// Renders as `[code] message (key=value, ...); hint: ...`.
impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {hint}")?;
        }
        Ok(())
    }
}

impl RtscError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            RtscError::OutOfRange(info)
            | RtscError::NonPositiveDenominator(info)
            | RtscError::NumericUnderflow(info)
            | RtscError::MissingInput(info)
            | RtscError::Data(info)
            | RtscError::Serde(info) => info,
        }
    }

    /// Stable snake-case name of the error family.
    pub fn kind(&self) -> &'static str {
        match self {
            RtscError::OutOfRange(_) => "out_of_range_parameter",
            RtscError::NonPositiveDenominator(_) => "non_positive_denominator",
            RtscError::NumericUnderflow(_) => "numeric_underflow",
            RtscError::MissingInput(_) => "missing_input_file",
            RtscError::Data(_) => "data",
            RtscError::Serde(_) => "serde",
        }
    }

    /// Shorthand for an [`RtscError::OutOfRange`] naming the parameter.
    pub fn out_of_range(parameter: &str, message: impl Into<String>) -> Self {
        RtscError::OutOfRange(
            ErrorInfo::new("out-of-range", message).with_context("parameter", parameter),
        )
    }

    /// A file the caller named could not be read.
    pub fn missing_input(what: &str, path: &Path, err: &io::Error) -> Self {
        RtscError::MissingInput(
            ErrorInfo::new("missing-input", format!("cannot read {what} {}", path.display()))
                .with_path(path)
                .with_hint(err.to_string()),
        )
    }

    /// Shorthand for an [`RtscError::Data`] error.
    pub fn data(code: &str, message: impl Into<String>) -> Self {
        RtscError::Data(ErrorInfo::new(code, message))
    }
}
