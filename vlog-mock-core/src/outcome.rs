//! Configured outcomes and the keys they are stored under.

use std::fmt;

use crate::error::{Code, ParseCodeError};

/// The `(vin, api)` pair an outcome is configured for.
///
/// Keys compare by exact value. No case folding or trimming is applied, and
/// empty strings are valid components.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConfigKey {
    vin: String,
    api: String,
}

impl ConfigKey {
    pub fn new<V: Into<String>, A: Into<String>>(vin: V, api: A) -> Self {
        Self {
            vin: vin.into(),
            api: api.into(),
        }
    }

    pub fn vin(&self) -> &str {
        &self.vin
    }

    pub fn api(&self) -> &str {
        &self.api
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vin, self.api)
    }
}

/// What the mock answers for a configured key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure(ConfiguredFailure),
}

/// A configured non-`Ok` code and the optional text to report with it.
///
/// Only [`Outcome::from_code`] builds one, so `code` is never [`Code::Ok`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfiguredFailure {
    code: Code,
    message: String,
}

impl ConfiguredFailure {
    pub fn code(&self) -> Code {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Outcome {
    /// Build an outcome from a status code. `Code::Ok` becomes
    /// [`Outcome::Success`] and the message is dropped.
    pub fn from_code<S: Into<String>>(code: Code, message: S) -> Self {
        if code.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure(ConfiguredFailure {
                code,
                message: message.into(),
            })
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// The error code of a configuration entry as supplied by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CodeSpec {
    /// A symbolic or quoted name, or a decimal string.
    Symbolic(String),
    Numeric(i64),
}

impl CodeSpec {
    /// Pick the code form from the two optional wire fields. A non-empty
    /// string wins over the integer.
    pub fn from_fields<S: Into<String>>(symbolic: S, numeric: i64) -> Self {
        let symbolic = symbolic.into();
        if symbolic.is_empty() {
            CodeSpec::Numeric(numeric)
        } else {
            CodeSpec::Symbolic(symbolic)
        }
    }

    /// Parse into a recognised status code.
    pub fn resolve(&self) -> Result<Code, ParseCodeError> {
        match self {
            CodeSpec::Symbolic(s) => s.parse(),
            CodeSpec::Numeric(n) => Code::try_from(*n),
        }
    }
}
