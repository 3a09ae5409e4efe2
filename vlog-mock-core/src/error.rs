//! Status codes and failure types.
//!
//! This module provides the error types surfaced by the mock:
//! - [`Code`]: Standard RPC status codes
//! - [`ParseCodeError`]: Rejection of an unrecognised code
//! - [`Failure`]: A structured failure carrying a code, a message and a reason
//! - [`ErrorInfo`] / [`RpcStatus`]: The `google.rpc` messages used to attach
//!   the reason as a binary error detail

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use prost::Message;

/// Standard RPC status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Code {
    Ok = 0,
    Canceled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Code {
    const ALL: [Code; 17] = [
        Code::Ok,
        Code::Canceled,
        Code::Unknown,
        Code::InvalidArgument,
        Code::DeadlineExceeded,
        Code::NotFound,
        Code::AlreadyExists,
        Code::PermissionDenied,
        Code::ResourceExhausted,
        Code::FailedPrecondition,
        Code::Aborted,
        Code::OutOfRange,
        Code::Unimplemented,
        Code::Internal,
        Code::Unavailable,
        Code::DataLoss,
        Code::Unauthenticated,
    ];

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Code::Ok => "ok",
            Code::Canceled => "canceled",
            Code::Unknown => "unknown",
            Code::InvalidArgument => "invalid_argument",
            Code::DeadlineExceeded => "deadline_exceeded",
            Code::NotFound => "not_found",
            Code::AlreadyExists => "already_exists",
            Code::PermissionDenied => "permission_denied",
            Code::ResourceExhausted => "resource_exhausted",
            Code::FailedPrecondition => "failed_precondition",
            Code::Aborted => "aborted",
            Code::OutOfRange => "out_of_range",
            Code::Unimplemented => "unimplemented",
            Code::Internal => "internal",
            Code::Unavailable => "unavailable",
            Code::DataLoss => "data_loss",
            Code::Unauthenticated => "unauthenticated",
        }
    }

    /// The numeric value of this code as used on the wire.
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Whether this is the `Ok` sentinel.
    pub fn is_ok(&self) -> bool {
        matches!(self, Code::Ok)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Code`] fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code: {input:?}")]
pub struct ParseCodeError {
    input: String,
}

impl ParseCodeError {
    fn new<S: Into<String>>(input: S) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl TryFrom<i64> for Code {
    type Error = ParseCodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Code::ALL.get(idx).copied())
            .ok_or_else(|| ParseCodeError::new(value.to_string()))
    }
}

impl FromStr for Code {
    type Err = ParseCodeError;

    /// Accepts the snake_case name (`not_found`), the canonical gRPC name
    /// (`NOT_FOUND`), either of them in double quotes (`"NOT_FOUND"`), and a
    /// decimal value in `0..=16`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(s);

        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            return name
                .parse::<i64>()
                .map_err(|_| ParseCodeError::new(s))
                .and_then(|n| Code::try_from(n).map_err(|_| ParseCodeError::new(s)));
        }

        match name {
            "ok" | "OK" => Ok(Code::Ok),
            "canceled" | "cancelled" | "CANCELLED" => Ok(Code::Canceled),
            "unknown" | "UNKNOWN" => Ok(Code::Unknown),
            "invalid_argument" | "INVALID_ARGUMENT" => Ok(Code::InvalidArgument),
            "deadline_exceeded" | "DEADLINE_EXCEEDED" => Ok(Code::DeadlineExceeded),
            "not_found" | "NOT_FOUND" => Ok(Code::NotFound),
            "already_exists" | "ALREADY_EXISTS" => Ok(Code::AlreadyExists),
            "permission_denied" | "PERMISSION_DENIED" => Ok(Code::PermissionDenied),
            "resource_exhausted" | "RESOURCE_EXHAUSTED" => Ok(Code::ResourceExhausted),
            "failed_precondition" | "FAILED_PRECONDITION" => Ok(Code::FailedPrecondition),
            "aborted" | "ABORTED" => Ok(Code::Aborted),
            "out_of_range" | "OUT_OF_RANGE" => Ok(Code::OutOfRange),
            "unimplemented" | "UNIMPLEMENTED" => Ok(Code::Unimplemented),
            "internal" | "INTERNAL" => Ok(Code::Internal),
            "unavailable" | "UNAVAILABLE" => Ok(Code::Unavailable),
            "data_loss" | "DATA_LOSS" => Ok(Code::DataLoss),
            "unauthenticated" | "UNAUTHENTICATED" => Ok(Code::Unauthenticated),
            _ => Err(ParseCodeError::new(s)),
        }
    }
}

/// Type URL of the `google.rpc.ErrorInfo` detail.
pub const ERROR_INFO_TYPE_URL: &str = "type.googleapis.com/google.rpc.ErrorInfo";

/// `google.rpc.ErrorInfo`.
#[derive(Clone, PartialEq, Message)]
pub struct ErrorInfo {
    #[prost(string, tag = "1")]
    pub reason: String,
    #[prost(string, tag = "2")]
    pub domain: String,
    #[prost(map = "string, string", tag = "3")]
    pub metadata: HashMap<String, String>,
}

/// `google.rpc.Status`, the payload of the `grpc-status-details-bin` trailer.
#[derive(Clone, PartialEq, Message)]
pub struct RpcStatus {
    #[prost(int32, tag = "1")]
    pub code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
    #[prost(message, repeated, tag = "3")]
    pub details: Vec<prost_types::Any>,
}

// ============================================================================
// Failure - the structured error every call reports
// ============================================================================

/// A per-call failure: a status code, a human readable message and a
/// machine readable reason.
///
/// The reason always equals the message. It is carried separately because it
/// travels as a `google.rpc.ErrorInfo` detail rather than in the status line.
///
/// # Example
///
/// ```
/// use vlog_mock_core::{Code, Failure};
///
/// let failure = Failure::invalid_argument("Configuration missing");
/// assert_eq!(failure.code(), Code::InvalidArgument);
/// assert_eq!(failure.reason(), "Configuration missing");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    code: Code,
    message: String,
    reason: String,
}

impl Failure {
    /// Create a failure with a code and message.
    pub fn new<S: Into<String>>(code: Code, message: S) -> Self {
        let message = message.into();
        Self {
            code,
            reason: message.clone(),
            message,
        }
    }

    /// Create an invalid argument failure.
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::new(Code::InvalidArgument, message)
    }

    /// Get the status code.
    pub fn code(&self) -> Code {
        self.code
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the machine readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The `google.rpc.ErrorInfo` detail for this failure.
    pub fn error_info(&self) -> ErrorInfo {
        ErrorInfo {
            reason: self.reason.clone(),
            ..Default::default()
        }
    }

    /// Encode this failure as a binary `google.rpc.Status` with the
    /// [`ErrorInfo`] detail attached.
    pub fn encode_details(&self) -> Bytes {
        let status = RpcStatus {
            code: self.code.as_i32(),
            message: self.message.clone(),
            details: vec![prost_types::Any {
                type_url: ERROR_INFO_TYPE_URL.to_string(),
                value: self.error_info().encode_to_vec(),
            }],
        };
        Bytes::from(status.encode_to_vec())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for Failure {}

// ---- Conversions into tonic types (feature-gated) ----

#[cfg(feature = "tonic")]
impl From<Code> for ::tonic::Code {
    fn from(code: Code) -> Self {
        match code {
            Code::Ok => ::tonic::Code::Ok,
            Code::Canceled => ::tonic::Code::Cancelled,
            Code::Unknown => ::tonic::Code::Unknown,
            Code::InvalidArgument => ::tonic::Code::InvalidArgument,
            Code::DeadlineExceeded => ::tonic::Code::DeadlineExceeded,
            Code::NotFound => ::tonic::Code::NotFound,
            Code::AlreadyExists => ::tonic::Code::AlreadyExists,
            Code::PermissionDenied => ::tonic::Code::PermissionDenied,
            Code::ResourceExhausted => ::tonic::Code::ResourceExhausted,
            Code::FailedPrecondition => ::tonic::Code::FailedPrecondition,
            Code::Aborted => ::tonic::Code::Aborted,
            Code::OutOfRange => ::tonic::Code::OutOfRange,
            Code::Unimplemented => ::tonic::Code::Unimplemented,
            Code::Internal => ::tonic::Code::Internal,
            Code::Unavailable => ::tonic::Code::Unavailable,
            Code::DataLoss => ::tonic::Code::DataLoss,
            Code::Unauthenticated => ::tonic::Code::Unauthenticated,
        }
    }
}

#[cfg(feature = "tonic")]
impl From<Failure> for ::tonic::Status {
    fn from(failure: Failure) -> Self {
        let details = failure.encode_details();
        ::tonic::Status::with_details(failure.code.into(), failure.message, details)
    }
}
