use std::num::ParseFloatError;
use thiserror::Error;

/// Coarse classification shared by every error the crate surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field has the wrong representation (not a string, or absent when required).
    Type,
    /// Field is a string but not parseable or not part of its vocabulary.
    Value,
    /// A required combination of fields is absent.
    Precondition,
    /// The remote API answered something the caller cannot interpret.
    Generic,
}

/// Why a numeric field failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Integers have no width limit; only the shape is checked.
    #[error("expected an optional sign followed by digits")]
    Integer,

    #[error(transparent)]
    Float(#[from] ParseFloatError),
}

impl ParseFailure {
    pub fn expected(&self) -> &'static str {
        match self {
            ParseFailure::Integer => "integer",
            ParseFailure::Float(_) => "float",
        }
    }
}

/// Rejection raised before any request leaves the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("parameter {field} should be a string")]
    Type { field: &'static str },

    #[error("parameter {field} is required")]
    MissingField { field: &'static str },

    #[error("parameter {field} must allow {} parse", .source.expected())]
    Unparseable {
        field: &'static str,
        #[source]
        source: ParseFailure,
    },

    #[error("parameter {field} should be one of the following: {allowed:?}")]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("Must provide 'qty', 'price' and/or 'stopPx'.")]
    MissingAmendment,

    #[error("order parameters must be a JSON object")]
    NotAnObject,

    #[error("'{id}' is not a valid order id")]
    InvalidOrderId { id: String },
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Type { .. }
            | ValidationError::MissingField { .. }
            | ValidationError::NotAnObject => ErrorKind::Type,
            ValidationError::Unparseable { .. }
            | ValidationError::NotAllowed { .. }
            | ValidationError::InvalidOrderId { .. } => ErrorKind::Value,
            ValidationError::MissingAmendment => ErrorKind::Precondition,
        }
    }

    /// Name of the offending field, if the error is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Type { field }
            | ValidationError::MissingField { field }
            | ValidationError::Unparseable { field, .. }
            | ValidationError::NotAllowed { field, .. } => Some(*field),
            ValidationError::InvalidOrderId { .. } => Some("id"),
            ValidationError::MissingAmendment | ValidationError::NotAnObject => None,
        }
    }
}
