//! Error taxonomy for the command core
//!
//! Every variant is terminal for its command; nothing here is retried
//! internally. Failures raised before the first device call leave no side
//! effects. `kind()` is the stable string reported in the error envelope.

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to the host embedding the command core.
#[derive(Error, Debug)]
pub enum Error {
    /// The request envelope is missing a usable method name.
    #[error("{0}")]
    MalformedRequest(String),

    /// The method name is not present in the registry.
    #[error("method {0:?} not found")]
    MethodNotFound(String),

    /// A request payload failed shape validation during command construction.
    #[error("{0}")]
    Validation(String),

    /// A transaction descriptor field violated an encoder rule.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The user declined the confirmation prompt. An expected outcome, not a
    /// system fault.
    #[error("action denied by user")]
    ActionDenied,

    /// The transaction type code has no registered encoder variant.
    #[error("unknown transaction type: {0:#06x}")]
    UnknownTransactionType(u32),

    /// The UI surface could not be opened.
    #[error("popup unavailable: {0}")]
    Popup(String),

    /// The device collaborator failed; surfaced verbatim, never retried here.
    #[error("device call failed: {0}")]
    Device(#[source] anyhow::Error),

    /// A batch failed while executing. Terminal for the command; batches
    /// after `index` were never started. The kind string delegates to the
    /// underlying failure.
    #[error("batch {index} failed: {source}")]
    Batch {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap a construction-time shape violation.
    pub(crate) fn validation(err: impl std::fmt::Display) -> Self {
        Error::Validation(err.to_string())
    }

    /// Wrap an encoder field violation.
    pub(crate) fn invalid_parameter(err: impl std::fmt::Display) -> Self {
        Error::InvalidParameter(err.to_string())
    }

    /// Stable kind string for the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedRequest(_) => "MalformedRequest",
            Error::MethodNotFound(_) => "MethodNotFound",
            Error::Validation(_) => "ValidationError",
            Error::InvalidParameter(_) => "InvalidParameter",
            Error::ActionDenied => "ActionDenied",
            Error::UnknownTransactionType(_) => "UnknownTransactionType",
            Error::Popup(_) => "PopupError",
            Error::Device(_) => "DeviceCommunicationError",
            Error::Batch { source, .. } => source.kind(),
        }
    }

    /// Convert into the boundary error object.
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// The `{kind, message}` error object returned across the host boundary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub kind: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings() {
        assert_eq!(Error::ActionDenied.kind(), "ActionDenied");
        assert_eq!(Error::UnknownTransactionType(0x4157).kind(), "UnknownTransactionType");
        assert_eq!(
            Error::MethodNotFound("nope".into()).kind(),
            "MethodNotFound"
        );
    }

    #[test]
    fn test_unknown_type_names_code() {
        let err = Error::UnknownTransactionType(0x4157);
        assert!(err.to_string().contains("0x4157"));
    }

    #[test]
    fn test_batch_wrapper_delegates_kind() {
        let err = Error::Batch {
            index: 1,
            source: Box::new(Error::UnknownTransactionType(0x4157)),
        };
        assert_eq!(err.kind(), "UnknownTransactionType");
        assert!(err.to_string().contains("batch 1"));
        assert!(err.to_string().contains("0x4157"));
    }

    #[test]
    fn test_envelope() {
        let env = Error::Validation("parameter \"path\" is missing".into()).to_envelope();
        assert_eq!(env.kind, "ValidationError");
        assert!(env.message.contains("path"));
    }
}
