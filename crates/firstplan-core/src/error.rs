//! Error taxonomy shared by every core operation.

use thiserror::Error;

/// Errors raised by unit parsing, table lookups, instruction parsing, and
/// plan generation.
///
/// Each error is raised where it is detected and propagated unchanged; no
/// core operation retries or recovers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A malformed time, distance, or pace literal.
    #[error("malformed {what} {input:?}: {reason}")]
    Format {
        what: &'static str,
        input: String,
        reason: String,
    },

    /// An unrecognized length unit.
    #[error("unknown length unit {0:?} (expected m, km, ft, or mile)")]
    Unit(String),

    /// A negative magnitude, or a value outside a tabulated range.
    #[error("{0}")]
    Range(String),

    /// An unknown name, or a target beyond the pace table.
    #[error("{what} {name:?} not found")]
    NotFound { what: &'static str, name: String },

    /// An ill-formed instruction or pace table line.
    #[error("syntax error in {input:?}: {message}")]
    Syntax { input: String, message: String },

    /// An invalid argument to an otherwise well-formed call.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A report template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),
}

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(what: &'static str, input: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            what,
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(what: &'static str, name: &str) -> Self {
        Self::NotFound {
            what,
            name: name.to_owned(),
        }
    }

    pub(crate) fn syntax(input: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            input: input.to_owned(),
            message: message.into(),
        }
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Template(message)
    }
}
