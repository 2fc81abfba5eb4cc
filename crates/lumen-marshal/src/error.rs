//! Error types for the marshalling pipeline.
//!
//! Three error families cover the three provider kinds: [`ReadError`] for
//! body readers, [`WriteError`] for body writers, and [`ParamError`] for
//! parameter converters. Adapters that wrap other providers propagate these
//! unchanged, except for the handful of degrade-to-absent cases documented
//! on the adapters themselves.

use crate::EntityType;
use mime::Mime;
use thiserror::Error;

/// Error produced while reading an entity from a request or response body.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The body stream held no entity at all.
    ///
    /// Readers for types without an empty representation (numbers, booleans,
    /// structured documents) signal this instead of failing, so that
    /// container-aware callers can translate an empty stream into absence.
    #[error("no content in entity stream")]
    NoContent,

    /// The body could not be parsed as the declared type.
    #[error("malformed {declared} entity: {message}")]
    Malformed {
        /// Rendered descriptor of the declared type.
        declared: String,
        /// Parse failure detail from the reader.
        message: String,
    },

    /// The body is not valid UTF-8 text.
    #[error("entity body is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// No reader is registered for the declared type and media type.
    #[error("no body reader registered for {declared} ({media_type})")]
    NoReader {
        /// Rendered descriptor of the declared type.
        declared: String,
        /// Media type of the body.
        media_type: String,
    },
}

impl ReadError {
    /// Creates a [`ReadError::Malformed`] for the given declared type.
    #[must_use]
    pub fn malformed(declared: &EntityType, message: impl std::fmt::Display) -> Self {
        Self::Malformed {
            declared: declared.to_string(),
            message: message.to_string(),
        }
    }

    /// Creates a [`ReadError::NoReader`] for the given lookup key.
    #[must_use]
    pub fn no_reader(declared: &EntityType, media_type: &Mime) -> Self {
        Self::NoReader {
            declared: declared.to_string(),
            media_type: media_type.to_string(),
        }
    }
}

/// Error produced while writing an entity to a body.
#[derive(Debug, Error)]
pub enum WriteError {
    /// No writer is registered for the declared type and media type.
    #[error("no body writer registered for {declared} ({media_type})")]
    NoWriter {
        /// Rendered descriptor of the declared type.
        declared: String,
        /// Media type of the body.
        media_type: String,
    },

    /// The entity could not be serialized as the declared type.
    #[error("failed to write {declared} entity: {message}")]
    Failed {
        /// Rendered descriptor of the declared type.
        declared: String,
        /// Serialization failure detail from the writer.
        message: String,
    },
}

impl WriteError {
    /// Creates a [`WriteError::NoWriter`] for the given lookup key.
    #[must_use]
    pub fn no_writer(declared: &EntityType, media_type: &Mime) -> Self {
        Self::NoWriter {
            declared: declared.to_string(),
            media_type: media_type.to_string(),
        }
    }

    /// Creates a [`WriteError::Failed`] for the given declared type.
    #[must_use]
    pub fn failed(declared: &EntityType, message: impl std::fmt::Display) -> Self {
        Self::Failed {
            declared: declared.to_string(),
            message: message.to_string(),
        }
    }
}

/// Error produced while converting a parameter between its string
/// representation and the declared type.
#[derive(Debug, Error)]
pub enum ParamError {
    /// The parameter was not supplied and the declared type requires one.
    #[error("missing required {declared} parameter")]
    Missing {
        /// Rendered descriptor of the declared type.
        declared: String,
    },

    /// The supplied string could not be parsed as the declared type.
    #[error("invalid {declared} parameter: {message}")]
    Invalid {
        /// Rendered descriptor of the declared type.
        declared: String,
        /// Parse failure detail from the converter.
        message: String,
    },
}

impl ParamError {
    /// Creates a [`ParamError::Missing`] for the given declared type.
    #[must_use]
    pub fn missing(declared: &EntityType) -> Self {
        Self::Missing {
            declared: declared.to_string(),
        }
    }

    /// Creates a [`ParamError::Invalid`] for the given declared type.
    #[must_use]
    pub fn invalid(declared: &EntityType, message: impl std::fmt::Display) -> Self {
        Self::Invalid {
            declared: declared.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = ReadError::malformed(&EntityType::of::<i32>(), "invalid digit");
        assert!(err.to_string().contains("i32"));
        assert!(err.to_string().contains("invalid digit"));

        let err = ReadError::no_reader(&EntityType::of::<i32>(), &mime::TEXT_PLAIN);
        assert!(err.to_string().contains("text/plain"));
    }

    #[test]
    fn test_param_error_display() {
        let err = ParamError::missing(&EntityType::of::<String>());
        assert!(err.to_string().contains("missing"));

        let err = ParamError::invalid(&EntityType::of::<i32>(), "not a number");
        assert!(err.to_string().contains("not a number"));
    }
}
