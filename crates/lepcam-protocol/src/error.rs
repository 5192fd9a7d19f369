//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while parsing commands or building responses.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Inbound text is not a JSON document.
    #[error("invalid command document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Document has no string "cmd" field.
    #[error("command document has no string \"cmd\" field")]
    MissingCommand,

    /// Command requires an args object that was not supplied.
    #[error("{command} requires an \"args\" object")]
    MissingArgs {
        /// Wire name of the rejected command.
        command: &'static str,
    },

    /// Too few recognized argument fields for this command.
    #[error("{command} needs {required} argument field(s), found {found}")]
    MissingFields {
        /// Wire name of the rejected command.
        command: &'static str,
        /// Fields the command requires.
        required: usize,
        /// Recognized fields actually present.
        found: usize,
    },

    /// A string argument exceeds its fixed length limit.
    #[error("{field} longer than {max} bytes")]
    StringTooLong {
        /// Argument field name.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// A string argument carries a non-string value.
    #[error("{field} must be a string")]
    ExpectedString {
        /// Argument field name.
        field: &'static str,
    },

    /// A dotted-quad address field did not parse.
    #[error("malformed dotted-quad {field}: {value:?}")]
    BadAddress {
        /// Argument field name.
        field: &'static str,
        /// Offending text.
        value: String,
    },

    /// Serialized response did not fit its pre-allocated buffer.
    #[error("response exceeds the {cap}-byte output buffer")]
    ResponseTooLarge {
        /// Capacity of the buffer that overflowed.
        cap: usize,
    },

    /// A binary payload cannot be base64-encoded within bounds.
    #[error("cannot encode {what}: {len} bytes exceeds the {cap}-byte limit")]
    PayloadTooLarge {
        /// Payload being encoded.
        what: &'static str,
        /// Raw payload length.
        len: usize,
        /// Text cap it failed to fit.
        cap: usize,
    },

    /// The base64 encoder rejected the payload.
    #[error("base64 encoding of {what} failed")]
    EncodeFailed {
        /// Payload being encoded.
        what: &'static str,
    },
}
