//! Host-side error types.

use thiserror::Error;

/// Errors that can occur while parsing camera responses.
#[derive(Debug, Error)]
pub enum HostError {
    /// Response text is not a JSON document.
    #[error("invalid response document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Document carries none of the known top-level sections.
    #[error("response has no recognized section")]
    UnknownSection,

    /// An expected top-level section is absent.
    #[error("response is missing its {0:?} section")]
    MissingSection(&'static str),

    /// A required field is absent or has the wrong type.
    #[error("{section}.{field} is missing or mistyped")]
    BadField {
        /// Section the field belongs to.
        section: &'static str,
        /// Field name.
        field: &'static str,
    },

    /// A base64 payload failed to decode.
    #[error("cannot decode {what}: {source}")]
    BadPayload {
        /// Payload being decoded.
        what: &'static str,
        /// Decoder error.
        #[source]
        source: base64::DecodeError,
    },

    /// A decoded payload has an odd byte count and cannot form words.
    #[error("{what} has odd byte length {len}")]
    BadPayloadLength {
        /// Payload being decoded.
        what: &'static str,
        /// Offending byte count.
        len: usize,
    },

    /// An address string in a wifi section failed to parse.
    #[error(transparent)]
    BadAddress(#[from] lepcam_protocol::ProtocolError),
}
