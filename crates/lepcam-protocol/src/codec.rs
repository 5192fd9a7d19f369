//! Binary-to-text conversion.
//!
//! Two jobs live here: base64 expansion of raw sensor words for the
//! image response, and the dotted-quad address strings carried by the
//! wifi configuration fields.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::ProtocolError;

/// Base64-encode `data`, failing if the encoded text would not fit in
/// `cap` bytes.
///
/// The encoded length is computed up front and the output allocated
/// exactly once. `cap` is the serialization buffer the text must later
/// share with the rest of the response document, so oversized payloads
/// are rejected before any encoding work happens.
pub fn encode_base64(
    data: &[u8],
    what: &'static str,
    cap: usize,
) -> Result<String, ProtocolError> {
    let encoded_len =
        base64::encoded_len(data.len(), true).ok_or(ProtocolError::EncodeFailed { what })?;
    if encoded_len > cap {
        return Err(ProtocolError::PayloadTooLarge {
            what,
            len: data.len(),
            cap,
        });
    }

    let mut buf = vec![0u8; encoded_len];
    let written = STANDARD
        .encode_slice(data, &mut buf)
        .map_err(|_| ProtocolError::EncodeFailed { what })?;
    buf.truncate(written);
    String::from_utf8(buf).map_err(|_| ProtocolError::EncodeFailed { what })
}

/// Serialize 16-bit sensor words in little-endian order, the layout
/// the frame buffer has in device memory.
pub fn words_to_le_bytes(words: &[u16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(words.len() * 2);
    for word in words {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Reassemble little-endian bytes into 16-bit words.
///
/// Returns `None` on an odd byte count.
pub fn le_bytes_to_words(bytes: &[u8]) -> Option<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    )
}

/// Parse a dotted-quad address string into the device's storage order:
/// the first textual segment lands in index 3.
///
/// Exactly four decimal segments are required and each must fit in a
/// byte; anything else is rejected. `field` names the argument for the
/// error.
pub fn parse_dotted_quad(text: &str, field: &'static str) -> Result<[u8; 4], ProtocolError> {
    let bad = || ProtocolError::BadAddress {
        field,
        value: text.to_string(),
    };

    let segments: Vec<&str> = text.split('.').collect();
    if segments.len() != 4 {
        return Err(bad());
    }

    let mut quad = [0u8; 4];
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let value: u32 = segment.parse().map_err(|_| bad())?;
        if value > 255 {
            return Err(bad());
        }
        quad[3 - i] = value as u8;
    }
    Ok(quad)
}

/// Format a stored address quad for the wire. Index 3 prints first,
/// undoing the storage order.
pub fn format_dotted_quad(quad: &[u8; 4]) -> String {
    format!("{}.{}.{}.{}", quad[3], quad[2], quad[1], quad[0])
}
