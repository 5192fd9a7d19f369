//! Image document decoding.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;

use lepcam_protocol::le_bytes_to_words;

use crate::error::HostError;
use crate::responses::{int_of, str_of};

/// A fully decoded image document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Camera name from the metadata section.
    pub camera: String,
    /// Numeric model id.
    pub model: u32,
    /// Firmware version string.
    pub version: String,
    /// Formatted capture time.
    pub time: String,
    /// Formatted capture date.
    pub date: String,
    /// Radiometric pixel words, row-major.
    pub pixels: Vec<u16>,
    /// Telemetry words.
    pub telemetry: Vec<u16>,
}

impl ImageFile {
    /// Parse a bare image document back into sensor words.
    pub fn parse(text: &[u8]) -> Result<ImageFile, HostError> {
        let doc: Value = serde_json::from_slice(text)?;
        let meta = doc
            .get("metadata")
            .ok_or(HostError::MissingSection("metadata"))?;

        let pixels = decode_words(&doc, "radiometric")?;
        let telemetry = decode_words(&doc, "telemetry")?;

        Ok(ImageFile {
            camera: str_of(meta, "metadata", "Camera")?,
            model: int_of(meta, "metadata", "Model")? as u32,
            version: str_of(meta, "metadata", "Version")?,
            time: str_of(meta, "metadata", "Time")?,
            date: str_of(meta, "metadata", "Date")?,
            pixels,
            telemetry,
        })
    }
}

/// Decode one base64 section back into 16-bit words.
fn decode_words(doc: &Value, what: &'static str) -> Result<Vec<u16>, HostError> {
    let text = doc
        .get(what)
        .and_then(Value::as_str)
        .ok_or(HostError::MissingSection(what))?;
    let bytes = STANDARD
        .decode(text)
        .map_err(|source| HostError::BadPayload { what, source })?;
    le_bytes_to_words(&bytes).ok_or(HostError::BadPayloadLength {
        what,
        len: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_image_document() {
        // "AAARIg==" is bytes 00 00 11 22: words 0x0000, 0x2211.
        let text = br#"{
            "metadata": {
                "Camera": "tcam-5FA1",
                "Model": 2,
                "Version": "0.1.0",
                "Time": "21:10:14.205",
                "Date": "8/18/24"
            },
            "radiometric": "AAARIg==",
            "telemetry": "AAA="
        }"#;
        let image = ImageFile::parse(text).expect("should parse");
        assert_eq!(image.camera, "tcam-5FA1");
        assert_eq!(image.model, 2);
        assert_eq!(image.pixels, vec![0x0000, 0x2211]);
        assert_eq!(image.telemetry, vec![0x0000]);
    }

    #[test]
    fn test_missing_sections() {
        let text = br#"{"radiometric": "AAA=", "telemetry": "AAA="}"#;
        assert!(matches!(
            ImageFile::parse(text),
            Err(HostError::MissingSection("metadata"))
        ));
    }

    #[test]
    fn test_bad_base64() {
        let text = br#"{
            "metadata": {"Camera": "c", "Model": 2, "Version": "v", "Time": "t", "Date": "d"},
            "radiometric": "!!!not base64!!!",
            "telemetry": "AAA="
        }"#;
        assert!(matches!(
            ImageFile::parse(text),
            Err(HostError::BadPayload { what: "radiometric", .. })
        ));
    }

    #[test]
    fn test_odd_payload_length() {
        // "AAA=" decodes to 2 bytes; "AA==" decodes to 1.
        let text = br#"{
            "metadata": {"Camera": "c", "Model": 2, "Version": "v", "Time": "t", "Date": "d"},
            "radiometric": "AA==",
            "telemetry": "AAA="
        }"#;
        assert!(matches!(
            ImageFile::parse(text),
            Err(HostError::BadPayloadLength { what: "radiometric", len: 1 })
        ));
    }
}
