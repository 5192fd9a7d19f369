//! Response assembly.
//!
//! All responses are serialized into one of two buffers owned by
//! [`ResponseBuffers`]: a large one sized for a full image document
//! and a small one for status/config/wifi replies. Small replies are
//! compact JSON wrapped in the start/stop marker pair (with a trailing
//! NUL in the buffer) so a stream transport can recover message
//! boundaries; image documents go out bare and pretty-printed.
//!
//! Builders take `&mut self`, so one response is in flight at a time
//! by construction. The returned slice stays valid until the next
//! build call reuses the buffer.

use std::io;

use log::error;
use serde_json::{json, Value};

use crate::codec::{encode_base64, format_dotted_quad, words_to_le_bytes};
use crate::constants::{MAX_IMAGE_TEXT_LEN, MAX_RSP_TEXT_LEN, MSG_START, MSG_STOP};
use crate::error::ProtocolError;
use crate::types::{CameraConfig, DeviceInfo, SensorFrame, TimeParts, WifiInfo};

/// `io::Write` adapter that refuses to grow its buffer past a fixed
/// capacity, so serialization fails instead of reallocating.
struct BoundedWriter<'a> {
    buf: &'a mut Vec<u8>,
    cap: usize,
}

impl io::Write for BoundedWriter<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        if self.buf.len() + data.len() > self.cap {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "response buffer full",
            ));
        }
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Metadata section shared by the status response and the image
/// document: camera identity plus the formatted clock strings.
fn metadata_value(wifi: &WifiInfo, device: &DeviceInfo, clock: &TimeParts) -> Value {
    json!({
        "Camera": wifi.ap_ssid,
        "Model": device.model,
        "Version": device.version,
        "Time": clock.time_string(),
        "Date": clock.date_string(),
    })
}

/// Owner of the two pre-allocated response buffers.
///
/// The device keeps exactly one of these. Every build reuses the same
/// allocations; a response that will not fit fails rather than grow
/// them.
#[derive(Debug)]
pub struct ResponseBuffers {
    /// Buffer for the bare image document.
    image_text: Vec<u8>,
    /// Buffer for framed small replies.
    response_text: Vec<u8>,
}

impl Default for ResponseBuffers {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseBuffers {
    /// Pre-allocate both buffers at their fixed capacities.
    pub fn new() -> Self {
        ResponseBuffers {
            image_text: Vec::with_capacity(MAX_IMAGE_TEXT_LEN),
            response_text: Vec::with_capacity(MAX_RSP_TEXT_LEN),
        }
    }

    /// Serialize a small response document compactly between the
    /// framing markers.
    ///
    /// The NUL terminator lands in the buffer one byte past the
    /// returned slice; the slice itself ends at the stop marker. On
    /// overflow the buffer is emptied so a torn reply can never leak
    /// out.
    fn write_small(&mut self, root: &Value) -> Result<&[u8], ProtocolError> {
        self.response_text.clear();
        self.response_text.push(MSG_START);

        let mut writer = BoundedWriter {
            buf: &mut self.response_text,
            // Keep room for the stop marker and the NUL.
            cap: MAX_RSP_TEXT_LEN - 2,
        };
        if serde_json::to_writer(&mut writer, root).is_err() {
            error!("response exceeds the {MAX_RSP_TEXT_LEN}-byte buffer");
            self.response_text.clear();
            return Err(ProtocolError::ResponseTooLarge {
                cap: MAX_RSP_TEXT_LEN,
            });
        }

        self.response_text.push(MSG_STOP);
        self.response_text.push(0);
        Ok(&self.response_text[..self.response_text.len() - 1])
    }

    /// Build the framed `get_status` reply.
    pub fn status_response(
        &mut self,
        wifi: &WifiInfo,
        device: &DeviceInfo,
        clock: &TimeParts,
    ) -> Result<&[u8], ProtocolError> {
        let root = json!({ "status": metadata_value(wifi, device, clock) });
        self.write_small(&root)
    }

    /// Build the framed `get_config` reply. All three parameters go
    /// out as numbers, AGC as 0/1.
    pub fn config_response(&mut self, config: &CameraConfig) -> Result<&[u8], ProtocolError> {
        let root = json!({
            "config": {
                "agc_enabled": u8::from(config.agc_enabled),
                "emissivity": config.emissivity,
                "gain_mode": config.gain_mode.as_u8(),
            }
        });
        self.write_small(&root)
    }

    /// Build the framed `get_wifi` reply. Passwords stay on the
    /// device; addresses go out as dotted-quad text.
    pub fn wifi_response(&mut self, wifi: &WifiInfo) -> Result<&[u8], ProtocolError> {
        let root = json!({
            "wifi": {
                "ap_ssid": wifi.ap_ssid,
                "sta_ssid": wifi.sta_ssid,
                "flags": wifi.flags,
                "ap_ip_addr": format_dotted_quad(&wifi.ap_ip_addr),
                "sta_ip_addr": format_dotted_quad(&wifi.sta_ip_addr),
                "sta_netmask": format_dotted_quad(&wifi.sta_netmask),
                "cur_ip_addr": format_dotted_quad(&wifi.cur_ip_addr),
            }
        });
        self.write_small(&root)
    }

    /// Build the bare, pretty-printed image document: metadata, then
    /// the base64 radiometric section, then the base64 telemetry
    /// section.
    ///
    /// The radiometric text is encoded first; if the telemetry encode
    /// then fails, the radiometric text is dropped on the way out and
    /// nothing outlives the error. On success both encoded sections
    /// are owned by the document and freed with it.
    pub fn image_response(
        &mut self,
        frame: &SensorFrame,
        wifi: &WifiInfo,
        device: &DeviceInfo,
        clock: &TimeParts,
    ) -> Result<&[u8], ProtocolError> {
        let radiometric = encode_base64(
            &words_to_le_bytes(&frame.pixels),
            "radiometric data",
            MAX_IMAGE_TEXT_LEN,
        )?;
        let telemetry = encode_base64(
            &words_to_le_bytes(&frame.telemetry),
            "telemetry data",
            MAX_IMAGE_TEXT_LEN,
        )?;

        let root = json!({
            "metadata": metadata_value(wifi, device, clock),
            "radiometric": radiometric,
            "telemetry": telemetry,
        });

        self.image_text.clear();
        let mut writer = BoundedWriter {
            buf: &mut self.image_text,
            cap: MAX_IMAGE_TEXT_LEN,
        };
        if serde_json::to_writer_pretty(&mut writer, &root).is_err() {
            error!("image document exceeds the {MAX_IMAGE_TEXT_LEN}-byte buffer");
            self.image_text.clear();
            return Err(ProtocolError::ResponseTooLarge {
                cap: MAX_IMAGE_TEXT_LEN,
            });
        }
        Ok(&self.image_text)
    }
}
