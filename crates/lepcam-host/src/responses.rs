//! Typed parsing of the camera's small responses.

use serde_json::Value;

use lepcam_protocol::{parse_dotted_quad, CameraConfig, GainMode};

use crate::error::HostError;

/// Status report fields from a `get_status` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Camera name (its access-point SSID).
    pub camera: String,
    /// Numeric model id.
    pub model: u32,
    /// Firmware version string.
    pub version: String,
    /// Formatted clock string.
    pub time: String,
    /// Formatted date string.
    pub date: String,
}

/// Network report from a `get_wifi` reply. Passwords never travel.
///
/// Addresses are stored the way the camera stores them: first textual
/// segment in index 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiReport {
    /// Access-point SSID.
    pub ap_ssid: String,
    /// Client-mode SSID.
    pub sta_ssid: String,
    /// Mode/enable flag bits.
    pub flags: u8,
    /// Access-point address.
    pub ap_ip_addr: [u8; 4],
    /// Static client address.
    pub sta_ip_addr: [u8; 4],
    /// Netmask for the static client address.
    pub sta_netmask: [u8; 4],
    /// Address currently bound.
    pub cur_ip_addr: [u8; 4],
}

/// A parsed small response, keyed by its single top-level section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// `status` section.
    Status(StatusReport),
    /// `config` section.
    Config(CameraConfig),
    /// `wifi` section.
    Wifi(WifiReport),
}

impl Response {
    /// Parse a de-framed small response payload.
    pub fn parse(payload: &[u8]) -> Result<Response, HostError> {
        let doc: Value = serde_json::from_slice(payload)?;
        if let Some(section) = doc.get("status") {
            return Ok(Response::Status(parse_status(section)?));
        }
        if let Some(section) = doc.get("config") {
            return Ok(Response::Config(parse_config(section)?));
        }
        if let Some(section) = doc.get("wifi") {
            return Ok(Response::Wifi(parse_wifi(section)?));
        }
        Err(HostError::UnknownSection)
    }
}

pub(crate) fn str_of(
    section: &Value,
    sec: &'static str,
    field: &'static str,
) -> Result<String, HostError> {
    section
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(HostError::BadField {
            section: sec,
            field,
        })
}

pub(crate) fn int_of(
    section: &Value,
    sec: &'static str,
    field: &'static str,
) -> Result<i64, HostError> {
    section
        .get(field)
        .and_then(Value::as_i64)
        .ok_or(HostError::BadField {
            section: sec,
            field,
        })
}

fn quad_of(
    section: &Value,
    sec: &'static str,
    field: &'static str,
) -> Result<[u8; 4], HostError> {
    let text = str_of(section, sec, field)?;
    Ok(parse_dotted_quad(&text, field)?)
}

fn parse_status(section: &Value) -> Result<StatusReport, HostError> {
    Ok(StatusReport {
        camera: str_of(section, "status", "Camera")?,
        model: int_of(section, "status", "Model")? as u32,
        version: str_of(section, "status", "Version")?,
        time: str_of(section, "status", "Time")?,
        date: str_of(section, "status", "Date")?,
    })
}

fn parse_config(section: &Value) -> Result<CameraConfig, HostError> {
    Ok(CameraConfig {
        agc_enabled: int_of(section, "config", "agc_enabled")? > 0,
        emissivity: int_of(section, "config", "emissivity")? as u8,
        gain_mode: GainMode::from_clamped(int_of(section, "config", "gain_mode")?),
    })
}

fn parse_wifi(section: &Value) -> Result<WifiReport, HostError> {
    Ok(WifiReport {
        ap_ssid: str_of(section, "wifi", "ap_ssid")?,
        sta_ssid: str_of(section, "wifi", "sta_ssid")?,
        flags: int_of(section, "wifi", "flags")? as u8,
        ap_ip_addr: quad_of(section, "wifi", "ap_ip_addr")?,
        sta_ip_addr: quad_of(section, "wifi", "sta_ip_addr")?,
        sta_netmask: quad_of(section, "wifi", "sta_netmask")?,
        cur_ip_addr: quad_of(section, "wifi", "cur_ip_addr")?,
    })
}
