//! Common types used in the protocol.

use crate::constants::*;

/// Sensor gain mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum GainMode {
    /// High gain (standard radiometric range).
    High = 0,
    /// Low gain (extended scene-temperature range).
    Low = 1,
    /// Sensor-managed automatic switching.
    Auto = 2,
}

impl GainMode {
    /// Map a raw argument value onto a gain mode.
    ///
    /// Values above the highest enumerator clamp down to `Auto`;
    /// values below zero clamp up to `High`.
    pub fn from_clamped(value: i64) -> GainMode {
        match value {
            1 => GainMode::Low,
            v if v >= 2 => GainMode::Auto,
            _ => GainMode::High,
        }
    }

    /// Numeric wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Sensor operating parameters mirrored by `get_config`/`set_config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraConfig {
    /// Automatic gain correction enabled (pixels are 8-bit AGC output
    /// instead of raw radiometric words).
    pub agc_enabled: bool,
    /// Scene emissivity percentage, 1-100.
    pub emissivity: u8,
    /// Sensor gain mode.
    pub gain_mode: GainMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        CameraConfig {
            agc_enabled: false,
            emissivity: 100,
            gain_mode: GainMode::High,
        }
    }
}

/// Network configuration mirrored by `get_wifi`/`set_wifi`.
///
/// The four address quads are stored least-significant segment first:
/// the textual address `a.b.c.d` persists as `[d, c, b, a]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiInfo {
    /// Access-point SSID; doubles as the camera name.
    pub ap_ssid: String,
    /// SSID joined in client mode.
    pub sta_ssid: String,
    /// Access-point password.
    pub ap_pw: String,
    /// Client-mode password.
    pub sta_pw: String,
    /// Mode/enable flag bits, persisted verbatim.
    pub flags: u8,
    /// Address served in access-point mode.
    pub ap_ip_addr: [u8; 4],
    /// Static address requested in client mode.
    pub sta_ip_addr: [u8; 4],
    /// Netmask for the static client address.
    pub sta_netmask: [u8; 4],
    /// Address currently bound, whichever mode is active. Reported but
    /// never settable over the wire.
    pub cur_ip_addr: [u8; 4],
}

impl Default for WifiInfo {
    fn default() -> Self {
        WifiInfo {
            ap_ssid: String::new(),
            sta_ssid: String::new(),
            ap_pw: String::new(),
            sta_pw: String::new(),
            flags: 0,
            // 192.168.4.1, the usual soft-AP address.
            ap_ip_addr: [1, 4, 168, 192],
            sta_ip_addr: [0; 4],
            sta_netmask: [0; 4],
            cur_ip_addr: [0; 4],
        }
    }
}

/// Broken-down wall-clock fields carried by `set_time` and formatted
/// into response metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeParts {
    /// Seconds, 0-59.
    pub second: u8,
    /// Minutes, 0-59.
    pub minute: u8,
    /// Hours, 0-23.
    pub hour: u8,
    /// Day of week, 1-7.
    pub weekday: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Month, 1-12.
    pub month: u8,
    /// Years since 1970.
    pub year: u8,
    /// Milliseconds, 0-999. Read from the clock, never set over the
    /// wire.
    pub millisecond: u16,
}

impl TimeParts {
    /// Clock string used in response metadata: hours and milliseconds
    /// unpadded, minutes and seconds two digits.
    pub fn time_string(&self) -> String {
        format!(
            "{}:{:02}:{:02}.{}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }

    /// Date string used in response metadata: `M/D/YY`, year shown as
    /// an offset from 2000.
    pub fn date_string(&self) -> String {
        format!("{}/{}/{:02}", self.month, self.day, self.year.wrapping_sub(30))
    }
}

/// One acquired sensor frame: radiometric pixels plus the telemetry
/// rows, both as 16-bit words.
#[derive(Debug, Clone, Default)]
pub struct SensorFrame {
    /// Row-major pixel words, [`FRAME_PIXELS`] long for a full frame.
    pub pixels: Vec<u16>,
    /// Telemetry words, [`TELEMETRY_WORDS`] long for a full frame.
    pub telemetry: Vec<u16>,
}

/// Axis-aligned spotmeter rectangle in pixel coordinates.
///
/// Extraction guarantees `r1 < r2 <= FRAME_HEIGHT - 1` and
/// `c1 < c2 <= FRAME_WIDTH - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotmeterRegion {
    /// Top row.
    pub r1: u16,
    /// Left column.
    pub c1: u16,
    /// Bottom row, strictly below `r1`.
    pub r2: u16,
    /// Right column, strictly right of `c1`.
    pub c2: u16,
}

impl Default for SpotmeterRegion {
    fn default() -> Self {
        // 2x2 region at frame center.
        SpotmeterRegion {
            r1: 59,
            c1: 79,
            r2: 60,
            c2: 80,
        }
    }
}

/// Streaming cadence requested by `stream_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamParams {
    /// Delay between frames in milliseconds; 0 streams at the full
    /// sensor rate.
    pub delay_ms: u32,
    /// Number of frames to deliver; 0 streams until `stream_off`.
    pub num_frames: u32,
}

/// Build identity reported in response metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Fixed numeric model id.
    pub model: u32,
    /// Firmware version string.
    pub version: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        DeviceInfo {
            model: CAMERA_MODEL,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
