//! Protocol constants
//!
//! These constants define the framing marker bytes, the fixed buffer
//! capacities, and the sensor geometry shared by the device and host
//! halves of the protocol.

// ============================================================================
// Framing markers
// ============================================================================

/// First byte of a framed command or small response (ASCII STX).
pub const MSG_START: u8 = 0x02;
/// Last byte of a framed command or small response (ASCII ETX).
pub const MSG_STOP: u8 = 0x03;

// ============================================================================
// Buffer capacities
// ============================================================================

/// Capacity of the image response buffer. Sized for the base64
/// expansion of a full frame plus telemetry, metadata, and
/// pretty-printing overhead.
pub const MAX_IMAGE_TEXT_LEN: usize = 1024 * 56;
/// Capacity of the small response buffer (status/config/wifi replies).
pub const MAX_RSP_TEXT_LEN: usize = 1024;
/// Longest framed inbound command the frame codec accumulates before
/// it resynchronizes.
pub const MAX_CMD_TEXT_LEN: usize = 2048;

// ============================================================================
// Sensor geometry
// ============================================================================

/// Image width in pixels.
pub const FRAME_WIDTH: u16 = 160;
/// Image height in pixels.
pub const FRAME_HEIGHT: u16 = 120;
/// Pixels in one full frame.
pub const FRAME_PIXELS: usize = (FRAME_WIDTH as usize) * (FRAME_HEIGHT as usize);
/// 16-bit telemetry words per frame (three 80-word rows).
pub const TELEMETRY_WORDS: usize = 240;

// ============================================================================
// Identity and argument limits
// ============================================================================

/// Numeric camera model id reported in status and image metadata.
pub const CAMERA_MODEL: u32 = 2;
/// Longest accepted SSID, in bytes. Doubles as the camera name limit.
pub const SSID_MAX_LEN: usize = 32;
/// Longest accepted WiFi password, in bytes.
pub const PW_MAX_LEN: usize = 63;
