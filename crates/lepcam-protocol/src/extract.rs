//! Per-command argument extractors.
//!
//! Each extractor reads the borrowed `"args"` value carried by a
//! [`ParsedCommand`](crate::ParsedCommand) and builds a fresh draft of
//! the target state, seeded from the current values where the command
//! supports partial updates. Nothing the caller owns changes until it
//! commits the returned draft, so a rejected argument set leaves
//! device state exactly as it was.
//!
//! Numeric fields follow the device's lenient reading: presence is
//! what gets counted, out-of-range values silently clamp, and a
//! non-numeric value in a numeric field reads as zero.

use log::error;
use serde_json::Value;

use crate::codec::parse_dotted_quad;
use crate::constants::{FRAME_HEIGHT, FRAME_WIDTH, PW_MAX_LEN, SSID_MAX_LEN};
use crate::error::ProtocolError;
use crate::types::{CameraConfig, GainMode, SpotmeterRegion, StreamParams, TimeParts, WifiInfo};

/// Lenient integer read: numbers truncate toward zero, booleans count
/// as 0/1, anything else reads as zero.
fn int_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::Bool(b) => *b as i64,
        _ => 0,
    }
}

/// Numeric field lookup. `Some` whenever the key is present,
/// regardless of the value's type.
fn int_field(args: &Value, key: &str) -> Option<i64> {
    args.get(key).map(int_value)
}

/// String field lookup. Presence with a non-string value is an error
/// rather than a silent default; these fields end up in credential
/// storage.
fn str_field<'a>(args: &'a Value, key: &'static str) -> Result<Option<&'a str>, ProtocolError> {
    match args.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ProtocolError::ExpectedString { field: key }),
    }
}

/// Extract `set_config` arguments.
///
/// The draft starts from `current`, so fields the command leaves out
/// keep their values. At least one recognized field must be present.
pub fn parse_set_config(
    args: Option<&Value>,
    current: &CameraConfig,
) -> Result<CameraConfig, ProtocolError> {
    let args = args.ok_or(ProtocolError::MissingArgs {
        command: "set_config",
    })?;

    let mut draft = *current;
    let mut found = 0usize;

    if let Some(value) = int_field(args, "agc_enabled") {
        draft.agc_enabled = value > 0;
        found += 1;
    }
    if let Some(value) = int_field(args, "emissivity") {
        draft.emissivity = value.clamp(1, 100) as u8;
        found += 1;
    }
    if let Some(value) = int_field(args, "gain_mode") {
        draft.gain_mode = GainMode::from_clamped(value);
        found += 1;
    }

    if found == 0 {
        error!("set_config carried no recognized fields");
        return Err(ProtocolError::MissingFields {
            command: "set_config",
            required: 1,
            found,
        });
    }
    Ok(draft)
}

/// Extract `set_spotmeter` coordinates.
///
/// All four are required. Each is clamped in turn so the result is a
/// non-degenerate rectangle inside the frame: the first corner pulls
/// into the frame interior, the second strictly past the first.
pub fn parse_set_spotmeter(args: Option<&Value>) -> Result<SpotmeterRegion, ProtocolError> {
    let args = args.ok_or(ProtocolError::MissingArgs {
        command: "set_spotmeter",
    })?;

    let fields = [
        int_field(args, "r1"),
        int_field(args, "c1"),
        int_field(args, "r2"),
        int_field(args, "c2"),
    ];
    let found = fields.iter().filter(|field| field.is_some()).count();
    let [Some(raw_r1), Some(raw_c1), Some(raw_r2), Some(raw_c2)] = fields else {
        error!("set_spotmeter needs all of r1/c1/r2/c2, found {found}");
        return Err(ProtocolError::MissingFields {
            command: "set_spotmeter",
            required: 4,
            found,
        });
    };

    let height = i64::from(FRAME_HEIGHT);
    let width = i64::from(FRAME_WIDTH);
    let r1 = raw_r1.clamp(0, height - 2);
    let c1 = raw_c1.clamp(0, width - 2);
    let r2 = raw_r2.clamp(r1 + 1, height - 1);
    let c2 = raw_c2.clamp(c1 + 1, width - 1);

    Ok(SpotmeterRegion {
        r1: r1 as u16,
        c1: c1 as u16,
        r2: r2 as u16,
        c2: c2 as u16,
    })
}

/// Extract `set_time` fields.
///
/// All seven are required. Values truncate to their field width with
/// no range validation; the clock hardware takes them as-is.
pub fn parse_set_time(args: Option<&Value>) -> Result<TimeParts, ProtocolError> {
    let args = args.ok_or(ProtocolError::MissingArgs {
        command: "set_time",
    })?;

    let fields = [
        int_field(args, "sec"),
        int_field(args, "min"),
        int_field(args, "hour"),
        int_field(args, "dow"),
        int_field(args, "day"),
        int_field(args, "mon"),
        int_field(args, "year"),
    ];
    let found = fields.iter().filter(|field| field.is_some()).count();
    let [Some(sec), Some(min), Some(hour), Some(dow), Some(day), Some(mon), Some(year)] = fields
    else {
        error!("set_time needs all of sec/min/hour/dow/day/mon/year, found {found}");
        return Err(ProtocolError::MissingFields {
            command: "set_time",
            required: 7,
            found,
        });
    };

    Ok(TimeParts {
        second: sec as u8,
        minute: min as u8,
        hour: hour as u8,
        weekday: dow as u8,
        day: day as u8,
        month: mon as u8,
        year: year as u8,
        millisecond: 0,
    })
}

/// Copy one optional string argument into the draft, enforcing its
/// length limit. Returns whether the field was present.
fn copy_string_field(
    args: &Value,
    key: &'static str,
    max: usize,
    target: &mut String,
) -> Result<bool, ProtocolError> {
    match str_field(args, key)? {
        None => Ok(false),
        Some(value) if value.len() > max => {
            error!("set_wifi {key} too long: {value}");
            Err(ProtocolError::StringTooLong { field: key, max })
        }
        Some(value) => {
            *target = value.to_string();
            Ok(true)
        }
    }
}

/// Parse one optional dotted-quad argument into the draft. Returns
/// whether the field was present.
fn copy_addr_field(
    args: &Value,
    key: &'static str,
    target: &mut [u8; 4],
) -> Result<bool, ProtocolError> {
    match str_field(args, key)? {
        None => Ok(false),
        Some(text) => {
            *target = parse_dotted_quad(text, key).map_err(|err| {
                error!("illegal set_wifi {key}: {text}");
                err
            })?;
            Ok(true)
        }
    }
}

/// Extract `set_wifi` arguments.
///
/// The draft starts from `current`, so absent fields keep their
/// values. String lengths and address formats are validated before
/// anything is accepted. `cur_ip_addr` is reported only; the draft
/// always keeps the current value.
pub fn parse_set_wifi(
    args: Option<&Value>,
    current: &WifiInfo,
) -> Result<WifiInfo, ProtocolError> {
    let args = args.ok_or(ProtocolError::MissingArgs {
        command: "set_wifi",
    })?;

    let mut draft = current.clone();
    let mut found = 0usize;

    found += usize::from(copy_string_field(args, "ap_ssid", SSID_MAX_LEN, &mut draft.ap_ssid)?);
    found += usize::from(copy_string_field(args, "sta_ssid", SSID_MAX_LEN, &mut draft.sta_ssid)?);
    found += usize::from(copy_string_field(args, "ap_pw", PW_MAX_LEN, &mut draft.ap_pw)?);
    found += usize::from(copy_string_field(args, "sta_pw", PW_MAX_LEN, &mut draft.sta_pw)?);

    if let Some(value) = int_field(args, "flags") {
        draft.flags = value as u8;
        found += 1;
    }

    found += usize::from(copy_addr_field(args, "ap_ip_addr", &mut draft.ap_ip_addr)?);
    found += usize::from(copy_addr_field(args, "sta_ip_addr", &mut draft.sta_ip_addr)?);
    found += usize::from(copy_addr_field(args, "sta_netmask", &mut draft.sta_netmask)?);

    if found == 0 {
        error!("set_wifi carried no recognized fields");
        return Err(ProtocolError::MissingFields {
            command: "set_wifi",
            required: 1,
            found,
        });
    }
    Ok(draft)
}

/// Extract `stream_on` parameters.
///
/// Everything is optional: a bare `stream_on`, or one whose args carry
/// no recognized fields, streams flat out with no frame limit.
/// Negative values read as zero.
pub fn parse_stream_on(args: Option<&Value>) -> StreamParams {
    let mut params = StreamParams::default();
    if let Some(args) = args {
        if let Some(delay) = int_field(args, "delay_msec") {
            params.delay_ms = delay.max(0) as u32;
        }
        if let Some(frames) = int_field(args, "num_frames") {
            params.num_frames = frames.max(0) as u32;
        }
    }
    params
}
