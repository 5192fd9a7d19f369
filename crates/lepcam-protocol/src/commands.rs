//! Command registry and dispatch.
//!
//! Inbound messages are JSON documents with a `"cmd"` name and an
//! optional `"args"` object. The registry maps names onto small
//! dispatch codes in both directions. An unrecognized name dispatches
//! as [`CommandId::Unknown`] rather than failing the parse, so the
//! caller can answer it deliberately instead of dropping it.

use serde_json::Value;

use crate::error::ProtocolError;

/// Dispatch code for each wire command.
///
/// Codes are contiguous from zero in registry order; `Unknown` sits
/// one past the last real command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandId {
    /// `get_status` - small status report.
    GetStatus = 0,
    /// `get_image` - single image document.
    GetImage = 1,
    /// `get_config` - sensor operating parameters.
    GetConfig = 2,
    /// `set_config` - update sensor operating parameters.
    SetConfig = 3,
    /// `set_time` - set the wall clock.
    SetTime = 4,
    /// `get_wifi` - network configuration (passwords omitted).
    GetWifi = 5,
    /// `set_wifi` - update network configuration.
    SetWifi = 6,
    /// `set_spotmeter` - move the spotmeter rectangle.
    SetSpotmeter = 7,
    /// `stream_on` - start streaming image documents.
    StreamOn = 8,
    /// `stream_off` - stop streaming.
    StreamOff = 9,
    /// `record_on` - assert the external record signal.
    RecordOn = 10,
    /// `record_off` - deassert the external record signal.
    RecordOff = 11,
    /// `poweroff` - power the camera down.
    Poweroff = 12,
    /// Name did not match the registry.
    Unknown = 13,
}

/// Number of real commands in the registry (`Unknown` excluded).
pub const COMMAND_COUNT: usize = 13;

/// Fixed name/code registry, scanned linearly in both directions.
const COMMAND_TABLE: [(&str, CommandId); COMMAND_COUNT] = [
    ("get_status", CommandId::GetStatus),
    ("get_image", CommandId::GetImage),
    ("get_config", CommandId::GetConfig),
    ("set_config", CommandId::SetConfig),
    ("set_time", CommandId::SetTime),
    ("get_wifi", CommandId::GetWifi),
    ("set_wifi", CommandId::SetWifi),
    ("set_spotmeter", CommandId::SetSpotmeter),
    ("stream_on", CommandId::StreamOn),
    ("stream_off", CommandId::StreamOff),
    ("record_on", CommandId::RecordOn),
    ("record_off", CommandId::RecordOff),
    ("poweroff", CommandId::Poweroff),
];

impl CommandId {
    /// Look a wire name up in the registry. Exact, case-sensitive
    /// match; anything else is `Unknown`.
    pub fn from_name(name: &str) -> CommandId {
        for (cmd_name, id) in COMMAND_TABLE {
            if cmd_name == name {
                return id;
            }
        }
        CommandId::Unknown
    }

    /// Wire name for a dispatch code. `Unknown` has no wire name and
    /// reports itself as `"Unknown"`. Used for diagnostics, never
    /// fails.
    pub fn name(self) -> &'static str {
        for (cmd_name, id) in COMMAND_TABLE {
            if id == self {
                return cmd_name;
            }
        }
        "Unknown"
    }

    /// Numeric dispatch code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A dispatched command: its registry code and a borrowed view of the
/// `"args"` value, if one was supplied.
///
/// The borrow lives as long as the document the caller parsed with
/// [`parse_document`]; nothing here is allocated separately.
#[derive(Debug, Clone, Copy)]
pub struct ParsedCommand<'a> {
    /// Dispatch code, possibly `Unknown`.
    pub id: CommandId,
    /// Reference into the document's `"args"` value.
    pub args: Option<&'a Value>,
}

/// Parse inbound command text into an owned JSON document.
///
/// The caller owns the returned document; [`parse_command`] and the
/// argument extractors borrow from it.
pub fn parse_document(text: &str) -> Result<Value, ProtocolError> {
    Ok(serde_json::from_str(text)?)
}

/// Resolve a command document into a dispatch code and args reference.
///
/// Fails only when the `"cmd"` field is absent or not a string; a name
/// missing from the registry dispatches as [`CommandId::Unknown`].
pub fn parse_command(doc: &Value) -> Result<ParsedCommand<'_>, ProtocolError> {
    let name = doc
        .get("cmd")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingCommand)?;

    Ok(ParsedCommand {
        id: CommandId::from_name(name),
        args: doc.get("args"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trip() {
        for (name, id) in COMMAND_TABLE {
            assert_eq!(CommandId::from_name(name), id);
            assert_eq!(id.name(), name);
        }
    }

    #[test]
    fn test_unknown_reports_sentinel_name() {
        assert_eq!(CommandId::Unknown.name(), "Unknown");
    }

    #[test]
    fn test_codes_are_contiguous() {
        for (i, (_, id)) in COMMAND_TABLE.iter().enumerate() {
            assert_eq!(id.code() as usize, i);
        }
        assert_eq!(CommandId::Unknown.code() as usize, COMMAND_COUNT);
    }

    #[test]
    fn test_unrecognized_name_dispatches_unknown() {
        let doc = parse_document(r#"{"cmd": "frobnicate"}"#).expect("valid document");
        let parsed = parse_command(&doc).expect("dispatch should succeed");
        assert_eq!(parsed.id, CommandId::Unknown);
        assert!(parsed.args.is_none());
    }

    #[test]
    fn test_case_sensitive_lookup() {
        assert_eq!(CommandId::from_name("Get_Status"), CommandId::Unknown);
        assert_eq!(CommandId::from_name("get_status"), CommandId::GetStatus);
    }

    #[test]
    fn test_missing_cmd_field() {
        let doc = parse_document(r#"{"args": {"r1": 10}}"#).expect("valid document");
        assert!(matches!(
            parse_command(&doc),
            Err(ProtocolError::MissingCommand)
        ));
    }

    #[test]
    fn test_non_string_cmd_field() {
        let doc = parse_document(r#"{"cmd": 3}"#).expect("valid document");
        assert!(matches!(
            parse_command(&doc),
            Err(ProtocolError::MissingCommand)
        ));
    }

    #[test]
    fn test_args_reference_points_into_document() {
        let doc = parse_document(r#"{"cmd": "set_spotmeter", "args": {"r1": 10}}"#)
            .expect("valid document");
        let parsed = parse_command(&doc).expect("dispatch should succeed");
        assert_eq!(parsed.id, CommandId::SetSpotmeter);
        let args = parsed.args.expect("args should be present");
        assert_eq!(args.get("r1").and_then(Value::as_i64), Some(10));
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_document("{not json").is_err());
    }
}
