//! Commands that can be sent to the camera.

use serde_json::{json, Map, Value};

use lepcam_protocol::{CommandId, FrameCodec, GainMode, TimeParts};

/// Partial network-settings update carried by [`Command::SetWifi`].
///
/// Only populated fields travel; the camera keeps its current value
/// for everything left `None`. Addresses travel as dotted-quad text.
#[derive(Debug, Clone, Default)]
pub struct WifiUpdate {
    /// New access-point SSID (also renames the camera).
    pub ap_ssid: Option<String>,
    /// New client-mode SSID.
    pub sta_ssid: Option<String>,
    /// New access-point password.
    pub ap_pw: Option<String>,
    /// New client-mode password.
    pub sta_pw: Option<String>,
    /// New mode/enable flag bits.
    pub flags: Option<u8>,
    /// New access-point address.
    pub ap_ip_addr: Option<String>,
    /// New static client address.
    pub sta_ip_addr: Option<String>,
    /// New netmask for the static client address.
    pub sta_netmask: Option<String>,
}

/// Commands that can be sent to the camera.
#[derive(Debug, Clone)]
pub enum Command {
    /// Request the small status report.
    GetStatus,

    /// Request one image document.
    GetImage,

    /// Request the sensor operating parameters.
    GetConfig,

    /// Update sensor operating parameters. Only populated fields
    /// travel; the camera keeps its current value for the rest.
    SetConfig {
        /// Enable or disable automatic gain correction.
        agc_enabled: Option<bool>,
        /// Scene emissivity percentage, 1-100.
        emissivity: Option<u8>,
        /// Sensor gain mode.
        gain_mode: Option<GainMode>,
    },

    /// Set the camera's wall clock.
    SetTime(TimeParts),

    /// Request the network configuration.
    GetWifi,

    /// Update network configuration.
    SetWifi(WifiUpdate),

    /// Move the spotmeter rectangle.
    SetSpotmeter {
        /// Top row.
        r1: u16,
        /// Left column.
        c1: u16,
        /// Bottom row.
        r2: u16,
        /// Right column.
        c2: u16,
    },

    /// Start streaming image documents.
    StreamOn {
        /// Delay between frames in milliseconds; 0 for full rate.
        delay_ms: u32,
        /// Number of frames; 0 to stream until `StreamOff`.
        num_frames: u32,
    },

    /// Stop streaming.
    StreamOff,

    /// Assert the external record signal.
    RecordOn,

    /// Deassert the external record signal.
    RecordOff,

    /// Power the camera down.
    Poweroff,
}

impl Command {
    /// Registry code this command dispatches to on the camera.
    pub fn id(&self) -> CommandId {
        match self {
            Command::GetStatus => CommandId::GetStatus,
            Command::GetImage => CommandId::GetImage,
            Command::GetConfig => CommandId::GetConfig,
            Command::SetConfig { .. } => CommandId::SetConfig,
            Command::SetTime(_) => CommandId::SetTime,
            Command::GetWifi => CommandId::GetWifi,
            Command::SetWifi(_) => CommandId::SetWifi,
            Command::SetSpotmeter { .. } => CommandId::SetSpotmeter,
            Command::StreamOn { .. } => CommandId::StreamOn,
            Command::StreamOff => CommandId::StreamOff,
            Command::RecordOn => CommandId::RecordOn,
            Command::RecordOff => CommandId::RecordOff,
            Command::Poweroff => CommandId::Poweroff,
        }
    }

    /// Serialize into a command document.
    pub fn encode(&self) -> String {
        let mut doc = Map::new();
        doc.insert("cmd".to_string(), Value::String(self.id().name().to_string()));
        if let Some(args) = self.args_value() {
            doc.insert("args".to_string(), args);
        }
        Value::Object(doc).to_string()
    }

    /// Serialize and wrap in the framing markers for the wire.
    pub fn encode_framed(&self) -> Vec<u8> {
        FrameCodec::encode(self.encode().as_bytes())
    }

    /// Build the `"args"` value, or `None` for commands that carry no
    /// arguments (and for empty partial updates).
    fn args_value(&self) -> Option<Value> {
        match self {
            Command::SetConfig {
                agc_enabled,
                emissivity,
                gain_mode,
            } => {
                let mut args = Map::new();
                if let Some(agc) = agc_enabled {
                    args.insert("agc_enabled".to_string(), json!(u8::from(*agc)));
                }
                if let Some(emissivity) = emissivity {
                    args.insert("emissivity".to_string(), json!(emissivity));
                }
                if let Some(gain) = gain_mode {
                    args.insert("gain_mode".to_string(), json!(gain.as_u8()));
                }
                (!args.is_empty()).then(|| Value::Object(args))
            }

            Command::SetTime(time) => Some(json!({
                "sec": time.second,
                "min": time.minute,
                "hour": time.hour,
                "dow": time.weekday,
                "day": time.day,
                "mon": time.month,
                "year": time.year,
            })),

            Command::SetWifi(update) => {
                let mut args = Map::new();
                let strings = [
                    ("ap_ssid", &update.ap_ssid),
                    ("sta_ssid", &update.sta_ssid),
                    ("ap_pw", &update.ap_pw),
                    ("sta_pw", &update.sta_pw),
                    ("ap_ip_addr", &update.ap_ip_addr),
                    ("sta_ip_addr", &update.sta_ip_addr),
                    ("sta_netmask", &update.sta_netmask),
                ];
                for (key, value) in strings {
                    if let Some(value) = value {
                        args.insert(key.to_string(), Value::String(value.clone()));
                    }
                }
                if let Some(flags) = update.flags {
                    args.insert("flags".to_string(), json!(flags));
                }
                (!args.is_empty()).then(|| Value::Object(args))
            }

            Command::SetSpotmeter { r1, c1, r2, c2 } => Some(json!({
                "r1": r1,
                "c1": c1,
                "r2": r2,
                "c2": c2,
            })),

            Command::StreamOn {
                delay_ms,
                num_frames,
            } => Some(json!({
                "delay_msec": delay_ms,
                "num_frames": num_frames,
            })),

            _ => None,
        }
    }
}
