//! Integration tests for the device-side command/response cycle.
//!
//! These tests drive the protocol the way the camera firmware does:
//! framed text in, dispatch, extraction against current state, and a
//! reply built from the pre-allocated buffers.

use serde_json::Value;

use lepcam_protocol::{
    parse_command, parse_document, parse_set_config, parse_set_spotmeter, parse_set_wifi,
    CameraConfig, CommandId, DeviceInfo, FrameCodec, GainMode, ProtocolError, ResponseBuffers,
    SensorFrame, TimeParts, WifiInfo, MAX_IMAGE_TEXT_LEN, MSG_START, MSG_STOP,
};

/// Device state as the firmware holds it between commands.
struct TestDevice {
    config: CameraConfig,
    wifi: WifiInfo,
    info: DeviceInfo,
    clock: TimeParts,
    buffers: ResponseBuffers,
}

impl TestDevice {
    fn new() -> Self {
        TestDevice {
            config: CameraConfig {
                agc_enabled: false,
                emissivity: 98,
                gain_mode: GainMode::High,
            },
            wifi: WifiInfo {
                ap_ssid: "tcam-5FA1".to_string(),
                sta_ssid: "HomeNet".to_string(),
                ap_pw: "apsecret".to_string(),
                sta_pw: "stasecret".to_string(),
                flags: 0x05,
                ap_ip_addr: [1, 4, 168, 192],
                sta_ip_addr: [7, 1, 168, 192],
                sta_netmask: [0, 255, 255, 255],
                cur_ip_addr: [7, 1, 168, 192],
            },
            info: DeviceInfo::default(),
            clock: TimeParts {
                second: 14,
                minute: 10,
                hour: 21,
                weekday: 2,
                day: 18,
                month: 8,
                year: 54,
                millisecond: 205,
            },
            buffers: ResponseBuffers::new(),
        }
    }
}

/// Frame command text, run it through the codec, and dispatch it.
fn receive(codec: &mut FrameCodec, text: &str) -> (CommandId, Value) {
    codec.push(&FrameCodec::encode(text.as_bytes()));
    let payload = codec.decode().expect("framed command should decode");
    let doc = parse_document(std::str::from_utf8(&payload).expect("payload should be utf-8"))
        .expect("command text should parse");
    let parsed = parse_command(&doc).expect("dispatch should succeed");
    (parsed.id, doc)
}

/// Strip the reply framing and parse the JSON in between.
fn unframe(reply: &[u8]) -> Value {
    assert_eq!(reply[0], MSG_START);
    assert_eq!(*reply.last().unwrap(), MSG_STOP);
    serde_json::from_slice(&reply[1..reply.len() - 1]).expect("reply payload should parse")
}

// ============================================================================
// Status round trip
// ============================================================================

#[test]
fn test_get_status_cycle() {
    let mut device = TestDevice::new();
    let mut codec = FrameCodec::new();

    let (id, _doc) = receive(&mut codec, r#"{"cmd": "get_status"}"#);
    assert_eq!(id, CommandId::GetStatus);

    let reply = device
        .buffers
        .status_response(&device.wifi, &device.info, &device.clock)
        .expect("should build")
        .to_vec();

    let status = unframe(&reply);
    let status = status.get("status").expect("status section");
    assert_eq!(status["Camera"], "tcam-5FA1");
    assert_eq!(status["Model"], 2);
    assert_eq!(status["Version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(status["Time"], "21:10:14.205");
    assert_eq!(status["Date"], "8/18/24");
}

// ============================================================================
// Config update semantics
// ============================================================================

#[test]
fn test_set_config_clamps_and_commits() {
    let mut device = TestDevice::new();
    let mut codec = FrameCodec::new();

    let (id, doc) = receive(
        &mut codec,
        r#"{"cmd": "set_config", "args": {"emissivity": 150}}"#,
    );
    assert_eq!(id, CommandId::SetConfig);

    let parsed = parse_command(&doc).expect("dispatch should succeed");
    let draft = parse_set_config(parsed.args, &device.config).expect("should extract");
    device.config = draft;

    // Over-range emissivity clamps; the other fields keep their values.
    assert_eq!(device.config.emissivity, 100);
    assert!(!device.config.agc_enabled);
    assert_eq!(device.config.gain_mode, GainMode::High);

    let reply = device
        .buffers
        .config_response(&device.config)
        .expect("should build")
        .to_vec();
    let doc = unframe(&reply);
    assert_eq!(doc["config"]["emissivity"], 100);
    assert_eq!(doc["config"]["agc_enabled"], 0);
    assert_eq!(doc["config"]["gain_mode"], 0);
}

#[test]
fn test_rejected_set_config_leaves_state_untouched() {
    let device = TestDevice::new();
    let mut codec = FrameCodec::new();

    let before = device.config;
    let (_, doc) = receive(&mut codec, r#"{"cmd": "set_config", "args": {}}"#);
    let parsed = parse_command(&doc).expect("dispatch should succeed");

    let result = parse_set_config(parsed.args, &device.config);
    assert!(matches!(result, Err(ProtocolError::MissingFields { .. })));
    assert_eq!(device.config, before);
}

// ============================================================================
// Wifi update semantics
// ============================================================================

#[test]
fn test_set_wifi_address_update() {
    let mut device = TestDevice::new();
    let mut codec = FrameCodec::new();

    let (id, doc) = receive(
        &mut codec,
        r#"{"cmd": "set_wifi", "args": {"ap_ip_addr": "10.0.0.1"}}"#,
    );
    assert_eq!(id, CommandId::SetWifi);

    let parsed = parse_command(&doc).expect("dispatch should succeed");
    let draft = parse_set_wifi(parsed.args, &device.wifi).expect("should extract");

    // First textual segment lands in the last slot.
    assert_eq!(draft.ap_ip_addr, [1, 0, 0, 10]);
    // Every other field carries over, passwords included.
    assert_eq!(draft.sta_ssid, device.wifi.sta_ssid);
    assert_eq!(draft.ap_pw, device.wifi.ap_pw);
    assert_eq!(draft.cur_ip_addr, device.wifi.cur_ip_addr);
    device.wifi = draft;

    let reply = device
        .buffers
        .wifi_response(&device.wifi)
        .expect("should build")
        .to_vec();
    let doc = unframe(&reply);
    assert_eq!(doc["wifi"]["ap_ip_addr"], "10.0.0.1");
    assert_eq!(doc["wifi"]["cur_ip_addr"], "192.168.1.7");
}

#[test]
fn test_rejected_set_wifi_leaves_state_untouched() {
    let device = TestDevice::new();
    let mut codec = FrameCodec::new();

    // The bad address arrives after two acceptable fields; the whole
    // update has to fail, not half of it.
    let (_, doc) = receive(
        &mut codec,
        r#"{"cmd": "set_wifi", "args": {"ap_ssid": "NewCam", "flags": 1, "sta_ip_addr": "not.an.address"}}"#,
    );
    let parsed = parse_command(&doc).expect("dispatch should succeed");
    let result = parse_set_wifi(parsed.args, &device.wifi);
    assert!(matches!(
        result,
        Err(ProtocolError::BadAddress { field: "sta_ip_addr", .. })
    ));
    // Nothing was committed; current state still has the old name.
    assert_eq!(device.wifi.ap_ssid, "tcam-5FA1");
    assert_eq!(device.wifi.flags, 0x05);
}

// ============================================================================
// Spotmeter
// ============================================================================

#[test]
fn test_set_spotmeter_cycle() {
    let mut codec = FrameCodec::new();
    let (id, doc) = receive(
        &mut codec,
        r#"{"cmd": "set_spotmeter", "args": {"r1": 40, "c1": 60, "r2": 80, "c2": 100}}"#,
    );
    assert_eq!(id, CommandId::SetSpotmeter);

    let parsed = parse_command(&doc).expect("dispatch should succeed");
    let region = parse_set_spotmeter(parsed.args).expect("should extract");
    assert_eq!((region.r1, region.c1, region.r2, region.c2), (40, 60, 80, 100));
}

// ============================================================================
// Unknown commands
// ============================================================================

#[test]
fn test_unknown_command_still_dispatches() {
    let mut codec = FrameCodec::new();
    let (id, _doc) = receive(&mut codec, r#"{"cmd": "do_a_flip", "args": {"x": 1}}"#);
    assert_eq!(id, CommandId::Unknown);
}

// ============================================================================
// Image document
// ============================================================================

#[test]
fn test_get_image_cycle() {
    let mut device = TestDevice::new();
    let mut codec = FrameCodec::new();

    let (id, _doc) = receive(&mut codec, r#"{"cmd": "get_image"}"#);
    assert_eq!(id, CommandId::GetImage);

    let frame = SensorFrame {
        pixels: (0u16..64).collect(),
        telemetry: vec![0xBEEF; 8],
    };
    let text = device
        .buffers
        .image_response(&frame, &device.wifi, &device.info, &device.clock)
        .expect("should build")
        .to_vec();

    // Bare document, no framing markers.
    assert_ne!(text[0], MSG_START);
    let doc: Value = serde_json::from_slice(&text).expect("should parse");
    assert_eq!(doc["metadata"]["Camera"], "tcam-5FA1");
    assert!(doc["radiometric"].is_string());
    assert!(doc["telemetry"].is_string());
}

#[test]
fn test_image_failure_then_status_still_works() {
    let mut device = TestDevice::new();

    // Telemetry too large for the text cap: the image build fails
    // after the radiometric section already encoded.
    let frame = SensorFrame {
        pixels: vec![1; 16],
        telemetry: vec![0; MAX_IMAGE_TEXT_LEN],
    };
    let err = device
        .buffers
        .image_response(&frame, &device.wifi, &device.info, &device.clock)
        .unwrap_err();
    assert!(matches!(err, ProtocolError::PayloadTooLarge { .. }));

    // The shared buffers come back clean for the next reply.
    let reply = device
        .buffers
        .status_response(&device.wifi, &device.info, &device.clock)
        .expect("should build");
    assert_eq!(reply[0], MSG_START);
    assert_eq!(*reply.last().unwrap(), MSG_STOP);
}

// ============================================================================
// Framing across a stream
// ============================================================================

#[test]
fn test_commands_split_across_reads() {
    let mut codec = FrameCodec::new();

    let first = FrameCodec::encode(br#"{"cmd": "stream_off"}"#);
    let second = FrameCodec::encode(br#"{"cmd": "poweroff"}"#);
    let mut stream = Vec::new();
    stream.extend_from_slice(b"junk");
    stream.extend_from_slice(&first);
    stream.extend_from_slice(&second);

    // Deliver in 3-byte reads, as a slow serial link would.
    let mut ids = Vec::new();
    for chunk in stream.chunks(3) {
        codec.push(chunk);
        while let Some(payload) = codec.decode() {
            let doc = parse_document(std::str::from_utf8(&payload).unwrap()).unwrap();
            ids.push(parse_command(&doc).unwrap().id);
        }
    }
    assert_eq!(ids, vec![CommandId::StreamOff, CommandId::Poweroff]);
}
