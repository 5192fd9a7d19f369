//! Lepton Camera JSON Control Protocol
//!
//! This crate provides the command/response layer a Lepton-based
//! thermal camera exposes to a host over a stream transport. Inbound
//! commands are JSON documents framed between a start and stop marker
//! byte; outbound traffic is either a small framed reply or a large
//! bare image document with base64-encoded sensor payloads.
//!
//! # Protocol Overview
//!
//! - **Commands** (host → camera): `{"cmd": "<name>", "args": {...}}`,
//!   framed. Thirteen commands are registered; any other name
//!   dispatches as [`CommandId::Unknown`].
//! - **Small responses** (camera → host): one `status`, `config`, or
//!   `wifi` section, compact JSON, framed.
//! - **Image documents** (camera → host): `metadata` plus base64
//!   `radiometric` and `telemetry` sections, pretty-printed, unframed.
//!
//! # Example
//!
//! ```rust,ignore
//! use lepcam_protocol::{parse_command, parse_document, CommandId, ResponseBuffers};
//!
//! // Dispatch a received command
//! let doc = parse_document(r#"{"cmd":"get_status"}"#)?;
//! let parsed = parse_command(&doc)?;
//! assert_eq!(parsed.id, CommandId::GetStatus);
//!
//! // Answer it from the pre-allocated buffers
//! let mut buffers = ResponseBuffers::new();
//! let reply = buffers.status_response(&wifi, &device, &clock)?;
//! ```

mod codec;
mod commands;
mod constants;
mod error;
mod extract;
mod frame;
mod responses;
mod types;

pub use codec::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use extract::*;
pub use frame::*;
pub use responses::*;
pub use types::*;
