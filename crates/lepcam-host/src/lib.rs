//! Lepton Camera Host Protocol
//!
//! Where `lepcam-protocol` implements the camera's half of the JSON
//! control protocol, this crate implements the peer: it builds framed
//! command documents, parses the camera's small replies into typed
//! reports, and decodes image documents back into 16-bit sensor words.
//!
//! # Example
//!
//! ```rust,ignore
//! use lepcam_host::{Command, Response};
//!
//! // Build a command
//! let frame = Command::GetConfig.encode_framed();
//!
//! // Parse a de-framed reply
//! let response = Response::parse(&payload)?;
//! ```

mod commands;
mod error;
mod image;
mod responses;

pub use commands::*;
pub use error::*;
pub use image::*;
pub use responses::*;
