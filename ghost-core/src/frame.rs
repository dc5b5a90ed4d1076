//! The unit of wire exchange: one command tag plus its payload.

use std::fmt::Debug;

use crate::error::GhostError;
use crate::message::Command;

/// Maximum payload accepted in a single frame (16 MiB).
///
/// Event logs are whole-file transfers that must fit in memory; the cap
/// bounds what a misbehaving remote can make us allocate.
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// One length-prefixed protocol message.
///
/// Invariant: once decoded, `payload.len()` equals the length declared
/// in the frame header, and never exceeds [`MAX_PAYLOAD_SIZE`].
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    command: Command,
    payload: Vec<u8>,
}

impl Frame {
    /// A frame with no payload (`play`, `record`, `get-json`, ...).
    pub fn bare(command: Command) -> Self {
        Self {
            command,
            payload: Vec::new(),
        }
    }

    /// A frame carrying `payload`.
    pub fn new(command: Command, payload: Vec<u8>) -> Result<Self, GhostError> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(GhostError::PayloadTooLarge {
                size: payload.len(),
                max: MAX_PAYLOAD_SIZE,
            });
        }
        Ok(Self { command, payload })
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

impl Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("command", &self.command)
            .field("payload_len", &self.payload.len())
            .finish()
    }
}
