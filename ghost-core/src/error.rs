//! Domain-specific error types for the ghost protocol.
//!
//! All fallible operations return `Result<T, GhostError>`.
//! No panics on invalid input — every error is typed and recoverable.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::message::Command;

/// The canonical error type for the ghost protocol.
#[derive(Debug, Error)]
pub enum GhostError {
    // ── Connection Errors ────────────────────────────────────────
    /// The initial TCP connect failed. Fatal, never retried.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The TCP/IO layer reported an error mid-exchange.
    #[error("connection error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote closed the stream before a full frame arrived.
    #[error("connection closed before a complete frame was received")]
    ConnectionClosed,

    /// An operation exceeded its deadline.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    // ── Protocol Errors ──────────────────────────────────────────
    /// The frame header length field could not be parsed.
    #[error("invalid length field: {0}")]
    InvalidLength(&'static str),

    /// A required header delimiter was not found where expected.
    #[error("malformed frame header: missing `{0}` delimiter")]
    MissingDelimiter(char),

    /// A tag byte did not map to any known command.
    #[error("unknown command tag: {0:#04x}")]
    UnknownTag(u8),

    /// The declared payload exceeds the configured maximum size.
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// A reply frame did not echo the tag of the request it answers.
    #[error("unexpected reply: sent {sent}, remote answered {got}")]
    UnexpectedReply { sent: Command, got: Command },

    /// UTF-8 conversion of a reply payload failed.
    #[error("invalid utf-8 in reply: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    // ── File Errors ──────────────────────────────────────────────
    /// A local file could not be read or written.
    #[error("file error on {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The event log to upload is not valid JSON.
    #[error("not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl GhostError {
    /// Wrap an I/O error that occurred while touching `path`.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GhostError::File {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by malformed wire data rather
    /// than by the transport or the local filesystem.
    pub fn is_protocol(&self) -> bool {
        matches!(
            self,
            GhostError::InvalidLength(_)
                | GhostError::MissingDelimiter(_)
                | GhostError::UnknownTag(_)
                | GhostError::PayloadTooLarge { .. }
                | GhostError::UnexpectedReply { .. }
                | GhostError::InvalidUtf8(_)
        )
    }
}
