//! # ghost-core
//!
//! Protocol client library for a remote event recorder: record and
//! replay UI event logs on a remote endpoint over a bare TCP socket.
//!
//! This crate contains:
//! - **Protocol types**: [`Frame`], [`Command`]
//! - **Codec**: [`GhostCodec`] for framed TCP I/O via `tokio_util`,
//!   speaking either the fixed-width binary header or the legacy
//!   `<len>:<tag>` text framing
//! - **Client**: [`GhostClient`] — one owned connection per
//!   invocation, explicit deadlines, half-duplex exchanges
//! - **Error**: [`GhostError`] — typed, `thiserror`-based hierarchy

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod message;

// ── Re-exports for ergonomic usage ───────────────────────────────

pub use client::{GhostClient, LOCAL_VERSION};
pub use codec::{GhostCodec, WireFormat};
pub use config::ClientConfig;
pub use error::GhostError;
pub use frame::{Frame, MAX_PAYLOAD_SIZE};
pub use message::Command;
