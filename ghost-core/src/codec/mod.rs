//! Framing codec for `tokio_util::codec::Framed`.
//!
//! Two wire formats share the same [`Frame`] type: the fixed-width
//! [`binary`] header (default) and the [`legacy`] text framing spoken
//! by unconverted remotes. Both decoders are incremental, so frames
//! split or coalesced at arbitrary byte boundaries decode identically.

pub mod binary;
pub mod legacy;

use std::fmt;
use std::str::FromStr;

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::GhostError;
use crate::frame::Frame;

/// Which header layout to put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireFormat {
    /// Fixed-width binary header; length is payload-only.
    #[default]
    Binary,
    /// `<len>:<tag><payload>` text header; length counts the tag.
    Legacy,
}

impl fmt::Display for WireFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireFormat::Binary => write!(f, "binary"),
            WireFormat::Legacy => write!(f, "legacy"),
        }
    }
}

impl FromStr for WireFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(WireFormat::Binary),
            "legacy" => Ok(WireFormat::Legacy),
            other => Err(format!("unknown wire format: {other:?}")),
        }
    }
}

/// Stateless codec dispatching to the selected wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct GhostCodec {
    format: WireFormat,
}

impl GhostCodec {
    pub fn new(format: WireFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> WireFormat {
        self.format
    }
}

impl Decoder for GhostCodec {
    type Item = Frame;
    type Error = GhostError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, GhostError> {
        match self.format {
            WireFormat::Binary => binary::decode(src),
            WireFormat::Legacy => legacy::decode(src),
        }
    }
}

impl Encoder<Frame> for GhostCodec {
    type Error = GhostError;

    fn encode(&mut self, item: Frame, dst: &mut BytesMut) -> Result<(), GhostError> {
        match self.format {
            WireFormat::Binary => binary::encode(&item, dst),
            WireFormat::Legacy => legacy::encode(&item, dst),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Command;
    use futures::{SinkExt, StreamExt};
    use tokio_util::codec::{FramedRead, FramedWrite};

    #[test]
    fn wire_format_parses() {
        assert_eq!("binary".parse::<WireFormat>().unwrap(), WireFormat::Binary);
        assert_eq!("legacy".parse::<WireFormat>().unwrap(), WireFormat::Legacy);
        assert!("ascii".parse::<WireFormat>().is_err());
        assert_eq!(WireFormat::default(), WireFormat::Binary);
    }

    #[tokio::test]
    async fn framed_read_reassembles_scripted_chunks() {
        // The reply stream from the fragmentation scenario, delivered
        // by a mock transport in three reads.
        let io = tokio_test::io::Builder::new()
            .read(b"5:-g")
            .read(b"ab")
            .read(b"c")
            .build();

        let mut framed = FramedRead::new(io, GhostCodec::new(WireFormat::Legacy));
        let frame = framed.next().await.unwrap().unwrap();
        assert_eq!(frame.command(), Command::GetJson);
        assert_eq!(frame.payload(), b"abc");
    }

    #[tokio::test]
    async fn framed_write_emits_exact_legacy_bytes() {
        let io = tokio_test::io::Builder::new().write(b"2:-p").build();
        let mut framed = FramedWrite::new(io, GhostCodec::new(WireFormat::Legacy));
        framed.send(Frame::bare(Command::Play)).await.unwrap();
    }

    #[tokio::test]
    async fn framed_read_binary_across_chunks() {
        let io = tokio_test::io::Builder::new()
            .read(&[3, 0, 0])
            .read(&[0, b'g'])
            .read(b"abc")
            .build();

        let mut framed = FramedRead::new(io, GhostCodec::default());
        let frame = framed.next().await.unwrap().unwrap();
        assert_eq!(frame.command(), Command::GetJson);
        assert_eq!(frame.payload(), b"abc");
    }

    #[tokio::test]
    async fn truncated_stream_is_an_error_not_a_hang() {
        // EOF halfway through a declared body.
        let io = tokio_test::io::Builder::new().read(b"5:-ga").build();
        let mut framed = FramedRead::new(io, GhostCodec::new(WireFormat::Legacy));
        let err = framed.next().await.unwrap().unwrap_err();
        assert!(matches!(err, GhostError::Io(_)));
    }
}
