//! The fixed-width binary framing (default).
//!
//! Replaces the legacy two-delimiter text scan with a header the
//! decoder can read without searching:
//!
//! ```text
//! length: u32  (4, little-endian, payload-only byte count)
//! tag:    u8   (1, Command discriminant)
//! payload: [u8; length]
//! ```
//!
//! Unlike the legacy format, `length` never counts the tag: it is the
//! exact payload byte count, zero for bare commands.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::GhostError;
use crate::frame::{Frame, MAX_PAYLOAD_SIZE};
use crate::message::Command;

/// Encoded header size on the wire.
pub const HEADER_LEN: usize = 5;

/// Encode `frame` into `dst`.
pub fn encode(frame: &Frame, dst: &mut BytesMut) -> Result<(), GhostError> {
    let payload = frame.payload();
    dst.reserve(HEADER_LEN + payload.len());
    dst.put_u32_le(payload.len() as u32);
    dst.put_u8(frame.command().tag());
    dst.extend_from_slice(payload);
    Ok(())
}

/// Try to decode one binary frame from `src`.
///
/// Returns `Ok(None)` until the full header and declared payload have
/// been buffered.
pub fn decode(src: &mut BytesMut) -> Result<Option<Frame>, GhostError> {
    if src.len() < HEADER_LEN {
        return Ok(None);
    }

    let declared = u32::from_le_bytes(src[0..4].try_into().expect("4-byte slice")) as usize;
    if declared > MAX_PAYLOAD_SIZE {
        return Err(GhostError::PayloadTooLarge {
            size: declared,
            max: MAX_PAYLOAD_SIZE,
        });
    }
    // Reject a bad tag before waiting for its payload.
    let command = Command::try_from(src[4])?;

    let total = HEADER_LEN + declared;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }

    let mut body = src.split_to(total);
    body.advance(HEADER_LEN);
    Ok(Some(Frame::new(command, body.to_vec())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let mut dst = BytesMut::new();
        encode(&Frame::new(Command::SetJson, b"{}".to_vec()).unwrap(), &mut dst).unwrap();
        assert_eq!(&dst[..], &[2, 0, 0, 0, b'j', b'{', b'}']);
    }

    #[test]
    fn bare_command_is_five_bytes() {
        let mut dst = BytesMut::new();
        encode(&Frame::bare(Command::Play), &mut dst).unwrap();
        assert_eq!(&dst[..], &[0, 0, 0, 0, b'p']);
    }

    #[test]
    fn roundtrip_various_sizes() {
        for size in [0usize, 1, 7, 4096, 1024 * 1024] {
            let original = Frame::new(Command::GetJson, vec![0xAB; size]).unwrap();
            let mut wire = BytesMut::new();
            encode(&original, &mut wire).unwrap();
            let decoded = decode(&mut wire).unwrap().unwrap();
            assert_eq!(decoded, original);
            assert!(wire.is_empty());
        }
    }

    #[test]
    fn fragmentation_is_invisible() {
        let original = Frame::new(Command::SetJson, b"{\"a\":1}".to_vec()).unwrap();
        let mut wire = BytesMut::new();
        encode(&original, &mut wire).unwrap();

        for split in 0..=wire.len() {
            let mut buf = BytesMut::new();
            buf.extend_from_slice(&wire[..split]);
            let early = decode(&mut buf).unwrap();
            if split < wire.len() {
                assert!(early.is_none());
            }
            buf.extend_from_slice(&wire[split..]);
            if early.is_none() {
                assert_eq!(decode(&mut buf).unwrap().unwrap(), original);
            }
        }
    }

    #[test]
    fn short_header_waits() {
        let mut buf = BytesMut::from(&[7u8, 0, 0][..]);
        assert!(decode(&mut buf).unwrap().is_none());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let mut buf = BytesMut::from(&[0u8, 0, 0, 0, b'z'][..]);
        assert!(matches!(decode(&mut buf), Err(GhostError::UnknownTag(b'z'))));
    }

    #[test]
    fn oversized_length_is_rejected_before_payload() {
        let mut buf = BytesMut::new();
        buf.put_u32_le(u32::MAX);
        buf.put_u8(b'g');
        assert!(matches!(
            decode(&mut buf),
            Err(GhostError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn coalesced_frames_decode_separately() {
        let mut wire = BytesMut::new();
        encode(&Frame::bare(Command::Record), &mut wire).unwrap();
        encode(&Frame::new(Command::SetJson, b"{}".to_vec()).unwrap(), &mut wire).unwrap();
        let first = decode(&mut wire).unwrap().unwrap();
        let second = decode(&mut wire).unwrap().unwrap();
        assert_eq!(first.command(), Command::Record);
        assert_eq!(second.command(), Command::SetJson);
        assert!(wire.is_empty());
    }
}
