//! The legacy text framing used by unconverted remotes.
//!
//! ## Wire format
//!
//! ```text
//! <decimal-length>:<2-char-tag><payload-bytes>
//! ```
//!
//! - `decimal-length`: ASCII digits, equal to `len(tag + payload)` in
//!   bytes. The tag is counted even though it is not payload.
//! - The tag is a `-` plus one command letter, occupying exactly the
//!   two characters after the `:`.
//! - For `-j` a single space separates the tag from the JSON body and
//!   is counted in the length. No other command carries a payload on
//!   the way out; reply frames (`-g`, `-v`) put the payload directly
//!   after the tag.
//! - No trailing delimiter; the declared length alone ends the frame.
//!
//! The historical client parsed the header out of the first `recv` and
//! broke when the header itself straddled a chunk boundary. This
//! decoder is incremental: it asks for more bytes until the header is
//! unambiguous, so any fragmentation of the stream decodes identically.
//! Input that can never become a valid header (a non-digit before the
//! `:`, no `-` after it, an unknown tag letter) fails immediately
//! instead of waiting forever.

use bytes::{Buf, BytesMut};

use crate::error::GhostError;
use crate::frame::{Frame, MAX_PAYLOAD_SIZE};
use crate::message::Command;

/// Width of the `-x` tag on the wire.
const TAG_WIDTH: usize = 2;

/// Upper bound on the decimal length field. 10 digits cover any
/// payload below the 16 MiB cap with room to reject garbage early.
const MAX_LENGTH_DIGITS: usize = 10;

/// Encode `frame` into `dst` using the legacy text framing.
pub fn encode(frame: &Frame, dst: &mut BytesMut) -> Result<(), GhostError> {
    let payload = frame.payload();
    // The space after `-j` is part of the counted body.
    let spacer = frame.command().carries_payload() && !payload.is_empty();
    let body_len = TAG_WIDTH + usize::from(spacer) + payload.len();

    let prefix = body_len.to_string();
    dst.reserve(prefix.len() + 1 + body_len);
    dst.extend_from_slice(prefix.as_bytes());
    dst.extend_from_slice(b":");
    dst.extend_from_slice(frame.command().legacy_tag().as_bytes());
    if spacer {
        dst.extend_from_slice(b" ");
    }
    dst.extend_from_slice(payload);
    Ok(())
}

/// Try to decode one legacy frame from `src`.
///
/// Returns `Ok(None)` when the buffer does not yet hold a complete
/// frame and more bytes must be read from the stream.
pub fn decode(src: &mut BytesMut) -> Result<Option<Frame>, GhostError> {
    // 1. Locate the `:` terminating the decimal length field.
    let colon = match find_colon(src)? {
        Some(i) => i,
        None => return Ok(None),
    };

    // Digits are guaranteed by `find_colon`; 10 digits fit in u64.
    let declared: u64 = std::str::from_utf8(&src[..colon])
        .expect("length field is ASCII")
        .parse()
        .map_err(|_| GhostError::InvalidLength("unparseable length field"))?;
    let declared = declared as usize;

    // The declared length counts the tag it precedes.
    if declared < TAG_WIDTH {
        return Err(GhostError::InvalidLength("declared length shorter than tag"));
    }
    if declared - TAG_WIDTH > MAX_PAYLOAD_SIZE {
        return Err(GhostError::PayloadTooLarge {
            size: declared - TAG_WIDTH,
            max: MAX_PAYLOAD_SIZE,
        });
    }

    // 2. Validate the tag as soon as its bytes are present.
    if src.len() > colon + 1 && src[colon + 1] != b'-' {
        return Err(GhostError::MissingDelimiter('-'));
    }
    if src.len() < colon + 1 + TAG_WIDTH {
        return Ok(None);
    }
    let command = Command::try_from(src[colon + 2])?;

    // 3. Wait for the full body, then split it off.
    let total = colon + 1 + declared;
    if src.len() < total {
        src.reserve(total - src.len());
        return Ok(None);
    }
    let mut body = src.split_to(total);
    body.advance(colon + 1 + TAG_WIDTH);

    // `-j ` carries its separating space on the wire; strip it so the
    // payload round-trips to exactly what the caller handed in.
    if command.carries_payload() && body.first() == Some(&b' ') {
        body.advance(1);
    }

    Ok(Some(Frame::new(command, body.to_vec())?))
}

/// Scan for the length/tag boundary.
///
/// `Ok(Some(i))` — `src[..i]` is a well-formed digit run, `src[i]` is `:`.
/// `Ok(None)` — the buffer is still a plausible header prefix.
/// `Err` — the buffer can never become a valid header.
fn find_colon(src: &BytesMut) -> Result<Option<usize>, GhostError> {
    for (i, &b) in src.iter().take(MAX_LENGTH_DIGITS + 1).enumerate() {
        match b {
            b':' if i == 0 => return Err(GhostError::InvalidLength("empty length field")),
            b':' => return Ok(Some(i)),
            b'0'..=b'9' => continue,
            _ => return Err(GhostError::MissingDelimiter(':')),
        }
    }
    if src.len() > MAX_LENGTH_DIGITS {
        return Err(GhostError::InvalidLength("length field too long"));
    }
    Ok(None)
}
