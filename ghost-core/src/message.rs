//! Protocol command definitions.
//!
//! Uses proper enums with `TryFrom` — no panics on unknown values.

use crate::error::GhostError;
use std::fmt;

/// All commands understood by the remote recorder.
///
/// The discriminant doubles as the wire tag byte: in the binary format
/// it is written as-is, in the legacy text format it follows a `-`
/// (so `Play` travels as `-p`).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Replay the recorded event log.
    Play = b'p',
    /// Replay a single event.
    Step = b'e',
    /// Start recording events.
    Record = b'r',
    /// Stop recording.
    StopRecord = b's',
    /// Ask the remote for its library version.
    GetVersion = b'v',
    /// Download the recorded event log as JSON.
    GetJson = b'g',
    /// Upload a JSON event log to the remote.
    SetJson = b'j',
}

impl TryFrom<u8> for Command {
    type Error = GhostError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            b'p' => Ok(Command::Play),
            b'e' => Ok(Command::Step),
            b'r' => Ok(Command::Record),
            b's' => Ok(Command::StopRecord),
            b'v' => Ok(Command::GetVersion),
            b'g' => Ok(Command::GetJson),
            b'j' => Ok(Command::SetJson),
            other => Err(GhostError::UnknownTag(other)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl Command {
    /// The wire tag byte (`b'p'`, `b'g'`, ...).
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// The two-character tag used by the legacy text framing.
    pub fn legacy_tag(self) -> &'static str {
        match self {
            Command::Play => "-p",
            Command::Step => "-e",
            Command::Record => "-r",
            Command::StopRecord => "-s",
            Command::GetVersion => "-v",
            Command::GetJson => "-g",
            Command::SetJson => "-j",
        }
    }

    /// Returns `true` if this command blocks for a reply frame.
    pub fn expects_reply(self) -> bool {
        matches!(self, Command::GetVersion | Command::GetJson)
    }

    /// Returns `true` if this command carries an outgoing payload.
    pub fn carries_payload(self) -> bool {
        matches!(self, Command::SetJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        let cmds = [
            Command::Play,
            Command::Step,
            Command::Record,
            Command::StopRecord,
            Command::GetVersion,
            Command::GetJson,
            Command::SetJson,
        ];
        for cmd in cmds {
            assert_eq!(Command::try_from(cmd.tag()).unwrap(), cmd);
        }
    }

    #[test]
    fn unknown_tag() {
        assert!(matches!(
            Command::try_from(b'x'),
            Err(GhostError::UnknownTag(b'x'))
        ));
    }

    #[test]
    fn legacy_tags_match_wire_bytes() {
        for cmd in [Command::Play, Command::GetJson, Command::SetJson] {
            let legacy = cmd.legacy_tag().as_bytes();
            assert_eq!(legacy.len(), 2);
            assert_eq!(legacy[0], b'-');
            assert_eq!(legacy[1], cmd.tag());
        }
    }

    #[test]
    fn reply_expectations() {
        assert!(Command::GetJson.expects_reply());
        assert!(Command::GetVersion.expects_reply());
        assert!(!Command::Play.expects_reply());
        assert!(!Command::SetJson.expects_reply());
        assert!(Command::SetJson.carries_payload());
        assert!(!Command::Record.carries_payload());
    }
}
