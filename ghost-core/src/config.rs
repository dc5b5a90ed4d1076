//! Client configuration.

use std::time::Duration;

use crate::codec::WireFormat;

/// Tunables for a [`GhostClient`](crate::GhostClient).
///
/// The legacy client had no deadlines at all; an unresponsive remote
/// hung the caller forever. Both phases are explicit here and default
/// to finite values.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deadline for the initial TCP connect.
    pub connect_timeout: Duration,
    /// Deadline for each send and each blocking receive.
    pub exchange_timeout: Duration,
    /// Header layout to speak on the wire.
    pub wire: WireFormat,
    /// Parse the event log locally before uploading it.
    pub validate_json: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            exchange_timeout: Duration::from_secs(30),
            wire: WireFormat::default(),
            validate_json: false,
        }
    }
}

impl ClientConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_exchange_timeout(mut self, timeout: Duration) -> Self {
        self.exchange_timeout = timeout;
        self
    }

    pub fn with_wire(mut self, wire: WireFormat) -> Self {
        self.wire = wire;
        self
    }

    pub fn with_validate_json(mut self, validate: bool) -> Self {
        self.validate_json = validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_finite() {
        let cfg = ClientConfig::default();
        assert!(cfg.connect_timeout > Duration::ZERO);
        assert!(cfg.exchange_timeout > Duration::ZERO);
        assert_eq!(cfg.wire, WireFormat::Binary);
    }

    #[test]
    fn builder_overrides() {
        let cfg = ClientConfig::default()
            .with_wire(WireFormat::Legacy)
            .with_exchange_timeout(Duration::from_millis(250))
            .with_validate_json(true);
        assert_eq!(cfg.wire, WireFormat::Legacy);
        assert_eq!(cfg.exchange_timeout, Duration::from_millis(250));
        assert!(cfg.validate_json);
    }
}
