//! The connection-owning protocol client.
//!
//! A [`GhostClient`] is created by [`GhostClient::connect`], used for
//! one CLI invocation, and torn down by [`GhostClient::disconnect`].
//! The socket is an owned field, never shared process-wide state, so
//! sending on an unconnected or closed client is unrepresentable: the
//! only way to obtain a client is to connect, and disconnecting
//! consumes it.
//!
//! Every exchange is half-duplex: one send, optionally one blocking
//! receive. Both directions run under the configured deadline.

use std::net::SocketAddr;
use std::path::Path;

use futures::{SinkExt, StreamExt};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpSocket, TcpStream, lookup_host};
use tokio::time::timeout;
use tokio_util::codec::Framed;
use tracing::{debug, info};

use crate::codec::GhostCodec;
use crate::config::ClientConfig;
use crate::error::GhostError;
use crate::frame::Frame;
use crate::message::Command;

/// Version reported by [`GhostClient::local_version`]. Not wire traffic.
pub const LOCAL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A connected client for the remote recorder.
pub struct GhostClient {
    framed: Framed<TcpStream, GhostCodec>,
    config: ClientConfig,
    peer: SocketAddr,
}

impl GhostClient {
    /// Resolve `host:port` and open the single TCP connection.
    ///
    /// Connect failure is fatal to the caller; there is no retry or
    /// backoff in a single-shot tool.
    pub async fn connect(
        host: &str,
        port: u16,
        config: ClientConfig,
    ) -> Result<Self, GhostError> {
        let display_addr = format!("{host}:{port}");
        let addr = lookup_host((host, port))
            .await
            .map_err(|e| GhostError::Connect {
                addr: display_addr.clone(),
                source: e,
            })?
            .next()
            .ok_or_else(|| GhostError::Connect {
                addr: display_addr.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "hostname resolved to no addresses",
                ),
            })?;

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };
        socket.set_reuseaddr(true)?;

        let stream = timeout(config.connect_timeout, socket.connect(addr))
            .await
            .map_err(|_| GhostError::Timeout(config.connect_timeout))?
            .map_err(|e| GhostError::Connect {
                addr: display_addr,
                source: e,
            })?;
        stream.set_nodelay(true)?;

        info!(%addr, wire = %config.wire, "connected");
        Ok(Self {
            framed: Framed::new(stream, GhostCodec::new(config.wire)),
            config,
            peer: addr,
        })
    }

    /// The address this client is connected to.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// The version of this client library. Static, no wire traffic.
    pub fn local_version() -> &'static str {
        LOCAL_VERSION
    }

    /// Shut the stream down and consume the client.
    pub async fn disconnect(mut self) -> Result<(), GhostError> {
        self.framed.get_mut().shutdown().await?;
        debug!(peer = %self.peer, "disconnected");
        Ok(())
    }

    // ── Commands ─────────────────────────────────────────────────

    /// Replay the recorded event log on the remote.
    pub async fn play(&mut self) -> Result<(), GhostError> {
        self.send_frame(Frame::bare(Command::Play)).await
    }

    /// Replay a single event on the remote.
    pub async fn step(&mut self) -> Result<(), GhostError> {
        self.send_frame(Frame::bare(Command::Step)).await
    }

    /// Start recording events on the remote.
    pub async fn record(&mut self) -> Result<(), GhostError> {
        self.send_frame(Frame::bare(Command::Record)).await
    }

    /// Stop recording on the remote.
    pub async fn stop_record(&mut self) -> Result<(), GhostError> {
        self.send_frame(Frame::bare(Command::StopRecord)).await
    }

    /// Ask the remote for its library version.
    pub async fn remote_version(&mut self) -> Result<String, GhostError> {
        let reply = self.exchange(Command::GetVersion).await?;
        Ok(String::from_utf8(reply.into_payload())?)
    }

    /// Download the recorded event log and return its bytes.
    pub async fn fetch_json(&mut self) -> Result<Vec<u8>, GhostError> {
        let reply = self.exchange(Command::GetJson).await?;
        Ok(reply.into_payload())
    }

    /// Download the recorded event log into `path`, overwriting it.
    pub async fn get_json(&mut self, path: impl AsRef<Path>) -> Result<(), GhostError> {
        let path = path.as_ref();
        let data = self.fetch_json().await?;
        tokio::fs::write(path, &data)
            .await
            .map_err(|e| GhostError::file(path, e))?;
        info!(path = %path.display(), bytes = data.len(), "event log written");
        Ok(())
    }

    /// Upload the JSON event log at `path` to the remote.
    ///
    /// The file is read whole; payloads are assumed to fit in memory.
    /// With `validate_json` set, a file that does not parse as JSON is
    /// rejected locally instead of being bounced by the remote.
    pub async fn set_json(&mut self, path: impl AsRef<Path>) -> Result<(), GhostError> {
        let path = path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|e| GhostError::file(path, e))?;
        if self.config.validate_json {
            serde_json::from_slice::<serde_json::Value>(&data)?;
        }
        let len = data.len();
        self.send_frame(Frame::new(Command::SetJson, data)?).await?;
        info!(path = %path.display(), bytes = len, "event log sent");
        Ok(())
    }

    // ── Transport primitives ─────────────────────────────────────

    /// Send one frame, flushing fully before returning.
    ///
    /// Partial writes are completed by the I/O driver; any socket
    /// failure surfaces as an error rather than being swallowed.
    async fn send_frame(&mut self, frame: Frame) -> Result<(), GhostError> {
        debug!(command = %frame.command(), bytes = frame.payload().len(), "sending frame");
        timeout(self.config.exchange_timeout, self.framed.send(frame))
            .await
            .map_err(|_| GhostError::Timeout(self.config.exchange_timeout))?
    }

    /// Block until the next full frame is assembled.
    async fn receive_frame(&mut self) -> Result<Frame, GhostError> {
        let frame = timeout(self.config.exchange_timeout, self.framed.next())
            .await
            .map_err(|_| GhostError::Timeout(self.config.exchange_timeout))?
            .ok_or(GhostError::ConnectionClosed)??;
        debug!(command = %frame.command(), bytes = frame.payload().len(), "received frame");
        Ok(frame)
    }

    /// One half-duplex request/response exchange for a bare command.
    ///
    /// The reply must echo the request tag; the legacy protocol has no
    /// request IDs, so tag equality is the only correlation available.
    async fn exchange(&mut self, command: Command) -> Result<Frame, GhostError> {
        self.send_frame(Frame::bare(command)).await?;
        let reply = self.receive_frame().await?;
        if reply.command() != command {
            return Err(GhostError::UnexpectedReply {
                sent: command,
                got: reply.command(),
            });
        }
        Ok(reply)
    }
}

impl std::fmt::Debug for GhostClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GhostClient")
            .field("peer", &self.peer)
            .field("wire", &self.config.wire)
            .finish()
    }
}

// ── Tests ────────────────────────────────────────────────────────
