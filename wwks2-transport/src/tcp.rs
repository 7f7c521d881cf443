//! TCP transport
//!
//! WWKS envelopes carry no length prefix, so the inbound stream is framed
//! on the literal `</WWKS>` close tag: reads accumulate until a complete
//! document is buffered, and any pipelined surplus is retained for the
//! next call.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace, warn};

use wwks2_core::ENVELOPE_CLOSE_TAG;

use crate::tuning;
use crate::{Transport, error::*};

/// Upper bound on a buffered inbound envelope (16 MiB)
const MAX_ENVELOPE_SIZE: usize = 16 * 1024 * 1024;

/// TCP transport to a WWKS peer
pub struct TcpTransport {
    addr: String,
    port: u16,
    socket_addr: Option<SocketAddr>,
    stream: Option<TcpStream>,
    /// Inbound bytes past the last returned envelope
    residual: BytesMut,
    connect_timeout: Duration,
}

impl TcpTransport {
    /// Create new TCP transport
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            socket_addr: None,
            stream: None,
            residual: BytesMut::new(),
            connect_timeout: Duration::from_secs(5),
        }
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enlarge the receive buffer for large payload transfers
    ///
    /// # Errors
    ///
    /// `NotConnected` when no stream is established; I/O errors from the
    /// socket-option call propagate.
    pub fn tune_for_large_transfers(&self) -> Result<()> {
        let stream = self.stream.as_ref().ok_or(Error::NotConnected)?;
        tuning::tune_for_large_transfers(stream)?;
        Ok(())
    }

    /// Enable transport-level keepalive probing
    ///
    /// # Errors
    ///
    /// `NotConnected` when no stream is established. Platform rejection
    /// of the keepalive call itself is logged and swallowed; the
    /// connection stays usable.
    pub fn enable_liveness_probing(&self) -> Result<()> {
        let stream = self.stream.as_ref().ok_or(Error::NotConnected)?;
        tuning::enable_liveness_probing(stream);
        Ok(())
    }

    /// Resolve address to SocketAddr
    async fn resolve_addr(&mut self) -> Result<SocketAddr> {
        if let Some(addr) = self.socket_addr {
            return Ok(addr);
        }

        let addr_str = format!("{}:{}", self.addr, self.port);

        let addrs: Vec<SocketAddr> = tokio::net::lookup_host(&addr_str)
            .await
            .map_err(|e| Error::InvalidAddress(format!("{}: {}", addr_str, e)))?
            .collect();

        let addr = addrs
            .first()
            .ok_or_else(|| Error::InvalidAddress(format!("No addresses found for {}", addr_str)))?;

        self.socket_addr = Some(*addr);
        Ok(*addr)
    }

    /// Position one past the close tag of the first complete envelope
    fn envelope_end(buf: &[u8]) -> Option<usize> {
        let tag = ENVELOPE_CLOSE_TAG.as_bytes();
        buf.windows(tag.len())
            .position(|window| window == tag)
            .map(|pos| pos + tag.len())
    }
}

#[async_trait]
impl Transport for TcpTransport {
    async fn connect(&mut self) -> Result<()> {
        if self.is_connected() {
            return Err(Error::AlreadyConnected);
        }

        let addr = self.resolve_addr().await?;

        debug!("Connecting to {}...", addr);

        let stream = timeout(self.connect_timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| Error::ConnectionTimeout)?
            .map_err(Error::Io)?;

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // One-shot liveness tuning before the stream is adopted, so a
        // failed connect never leaves a half-connected transport;
        // probing failure is non-fatal
        tuning::tune_for_large_transfers(&stream)?;
        tuning::enable_liveness_probing(&stream);

        self.stream = Some(stream);
        self.residual.clear();

        debug!("Connected to {}", addr);

        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            debug!("Disconnecting from {}...", self.remote_addr());

            // Graceful shutdown
            let _ = stream.shutdown().await;
        }

        self.socket_addr = None;
        self.residual.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.stream.is_some()
    }

    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let stream = self.stream.as_mut().ok_or(Error::NotConnected)?;

        trace!("Sending envelope ({} bytes)", data.len());

        stream.write_all(data).await?;
        stream.flush().await?;

        Ok(())
    }

    async fn receive(&mut self, read_timeout: Duration) -> Result<BytesMut> {
        let Self {
            stream, residual, ..
        } = self;
        let stream = stream.as_mut().ok_or(Error::NotConnected)?;

        loop {
            if let Some(end) = Self::envelope_end(residual) {
                let envelope = residual.split_to(end);
                trace!("Received envelope ({} bytes)", envelope.len());
                return Ok(envelope);
            }

            if residual.len() > MAX_ENVELOPE_SIZE {
                return Err(Error::EnvelopeTooLarge {
                    max: MAX_ENVELOPE_SIZE,
                });
            }

            let n = timeout(read_timeout, stream.read_buf(residual))
                .await
                .map_err(|_| Error::ReadTimeout)?
                .map_err(Error::Io)?;

            if n == 0 {
                return Err(Error::ConnectionClosed);
            }
        }
    }

    fn remote_addr(&self) -> String {
        self.socket_addr
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| format!("{}:{}", self.addr, self.port))
    }
}

impl Drop for TcpTransport {
    fn drop(&mut self) {
        if self.is_connected() {
            warn!("TCP transport dropped while still connected");
        }
    }
}
