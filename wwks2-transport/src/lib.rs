//! Transport layer for the WWKS 2.0 protocol
//!
//! Provides TCP communication with a peer, including the connection
//! liveness tuning applied after every connect.

pub mod error;
pub mod tcp;
pub mod tuning;

pub use error::{Error, Result};
pub use tcp::TcpTransport;

use std::time::Duration;

use async_trait::async_trait;
use bytes::BytesMut;

/// Transport trait for different communication methods
#[async_trait]
pub trait Transport: Send + Sync {
    /// Connect to the peer
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from the peer
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Send raw bytes
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive one complete envelope document (with timeout)
    async fn receive(&mut self, timeout: Duration) -> Result<BytesMut>;

    /// Get remote address
    fn remote_addr(&self) -> String;
}
