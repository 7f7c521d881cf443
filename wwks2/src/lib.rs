//! # wwks2
//!
//! Rust client for the WWKS 2.0 pharmacy automation protocol.
//!
//! ## Features
//!
//! - Type-safe envelope and message schema
//! - Async/await API using Tokio
//! - Transport-level liveness tuning on every connection
//! - Correlation-checked request/response exchanges
//!
//! ## Quick Start
//!
//! ```no_run
//! use wwks2::{Client, Subscriber, SubscriberType};
//!
//! #[tokio::main]
//! async fn main() -> wwks2::Result<()> {
//!     let subscriber =
//!         Subscriber::new(100, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2");
//!
//!     // Connect and shake hands
//!     let mut client = Client::new("192.168.1.10", 6050, subscriber);
//!     client.connect().await?;
//!
//!     // Query peer state
//!     let status = client.status(true).await?;
//!     println!("{} components reported", status.components.len());
//!
//!     client.disconnect().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

// Re-exports
pub use client::Client;
pub use error::{Error, Result};

// Re-export protocol types
pub use wwks2_core::{
    DEFAULT_PORT, Envelope, HelloRequest, HelloResponse, KeepAliveRequest, KeepAliveResponse, Message,
    StatusRequest, StatusResponse, TaskCancelRequest, TaskCancelResponse, TaskInfoRequest,
    TaskInfoResponse,
};
pub use wwks2_transport::{TcpTransport, Transport};
pub use wwks2_types::{
    Component, ComponentDescriptor, ComponentState, ComponentType, Subscriber, SubscriberType,
    Task,
};
