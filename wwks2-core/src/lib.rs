//! # wwks2-core
//!
//! Core protocol implementation for the WWKS 2.0 pharmacy automation
//! protocol.
//!
//! This crate provides the low-level protocol primitives:
//! - Envelope and message type schema
//! - Correlation id generation
//! - Declarative field-to-wire XML mapping

pub mod envelope;
pub mod error;
pub mod message;
pub mod message_id;

pub use envelope::Envelope;
pub use error::{Error, Result};
pub use message::{
    HelloRequest, HelloResponse, KeepAliveRequest, KeepAliveResponse, Message, StatusRequest,
    StatusResponse, TaskCancelRequest, TaskCancelResponse, TaskInfoRequest, TaskInfoResponse,
};
pub use message_id::{MessageIdSource, next_message_id};

/// Protocol version stamped on every outgoing envelope
pub const PROTOCOL_VERSION: &str = "2.0";

/// Default TCP port of a WWKS peer
pub const DEFAULT_PORT: u16 = 6050;

/// Close tag terminating every envelope on the wire
///
/// The protocol has no length prefix; connection layers frame inbound
/// streams on this literal.
pub const ENVELOPE_CLOSE_TAG: &str = "</WWKS>";
