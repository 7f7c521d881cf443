//! WWKS 2.0 message type schema
//!
//! Each protocol interaction is a Request/Response pair. Every message
//! carries the shared correlation fields:
//!
//! - `Id` — correlation id; a response echoes the id of the request it
//!   answers. Assigned from [`next_message_id`] for all pairs except
//!   Hello, which precedes endpoint assignment and uses a free-form
//!   handshake id.
//! - `Source` / `Destination` — integer endpoint identifiers, swapped in
//!   the response relative to the originating request. Hello omits them.
//!
//! Fields marked `@` in the serde renames map to XML attributes of the
//! message element; the remaining fields map to repeated child elements
//! in document order. Optional attributes are omitted from the wire when
//! absent, never written as empty strings. The mapping is consumed by a
//! generic XML engine; no serialization mechanics live here.
//!
//! Messages are constructed immediately before serialization, treated as
//! immutable afterwards, and never reused across sends.

use serde::{Deserialize, Serialize};

use wwks2_types::{ComponentDescriptor, Subscriber, Task};

use crate::message_id::next_message_id;

/// The single message carried by an [`Envelope`](crate::Envelope)
///
/// Variant names double as the XML element names on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    HelloRequest(HelloRequest),
    HelloResponse(HelloResponse),
    KeepAliveRequest(KeepAliveRequest),
    KeepAliveResponse(KeepAliveResponse),
    StatusRequest(StatusRequest),
    StatusResponse(StatusResponse),
    TaskInfoRequest(TaskInfoRequest),
    TaskInfoResponse(TaskInfoResponse),
    TaskCancelRequest(TaskCancelRequest),
    TaskCancelResponse(TaskCancelResponse),
}

impl Message {
    /// Correlation id of the carried message
    pub fn id(&self) -> &str {
        match self {
            Self::HelloRequest(m) => &m.id,
            Self::HelloResponse(m) => &m.id,
            Self::KeepAliveRequest(m) => &m.id,
            Self::KeepAliveResponse(m) => &m.id,
            Self::StatusRequest(m) => &m.id,
            Self::StatusResponse(m) => &m.id,
            Self::TaskInfoRequest(m) => &m.id,
            Self::TaskInfoResponse(m) => &m.id,
            Self::TaskCancelRequest(m) => &m.id,
            Self::TaskCancelResponse(m) => &m.id,
        }
    }

    /// Wire element name, for logging and error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HelloRequest(_) => "HelloRequest",
            Self::HelloResponse(_) => "HelloResponse",
            Self::KeepAliveRequest(_) => "KeepAliveRequest",
            Self::KeepAliveResponse(_) => "KeepAliveResponse",
            Self::StatusRequest(_) => "StatusRequest",
            Self::StatusResponse(_) => "StatusResponse",
            Self::TaskInfoRequest(_) => "TaskInfoRequest",
            Self::TaskInfoResponse(_) => "TaskInfoResponse",
            Self::TaskCancelRequest(_) => "TaskCancelRequest",
            Self::TaskCancelResponse(_) => "TaskCancelResponse",
        }
    }

    /// Check if this is a response message
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            Self::HelloResponse(_)
                | Self::KeepAliveResponse(_)
                | Self::StatusResponse(_)
                | Self::TaskInfoResponse(_)
                | Self::TaskCancelResponse(_)
        )
    }
}

/// Handshake request, sent before a session exists
///
/// `Id` is a free-form handshake identifier, not a correlation id from
/// the generator: at this point neither side has endpoint numbers yet,
/// so there are no `Source`/`Destination` fields either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelloRequest {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "Subscriber")]
    pub subscriber: Subscriber,
}

impl HelloRequest {
    pub fn new(id: impl Into<String>, subscriber: Subscriber) -> Self {
        Self {
            id: id.into(),
            subscriber,
        }
    }
}

/// Handshake response, echoing the handshake id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HelloResponse {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "Subscriber")]
    pub subscriber: Subscriber,
}

impl HelloResponse {
    /// Answer a handshake request with this side's subscriber descriptor
    pub fn answer(request: &HelloRequest, subscriber: Subscriber) -> Self {
        Self {
            id: request.id.clone(),
            subscriber,
        }
    }
}

/// Protocol-level liveness probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepAliveRequest {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,
}

impl KeepAliveRequest {
    pub fn new(source: u32, destination: u32) -> Self {
        Self {
            id: next_message_id(),
            source,
            destination,
        }
    }
}

/// Answer to a [`KeepAliveRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeepAliveResponse {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,
}

impl KeepAliveResponse {
    pub fn answer(request: &KeepAliveRequest) -> Self {
        Self {
            id: request.id.clone(),
            source: request.destination,
            destination: request.source,
        }
    }
}

/// Query the peer's operational state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusRequest {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    /// Ask for per-component detail; always present on the wire,
    /// `false` when not requested
    #[serde(rename = "@IncludeDetails", default)]
    pub include_details: bool,
}

impl StatusRequest {
    pub fn new(source: u32, destination: u32) -> Self {
        Self {
            id: next_message_id(),
            source,
            destination,
            include_details: false,
        }
    }

    /// Request per-component detail in the response
    pub fn with_details(mut self) -> Self {
        self.include_details = true;
        self
    }
}

/// Peer's operational state, optionally with per-component detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    #[serde(rename = "@State")]
    pub state: String,

    #[serde(rename = "@StateText", default)]
    pub state_text: String,

    /// Component reports in document order
    #[serde(rename = "Component", default)]
    pub components: Vec<ComponentDescriptor>,
}

impl StatusResponse {
    pub fn answer(
        request: &StatusRequest,
        state: impl Into<String>,
        state_text: impl Into<String>,
        components: Vec<ComponentDescriptor>,
    ) -> Self {
        Self {
            id: request.id.clone(),
            source: request.destination,
            destination: request.source,
            state: state.into(),
            state_text: state_text.into(),
            components,
        }
    }
}

/// Query the state of one or more tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfoRequest {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    /// Detail selector; omitted from the wire entirely when unset
    #[serde(
        rename = "@IncludeTaskDetails",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub include_task_details: Option<String>,

    /// Task references (id only)
    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}

impl TaskInfoRequest {
    pub fn new(source: u32, destination: u32, tasks: Vec<Task>) -> Self {
        Self {
            id: next_message_id(),
            source,
            destination,
            include_task_details: None,
            tasks,
        }
    }

    pub fn with_task_details(mut self, selector: impl Into<String>) -> Self {
        self.include_task_details = Some(selector.into());
        self
    }
}

/// Task descriptors answering a [`TaskInfoRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInfoResponse {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}

impl TaskInfoResponse {
    pub fn answer(request: &TaskInfoRequest, tasks: Vec<Task>) -> Self {
        Self {
            id: request.id.clone(),
            source: request.destination,
            destination: request.source,
            tasks,
        }
    }
}

/// Ask the peer to cancel one or more tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCancelRequest {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}

impl TaskCancelRequest {
    pub fn new(source: u32, destination: u32, tasks: Vec<Task>) -> Self {
        Self {
            id: next_message_id(),
            source,
            destination,
            tasks,
        }
    }
}

/// Task descriptors answering a [`TaskCancelRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCancelResponse {
    #[serde(rename = "@Id")]
    pub id: String,

    #[serde(rename = "@Source")]
    pub source: u32,

    #[serde(rename = "@Destination")]
    pub destination: u32,

    #[serde(rename = "Task", default)]
    pub tasks: Vec<Task>,
}

impl TaskCancelResponse {
    pub fn answer(request: &TaskCancelRequest, tasks: Vec<Task>) -> Self {
        Self {
            id: request.id.clone(),
            source: request.destination,
            destination: request.source,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wwks2_types::SubscriberType;

    fn subscriber(id: u32) -> Subscriber {
        Subscriber::new(id, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2")
    }

    #[test]
    fn test_hello_response_echoes_handshake_id() {
        let request = HelloRequest::new("session-7", subscriber(100));
        let response = HelloResponse::answer(&request, subscriber(999));

        assert_eq!(response.id, "session-7");
        assert_eq!(response.subscriber.id, 999);
    }

    #[test]
    fn test_keep_alive_response_echoes_id_and_swaps_endpoints() {
        let mut request = KeepAliveRequest::new(100, 999);
        request.id = "42".into();

        let response = KeepAliveResponse::answer(&request);

        assert_eq!(response.id, "42");
        assert_eq!(response.source, 999);
        assert_eq!(response.destination, 100);
    }

    #[test]
    fn test_status_response_echoes_id_and_swaps_endpoints() {
        let mut request = StatusRequest::new(100, 999);
        request.id = "42".into();

        let response = StatusResponse::answer(&request, "Ready", "", vec![]);

        assert_eq!(response.id, "42");
        assert_eq!(response.source, 999);
        assert_eq!(response.destination, 100);
        assert_eq!(response.state, "Ready");
    }

    #[test]
    fn test_task_info_response_echoes_id_and_swaps_endpoints() {
        let mut request = TaskInfoRequest::new(100, 999, vec![Task::reference("T-1")]);
        request.id = "42".into();

        let response =
            TaskInfoResponse::answer(&request, vec![Task::with_status("T-1", "InProcess")]);

        assert_eq!(response.id, "42");
        assert_eq!(response.source, 999);
        assert_eq!(response.destination, 100);
    }

    #[test]
    fn test_task_cancel_response_echoes_id_and_swaps_endpoints() {
        let mut request = TaskCancelRequest::new(100, 999, vec![Task::reference("T-1")]);
        request.id = "42".into();

        let response =
            TaskCancelResponse::answer(&request, vec![Task::with_status("T-1", "Cancelled")]);

        assert_eq!(response.id, "42");
        assert_eq!(response.source, 999);
        assert_eq!(response.destination, 100);
    }

    #[test]
    fn test_status_request_details_default_false() {
        let request = StatusRequest::new(100, 999);
        assert!(!request.include_details);

        let request = request.with_details();
        assert!(request.include_details);
    }

    #[test]
    fn test_request_ids_are_fresh_and_increasing() {
        let a: u32 = KeepAliveRequest::new(1, 2).id.parse().unwrap();
        let b: u32 = StatusRequest::new(1, 2).id.parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_message_kind_and_id() {
        let request = KeepAliveRequest {
            id: "7".into(),
            source: 1,
            destination: 2,
        };
        let message = Message::KeepAliveRequest(request);

        assert_eq!(message.kind(), "KeepAliveRequest");
        assert_eq!(message.id(), "7");
        assert!(!message.is_response());
    }
}
