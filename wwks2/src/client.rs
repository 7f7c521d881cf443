//! High-level WWKS 2.0 client

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use wwks2_core::{
    Envelope, HelloRequest, KeepAliveRequest, Message, StatusRequest, StatusResponse,
    TaskCancelRequest, TaskInfoRequest,
};
use wwks2_transport::{TcpTransport, Transport};
use wwks2_types::{Subscriber, Task};

use crate::error::{Error, Result};

/// WWKS 2.0 client
///
/// High-level request/response interface to a storage/dispensing system.
/// Performs the Hello handshake on connect, then exposes one method per
/// protocol operation; every response is checked against the request's
/// correlation id before being returned.
///
/// # Examples
///
/// ```no_run
/// use wwks2::{Client, Subscriber, SubscriberType};
///
/// #[tokio::main]
/// async fn main() -> wwks2::Result<()> {
///     let subscriber =
///         Subscriber::new(100, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2");
///     let mut client = Client::new("192.168.1.10", 6050, subscriber);
///
///     client.connect().await?;
///
///     let status = client.status(true).await?;
///     println!("Peer state: {}", status.state);
///
///     client.disconnect().await?;
///     Ok(())
/// }
/// ```
pub struct Client {
    transport: Box<dyn Transport>,
    subscriber: Subscriber,
    peer: Option<Subscriber>,
    timeout: Duration,
    handshake_id: Option<String>,
}

impl Client {
    /// Create a new client (TCP transport)
    pub fn new(addr: impl Into<String>, port: u16, subscriber: Subscriber) -> Self {
        Self::with_transport(Box::new(TcpTransport::new(addr, port)), subscriber)
    }

    /// Create a client over an arbitrary transport
    pub fn with_transport(transport: Box<dyn Transport>, subscriber: Subscriber) -> Self {
        Self {
            transport,
            subscriber,
            peer: None,
            timeout: Duration::from_secs(5),
            handshake_id: None,
        }
    }

    /// Set response timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the free-form Hello handshake id
    ///
    /// Defaults to the current UTC epoch-millis rendered as text.
    pub fn with_handshake_id(mut self, id: impl Into<String>) -> Self {
        self.handshake_id = Some(id.into());
        self
    }

    /// Check if the handshake completed and the transport is up
    pub fn is_connected(&self) -> bool {
        self.peer.is_some() && self.transport.is_connected()
    }

    /// Subscriber descriptor the peer announced in its HelloResponse
    pub fn peer(&self) -> Option<&Subscriber> {
        self.peer.as_ref()
    }

    /// Connect and perform the Hello handshake
    ///
    /// # Errors
    ///
    /// Returns an error if the network connection fails, the peer answers
    /// with something other than a HelloResponse, the handshake id is not
    /// echoed, or either subscriber descriptor fails validation.
    pub async fn connect(&mut self) -> Result<()> {
        self.subscriber.validate()?;

        info!("Connecting to {}...", self.transport.remote_addr());

        self.transport.connect().await?;

        let id = self
            .handshake_id
            .clone()
            .unwrap_or_else(|| Utc::now().timestamp_millis().to_string());

        let request = HelloRequest::new(id, self.subscriber.clone());
        let response = self.exchange(Message::HelloRequest(request)).await?;

        let peer = match response {
            Message::HelloResponse(hello) => hello.subscriber,
            other => {
                return Err(Error::HandshakeFailed(format!(
                    "peer answered with {}",
                    other.kind()
                )));
            }
        };

        // Do not trust an announced descriptor blindly
        peer.validate()?;

        info!("Handshake complete, peer is {}", peer);
        self.peer = Some(peer);

        Ok(())
    }

    /// Disconnect from the peer
    pub async fn disconnect(&mut self) -> Result<()> {
        self.peer = None;
        self.transport.disconnect().await?;
        Ok(())
    }

    /// Protocol-level liveness probe
    pub async fn keep_alive(&mut self) -> Result<()> {
        let (source, destination) = self.endpoints()?;

        let request = KeepAliveRequest::new(source, destination);
        let response = self.exchange(Message::KeepAliveRequest(request)).await?;

        match response {
            Message::KeepAliveResponse(_) => Ok(()),
            other => Err(unexpected("KeepAliveResponse", &other)),
        }
    }

    /// Query the peer's operational state
    ///
    /// With `include_details` the response carries one descriptor per
    /// monitored component, in the peer's document order.
    pub async fn status(&mut self, include_details: bool) -> Result<StatusResponse> {
        let (source, destination) = self.endpoints()?;

        let mut request = StatusRequest::new(source, destination);
        if include_details {
            request = request.with_details();
        }

        let response = self.exchange(Message::StatusRequest(request)).await?;

        match response {
            Message::StatusResponse(status) => {
                debug!("Peer state: {} ({})", status.state, status.state_text);
                Ok(status)
            }
            other => Err(unexpected("StatusResponse", &other)),
        }
    }

    /// Query the state of the referenced tasks
    pub async fn task_info(
        &mut self,
        tasks: Vec<Task>,
        details: Option<String>,
    ) -> Result<Vec<Task>> {
        let (source, destination) = self.endpoints()?;

        let mut request = TaskInfoRequest::new(source, destination, tasks);
        if let Some(selector) = details {
            request = request.with_task_details(selector);
        }

        let response = self.exchange(Message::TaskInfoRequest(request)).await?;

        match response {
            Message::TaskInfoResponse(info) => Ok(info.tasks),
            other => Err(unexpected("TaskInfoResponse", &other)),
        }
    }

    /// Ask the peer to cancel the referenced tasks
    pub async fn task_cancel(&mut self, tasks: Vec<Task>) -> Result<Vec<Task>> {
        let (source, destination) = self.endpoints()?;

        let request = TaskCancelRequest::new(source, destination, tasks);
        let response = self.exchange(Message::TaskCancelRequest(request)).await?;

        match response {
            Message::TaskCancelResponse(cancel) => Ok(cancel.tasks),
            other => Err(unexpected("TaskCancelResponse", &other)),
        }
    }

    /// Our endpoint number and the peer's, once the handshake settled them
    fn endpoints(&self) -> Result<(u32, u32)> {
        let peer = self.peer.as_ref().ok_or(Error::NotConnected)?;
        Ok((self.subscriber.id, peer.id))
    }

    /// Send one request envelope and await the correlated answer
    async fn exchange(&mut self, message: Message) -> Result<Message> {
        let request_id = message.id().to_owned();
        let kind = message.kind();

        let xml = Envelope::wrap(message).to_xml().map_err(Error::Core)?;

        debug!("Sending {} (Id={})", kind, request_id);
        self.transport.send(xml.as_bytes()).await?;

        let bytes = self.transport.receive(self.timeout).await?;
        let text = std::str::from_utf8(&bytes)
            .map_err(|e| Error::InvalidResponse(format!("not valid UTF-8: {}", e)))?;

        let envelope = Envelope::from_xml(text).map_err(Error::Core)?;
        let response = envelope.message;

        if response.id() != request_id {
            warn!(
                "Discarding response {} with foreign Id {}",
                response.kind(),
                response.id()
            );
            return Err(Error::CorrelationMismatch {
                expected: request_id,
                actual: response.id().to_owned(),
            });
        }

        Ok(response)
    }
}

fn unexpected(expected: &'static str, actual: &Message) -> Error {
    Error::UnexpectedMessage {
        expected,
        actual: actual.kind(),
    }
}
