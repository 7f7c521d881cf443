//! Protocol envelope
//!
//! Every document on the wire is a `WWKS` root element wrapping exactly
//! one message:
//!
//! ```text
//! <WWKS Version="2.0" TimeStamp="2026-08-27T09:15:00Z">
//!   <StatusRequest Id="4711" Source="100" Destination="999" IncludeDetails="false"/>
//! </WWKS>
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::PROTOCOL_VERSION;
use crate::error::Result;
use crate::message::Message;

/// Canonical envelope timestamp format (UTC)
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Root wire-format wrapper carrying version, timestamp and one message
///
/// The timestamp is stamped when the envelope is constructed, not when it
/// is sent; `Version` is the fixed literal `"2.0"` for every outgoing
/// envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename = "WWKS")]
pub struct Envelope {
    #[serde(rename = "@Version")]
    pub version: String,

    #[serde(rename = "@TimeStamp")]
    pub timestamp: String,

    #[serde(rename = "$value")]
    pub message: Message,
}

impl Envelope {
    /// Wrap a message, stamping the current UTC instant
    pub fn wrap(message: Message) -> Self {
        Self {
            version: PROTOCOL_VERSION.to_owned(),
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            message,
        }
    }

    /// Render as a wire document
    pub fn to_xml(&self) -> Result<String> {
        Ok(quick_xml::se::to_string(self)?)
    }

    /// Parse a wire document
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not well-formed XML or does
    /// not match the message schema.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{
        HelloRequest, KeepAliveRequest, StatusRequest, StatusResponse, TaskInfoRequest,
    };
    use pretty_assertions::assert_eq;
    use wwks2_types::{
        ComponentDescriptor, ComponentState, ComponentType, Subscriber, SubscriberType, Task,
    };

    fn keep_alive() -> Message {
        Message::KeepAliveRequest(KeepAliveRequest {
            id: "17".into(),
            source: 100,
            destination: 999,
        })
    }

    #[test]
    fn test_wrap_stamps_version_and_timestamp() {
        let envelope = Envelope::wrap(keep_alive());

        assert_eq!(envelope.version, "2.0");
        // 2026-08-27T09:15:00Z
        assert_eq!(envelope.timestamp.len(), 20);
        assert!(envelope.timestamp.ends_with('Z'));
        assert_eq!(&envelope.timestamp[10..11], "T");
    }

    #[test]
    fn test_root_element_is_wwks() {
        let xml = Envelope::wrap(keep_alive()).to_xml().unwrap();

        assert!(xml.starts_with("<WWKS "));
        assert!(xml.contains(r#"Version="2.0""#));
        assert!(xml.contains("<KeepAliveRequest"));
        assert!(xml.contains(r#"Id="17""#));
    }

    #[test]
    fn test_status_response_round_trip_preserves_component_order() {
        let mut request = StatusRequest::new(100, 999);
        request.id = "42".into();

        let components = vec![
            ComponentDescriptor {
                component_type: ComponentType::StorageSystem,
                description: "Main picking unit".into(),
                state: ComponentState::Ready,
                state_text: None,
            },
            ComponentDescriptor {
                component_type: ComponentType::BoxSystem,
                description: "Output belt".into(),
                state: ComponentState::NotReady,
                state_text: Some("Belt jam".into()),
            },
        ];

        let response = StatusResponse::answer(&request, "Ready", "", components);
        let envelope = Envelope::wrap(Message::StatusResponse(response));

        let xml = envelope.to_xml().unwrap();
        let decoded = Envelope::from_xml(&xml).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_status_request_serializes_default_include_details() {
        let mut request = StatusRequest::new(100, 999);
        request.id = "1".into();

        let xml = Envelope::wrap(Message::StatusRequest(request))
            .to_xml()
            .unwrap();

        assert!(xml.contains(r#"IncludeDetails="false""#));
    }

    #[test]
    fn test_task_info_request_omits_unset_details_attribute() {
        let mut request = TaskInfoRequest::new(100, 999, vec![Task::reference("T-9")]);
        request.id = "2".into();

        let xml = Envelope::wrap(Message::TaskInfoRequest(request))
            .to_xml()
            .unwrap();

        assert!(!xml.contains("IncludeTaskDetails"));
        assert!(xml.contains(r#"<Task Id="T-9"/>"#));
    }

    #[test]
    fn test_component_without_state_text_omits_attribute() {
        let mut request = StatusRequest::new(100, 999);
        request.id = "3".into();

        let response = StatusResponse::answer(
            &request,
            "Ready",
            "",
            vec![ComponentDescriptor {
                component_type: ComponentType::StorageSystem,
                description: "Main picking unit".into(),
                state: ComponentState::Ready,
                state_text: None,
            }],
        );

        let xml = Envelope::wrap(Message::StatusResponse(response))
            .to_xml()
            .unwrap();

        let start = xml.find("<Component").unwrap();
        let end = start + xml[start..].find("/>").unwrap();
        let component = &xml[start..end];

        assert!(component.contains(r#"State="Ready""#));
        assert!(!component.contains("StateText"));
    }

    #[test]
    fn test_hello_round_trip() {
        let request = HelloRequest::new(
            "handshake-1",
            Subscriber::new(100, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2"),
        );
        let envelope = Envelope::wrap(Message::HelloRequest(request));

        let xml = envelope.to_xml().unwrap();
        let decoded = Envelope::from_xml(&xml).unwrap();

        assert_eq!(decoded, envelope);
        assert!(xml.contains(r#"<Subscriber Id="100" Type="IMS""#));
    }

    #[test]
    fn test_from_xml_rejects_garbage() {
        assert!(Envelope::from_xml("<WWKS Version=\"2.0\">").is_err());
        assert!(Envelope::from_xml("not xml at all").is_err());
    }

    #[test]
    fn test_parses_peer_formatting() {
        // Attribute order and whitespace as another implementation
        // might emit them
        let xml = r#"
            <WWKS TimeStamp="2026-08-27T09:15:00Z" Version="2.0">
              <KeepAliveResponse Destination="100" Source="999" Id="17" />
            </WWKS>"#;

        let envelope = Envelope::from_xml(xml).unwrap();

        assert_eq!(envelope.version, "2.0");
        assert_eq!(envelope.message.id(), "17");
        assert!(envelope.message.is_response());
    }
}
