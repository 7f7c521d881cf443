//! Subscriber descriptors exchanged during the Hello handshake

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Role of a protocol participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubscriberType {
    /// Controlling host (inventory management system)
    #[serde(rename = "IMS")]
    Ims,

    /// Storage/dispensing robot
    Robot,
}

/// Identity a participant announces in Hello messages
///
/// All fields map to attributes of the `Subscriber` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Endpoint identifier the participant will use as Source/Destination
    #[serde(rename = "@Id")]
    pub id: u32,

    #[serde(rename = "@Type")]
    pub subscriber_type: SubscriberType,

    #[serde(rename = "@Manufacturer")]
    pub manufacturer: String,

    #[serde(rename = "@ProductInfo")]
    pub product_info: String,

    #[serde(rename = "@VersionInfo")]
    pub version_info: String,
}

impl Subscriber {
    pub fn new(
        id: u32,
        subscriber_type: SubscriberType,
        manufacturer: impl Into<String>,
        product_info: impl Into<String>,
        version_info: impl Into<String>,
    ) -> Self {
        Self {
            id,
            subscriber_type,
            manufacturer: manufacturer.into(),
            product_info: product_info.into(),
            version_info: version_info.into(),
        }
    }

    /// Value-level sanity check
    ///
    /// The schema itself never validates; session layers call this before
    /// trusting an announced descriptor. Endpoint `0` is reserved and
    /// never addressable as a `Source`/`Destination`.
    pub fn validate(&self) -> Result<()> {
        if self.id == 0 {
            return Err(Error::Validation(
                "subscriber id 0 is not an addressable endpoint".into(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subscriber[{}: {} {} {}]",
            self.id, self.manufacturer, self.product_info, self.version_info
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validate_accepts_addressable_endpoint() {
        let subscriber = Subscriber::new(100, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2");
        subscriber.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_endpoint_zero() {
        let subscriber = Subscriber::new(0, SubscriberType::Robot, "Rowa", "Vmax", "2.0.1");

        let err = subscriber.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_display() {
        let subscriber = Subscriber::new(100, SubscriberType::Ims, "Acme", "HostSuite", "1.4.2");
        assert_eq!(subscriber.to_string(), "Subscriber[100: Acme HostSuite 1.4.2]");
    }
}
