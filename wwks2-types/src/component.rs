//! Component state model
//!
//! A component is a monitored sub-unit of the peer (the storage system
//! itself, or an attached box system). Status responses report the last
//! known state of each component.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Last known operational state of a monitored component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentState {
    /// No connection to the component
    NotConnected,

    /// Component is operational
    Ready,

    /// Component is connected but cannot process tasks
    NotReady,
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "NotConnected"),
            Self::Ready => write!(f, "Ready"),
            Self::NotReady => write!(f, "NotReady"),
        }
    }
}

impl FromStr for ComponentState {
    type Err = Error;

    /// Parse the state text a peer reports (e.g. `StatusResponse.State`)
    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "NotConnected" => Ok(Self::NotConnected),
            "Ready" => Ok(Self::Ready),
            "NotReady" => Ok(Self::NotReady),
            other => Err(Error::Parse(format!("unknown component state: {other}"))),
        }
    }
}

/// Kind of monitored component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComponentType {
    /// Automated storage/dispensing system
    StorageSystem,

    /// Box conveyor/dispenser system
    BoxSystem,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageSystem => write!(f, "StorageSystem"),
            Self::BoxSystem => write!(f, "BoxSystem"),
        }
    }
}

/// Capability exposed by anything that tracks a component's live state
///
/// Concrete state holders (device drivers, session bookkeeping) implement
/// this; reporting code only ever reads through it. `state_text` is opaque
/// diagnostic text and must never be interpreted by protocol logic.
pub trait Component {
    /// Kind of component
    fn component_type(&self) -> ComponentType;

    /// Human-readable description
    fn description(&self) -> &str;

    /// Last known operational state
    fn state(&self) -> ComponentState;

    /// Supplementary diagnostic text, if any
    fn state_text(&self) -> Option<&str> {
        None
    }
}

/// Serializable wire image of a [`Component`]
///
/// `Type`, `Description` and `State` map to attributes; `StateText` is
/// omitted from the wire entirely when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    #[serde(rename = "@Type")]
    pub component_type: ComponentType,

    #[serde(rename = "@Description")]
    pub description: String,

    #[serde(rename = "@State")]
    pub state: ComponentState,

    #[serde(rename = "@StateText", skip_serializing_if = "Option::is_none", default)]
    pub state_text: Option<String>,
}

impl ComponentDescriptor {
    /// Snapshot any live component into its wire image
    pub fn from_component(component: &dyn Component) -> Self {
        Self {
            component_type: component.component_type(),
            description: component.description().to_owned(),
            state: component.state(),
            state_text: component.state_text().map(str::to_owned),
        }
    }
}

impl fmt::Display for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Component[{}: {} ({})]",
            self.component_type, self.state, self.description
        )
    }
}
