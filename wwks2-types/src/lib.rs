//! Type definitions for wwks2

pub mod component;
pub mod error;
pub mod subscriber;
pub mod task;

pub use component::{Component, ComponentDescriptor, ComponentState, ComponentType};
pub use error::{Error, Result};
pub use subscriber::{Subscriber, SubscriberType};
pub use task::Task;
