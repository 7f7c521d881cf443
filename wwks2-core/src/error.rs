//! Error types for wwks2-core

/// Result type alias for core protocol operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core protocol errors
///
/// The schema types themselves are total; only the boundary with the XML
/// engine can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Message could not be rendered as XML
    #[error("XML serialization failed: {0}")]
    Serialize(#[from] quick_xml::SeError),

    /// Inbound document did not match the message schema
    #[error("XML deserialization failed: {0}")]
    Deserialize(#[from] quick_xml::DeError),
}
