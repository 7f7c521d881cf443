//! Error types for wwks2-types
//!
//! The wire shapes themselves never validate; these errors come from the
//! opt-in value-level checks (`Subscriber::validate`) and text parsers
//! (`ComponentState::from_str`) callers layer on top.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field value violates a value-level rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// Text did not name a known protocol value
    #[error("Parse error: {0}")]
    Parse(String),
}
