//! Error types for the core element model.

/// Result type alias for document and selector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core element model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The element ID is invalid or the element has been removed.
    #[error("invalid or removed element id")]
    InvalidElementId,

    /// Attempted to attach an element to itself or one of its descendants.
    #[error("cannot attach an element to itself or its own descendant")]
    CircularParentage,

    /// The document root cannot be detached or removed.
    #[error("the document root cannot be detached or removed")]
    RootImmutable,

    /// Selector parsing error.
    #[error("invalid selector '{selector}': {message}")]
    InvalidSelector {
        /// The selector source text that failed to parse.
        selector: String,
        /// What went wrong.
        message: String,
    },
}

impl Error {
    /// Create a selector error.
    pub fn invalid_selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSelector {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
