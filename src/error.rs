/// Error types for deck generation.
use thiserror::Error;

/// Result type for deck generation.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Error types for deck generation.
#[derive(Error, Debug)]
pub enum DeckError {
    /// A slide specification has no usable title
    #[error("slide {index}: title is missing or blank")]
    MissingTitle { index: usize },

    /// XML generation or parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A generated or opened package is missing a required part
    #[error("invalid package: {0}")]
    InvalidPackage(String),
}

impl From<quick_xml::Error> for DeckError {
    fn from(err: quick_xml::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for DeckError {
    fn from(err: std::fmt::Error) -> Self {
        DeckError::Xml(err.to_string())
    }
}
