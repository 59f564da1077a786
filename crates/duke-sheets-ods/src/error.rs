//! ODS error types

use thiserror::Error;

/// Result type for ODS operations
pub type OdsResult<T> = std::result::Result<T, OdsError>;

/// Broad classification of an [`OdsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the file, archive entry or token stream failed
    Io,
    /// The package is not a readable ODS spreadsheet
    Format,
    /// A cell attribute could not be interpreted
    Parse,
}

/// Errors that can occur while opening or decoding an ODS file
#[derive(Debug, Error)]
pub enum OdsError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error while reading tokens from content.xml
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// The mimetype entry does not identify a spreadsheet
    #[error("Unexpected mimetype. found: {found:?}, expected: {expected:?}")]
    UnexpectedMimetype {
        found: String,
        expected: &'static str,
    },

    /// A repeat attribute is not a valid integer
    #[error("Invalid value {value:?} for attribute {attribute}")]
    InvalidRepeat {
        attribute: &'static str,
        value: String,
    },

    /// content.xml ended before the spreadsheet region was closed
    #[error("content.xml ended unexpectedly inside {0}")]
    Truncated(&'static str),
}

impl OdsError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            OdsError::Io(_) | OdsError::Xml(_) | OdsError::Truncated(_) => ErrorKind::Io,
            OdsError::Zip(zip::result::ZipError::Io(_)) => ErrorKind::Io,
            OdsError::Zip(_) | OdsError::MissingPart(_) | OdsError::UnexpectedMimetype { .. } => {
                ErrorKind::Format
            }
            OdsError::InvalidRepeat { .. } => ErrorKind::Parse,
        }
    }
}
