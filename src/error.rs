//! Error types for transcript parsing

use thiserror::Error;

/// Structural failures inside a single document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A participant name appeared before any role heading
    #[error("participant {name:?} listed before any role heading")]
    NameBeforeRoleHeading { name: String },

    /// The call date string did not match any known layout
    #[error("unrecognized date {raw:?}")]
    UnparseableDate { raw: String },
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
