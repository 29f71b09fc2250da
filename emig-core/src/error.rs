//! Error types for the choropleth core.

use thiserror::Error;

/// Errors raised when changing the expressed attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// The name is not one of the fixed attributes.
    #[error("Unknown attribute: {0:?}")]
    InvalidAttribute(String),
}
