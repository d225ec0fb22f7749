//! Errors reported while building a `HashTable`

use thiserror::Error;

/// Failure raised when a table cannot be constructed from the given parameters.
///
/// Every other operation on a constructed table is total, so this is the only error
/// the crate produces.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    /// A construction parameter is outside of its accepted range
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        name: &'static str,
        /// Human readable description of the accepted range
        reason: String,
    },
}

impl TableError {
    /// Builds an `InvalidArgument` for the named parameter
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { name, reason: reason.into() }
    }
}
