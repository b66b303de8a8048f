//! Depot error types.
//!
//! Defines [`DepotError`], the typed error surface shared by the storage core
//! and the HTTP adapter. Every fallible depot operation returns this enum;
//! the adapter maps each kind to an HTTP status code and a structured JSON
//! body via [`DepotError::kind`].
//!
//! # Usage
//!
//! ```
//! use depot_model::error::DepotError;
//!
//! let err = DepotError::NotFound {
//!     key: "invoices__3f2a".to_owned(),
//! };
//! assert_eq!(err.kind(), "NotFound");
//! ```

use std::fmt;

/// Which of the two persisted stores a composite key was missing from.
///
/// Carried by [`DepotError::Inconsistent`] so operators know which side of an
/// object needs repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreSide {
    /// The metadata record store.
    Metadata,
    /// The compressed content store.
    Content,
}

impl fmt::Display for StoreSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => f.write_str("metadata"),
            Self::Content => f.write_str("content"),
        }
    }
}

/// Depot service error type.
///
/// Each variant corresponds to a distinct failure kind with its own
/// user-visible semantics. [`DepotError::Inconsistent`] is deliberately
/// separate from [`DepotError::NotFound`]: a half-written object is an
/// integrity fault to surface, not a missing object to 404.
#[derive(Debug, thiserror::Error)]
pub enum DepotError {
    // -----------------------------------------------------------------------
    // Addressing errors
    // -----------------------------------------------------------------------
    /// The folder name is empty or contains the reserved separator.
    #[error("Invalid folder name {folder:?}: {reason}")]
    InvalidFolder {
        /// The rejected folder name.
        folder: String,
        /// Why the name was rejected.
        reason: String,
    },

    /// A composite key could not be split back into folder and identifier.
    #[error("Malformed composite key {key:?}")]
    MalformedKey {
        /// The key that could not be decomposed.
        key: String,
    },

    // -----------------------------------------------------------------------
    // Object state errors
    // -----------------------------------------------------------------------
    /// The addressed object does not exist in either store.
    #[error("The specified object does not exist: {key}")]
    NotFound {
        /// The composite key that was not found.
        key: String,
    },

    /// Exactly one of the two stores holds the key.
    #[error("Inconsistent object state: {key} has no {missing} record")]
    Inconsistent {
        /// The composite key in the half-present state.
        key: String,
        /// The store whose record is missing.
        missing: StoreSide,
    },

    // -----------------------------------------------------------------------
    // Persistence errors
    // -----------------------------------------------------------------------
    /// The backing key-value store failed.
    #[error("Backend failure: {message}")]
    Backend {
        /// Description of the underlying failure.
        message: String,
    },

    // -----------------------------------------------------------------------
    // Internal / catch-all
    // -----------------------------------------------------------------------
    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl DepotError {
    /// Stable machine-readable kind string, used in wire error bodies.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFolder { .. } => "InvalidFolder",
            Self::MalformedKey { .. } => "MalformedKey",
            Self::NotFound { .. } => "NotFound",
            Self::Inconsistent { .. } => "Inconsistent",
            Self::Backend { .. } => "BackendFailure",
            Self::Internal(_) => "InternalError",
        }
    }

    /// Build a [`DepotError::Backend`] with context about the failed call.
    pub fn backend(context: &str, source: impl fmt::Display) -> Self {
        Self::Backend {
            message: format!("{context}: {source}"),
        }
    }
}

/// Convenience result type for depot operations.
pub type DepotResult<T> = Result<T, DepotError>;
