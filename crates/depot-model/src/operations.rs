//! Depot operation enum.

use std::fmt;

/// All operations exposed by the depot HTTP surface.
///
/// Produced by the router from the request method and path. Folder and
/// identifier segments are carried percent-decoded; validation against the
/// key-encoding rules happens in the storage core, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepotOperation {
    // Enumeration
    /// List every folder that currently holds at least one object.
    ListFolders,
    /// List the objects in one folder.
    ListObjects {
        /// The folder to enumerate.
        folder: String,
    },

    // Object lifecycle
    /// Store a new object and mint its identifier.
    CreateObject {
        /// The folder receiving the object.
        folder: String,
    },
    /// Fetch an object's content and refresh its access time.
    ReadObject {
        /// The folder holding the object.
        folder: String,
        /// The object identifier.
        id: String,
    },
    /// Replace an existing object's content and metadata.
    UpdateObject {
        /// The folder holding the object.
        folder: String,
        /// The object identifier.
        id: String,
    },
    /// Remove an object from both stores.
    DeleteObject {
        /// The folder holding the object.
        folder: String,
        /// The object identifier.
        id: String,
    },
}

impl DepotOperation {
    /// Returns the operation name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ListFolders => "ListFolders",
            Self::ListObjects { .. } => "ListObjects",
            Self::CreateObject { .. } => "CreateObject",
            Self::ReadObject { .. } => "ReadObject",
            Self::UpdateObject { .. } => "UpdateObject",
            Self::DeleteObject { .. } => "DeleteObject",
        }
    }

    /// Whether the operation writes and therefore requires authorization.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::CreateObject { .. } | Self::UpdateObject { .. } | Self::DeleteObject { .. }
        )
    }

    /// Whether the operation consumes an upload payload from the body.
    #[must_use]
    pub fn expects_payload(&self) -> bool {
        matches!(self, Self::CreateObject { .. } | Self::UpdateObject { .. })
    }
}

impl fmt::Display for DepotOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
