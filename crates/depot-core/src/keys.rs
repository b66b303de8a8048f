//! Composite key codec.
//!
//! Every object is addressed by a single composite key, the folder name and
//! the object identifier joined with [`FOLDER_SEPARATOR`]. Both backing
//! stores are keyed by this textual form, so the codec must be reversible:
//! `decompose(compose(f, id)) == (f, id)` for every valid pair.
//!
//! Folder names may not contain the separator; identifiers are minted by the
//! service (UUIDs) and never contain it either, but [`decompose`] splits on
//! the first occurrence so a key with extra separators still yields a
//! well-defined folder prefix.

use depot_model::{DepotError, DepotResult};

/// Reserved separator between folder and identifier in a composite key.
pub const FOLDER_SEPARATOR: &str = "__";

/// Validate a folder name against the key-encoding rules.
///
/// # Errors
///
/// Returns [`DepotError::InvalidFolder`] if the name is empty or contains
/// [`FOLDER_SEPARATOR`].
pub fn validate_folder(folder: &str) -> DepotResult<()> {
    if folder.is_empty() {
        return Err(DepotError::InvalidFolder {
            folder: folder.to_owned(),
            reason: "folder name is empty".to_owned(),
        });
    }
    if folder.contains(FOLDER_SEPARATOR) {
        return Err(DepotError::InvalidFolder {
            folder: folder.to_owned(),
            reason: format!("folder name contains the reserved separator {FOLDER_SEPARATOR:?}"),
        });
    }
    Ok(())
}

/// Join a folder name and an object identifier into the composite key.
///
/// # Errors
///
/// Returns [`DepotError::InvalidFolder`] if the folder name fails
/// [`validate_folder`].
pub fn compose(folder: &str, id: &str) -> DepotResult<String> {
    validate_folder(folder)?;
    Ok(format!("{folder}{FOLDER_SEPARATOR}{id}"))
}

/// Split a composite key back into its `(folder, id)` components.
///
/// Splits on the first occurrence of [`FOLDER_SEPARATOR`], so an identifier
/// containing the separator round-trips unchanged.
///
/// # Errors
///
/// Returns [`DepotError::MalformedKey`] if the separator is absent or either
/// component is empty.
pub fn decompose(key: &str) -> DepotResult<(&str, &str)> {
    let (folder, id) = key
        .split_once(FOLDER_SEPARATOR)
        .ok_or_else(|| DepotError::MalformedKey {
            key: key.to_owned(),
        })?;

    if folder.is_empty() || id.is_empty() {
        return Err(DepotError::MalformedKey {
            key: key.to_owned(),
        });
    }

    Ok((folder, id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
