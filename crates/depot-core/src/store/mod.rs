//! The two per-object stores.
//!
//! - [`MetadataStore`] -- one JSON [`ObjectMeta`] record per composite key,
//!   plus the folder-scoped enumerations derived from the key space
//! - [`ContentStore`] -- one zstd-compressed, checksummed blob per composite
//!   key
//!
//! Both sit on a [`KeyValueBackend`](crate::backend::KeyValueBackend) and are
//! kept consistent by [`ObjectService`](crate::service::ObjectService), never
//! by each other.
//!
//! [`ObjectMeta`]: depot_model::ObjectMeta

pub(crate) mod content;
pub(crate) mod metadata;

pub use content::ContentStore;
pub use metadata::MetadataStore;
