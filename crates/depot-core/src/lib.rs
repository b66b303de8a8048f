//! Storage core for the depot object store.
//!
//! This crate maps logical `(folder, id)` addresses onto two co-located
//! key-value stores, one holding a JSON metadata record per object and one
//! holding the zstd-compressed content blob, and orchestrates the object
//! lifecycle across them.
//!
//! # Architecture
//!
//! ```text
//! HTTP adapter (routing, body parsing, auth)
//!        |
//!        v
//!   ObjectService (lifecycle + enumeration, cross-store invariants)
//!      |                  |
//!      v                  v
//! MetadataStore      ContentStore
//!      |                  |
//!      +--------+---------+
//!               v
//!       KeyValueBackend (file-per-key or in-memory)
//! ```
//!
//! Folders are not stored anywhere: they are a derived view over the
//! composite keys (`folder__id`) present in the metadata store.

pub mod backend;
pub mod config;
pub mod keys;
pub mod service;
pub mod store;

pub use config::DepotConfig;
pub use service::ObjectService;
