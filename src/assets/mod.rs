//! Local font asset store.
//!
//! The only state shared across requests: files mirrored under a configured
//! root, keyed by the URL path they were fetched from. Existing files are
//! never re-downloaded or invalidated.

pub mod store;

pub use store::AssetStore;
