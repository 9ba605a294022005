//! Local persistence for listing pages.
//!
//! Listing pages cache their fetched pool and criteria so a revisit renders
//! instantly. The backing store is a plain string key-value store, modelled on
//! a browser's local storage.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-process backend for tests and `--no-cache`
//! - `view_store`: typed per-page load/save/clear on top of any backend

pub mod backend;
pub mod json;
pub mod memory;
pub mod view_store;

pub use backend::KeyValueStore;
pub use json::JsonKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use view_store::ViewStore;
