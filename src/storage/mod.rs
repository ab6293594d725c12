//! Local persistence for the session.
//!
//! # Modules
//!
//! - [`backend`]: The [`KeyValueStore`] trait and an in-memory store
//! - [`json`]: JSON file store with atomic writes

pub mod backend;
pub mod json;

pub use backend::{KeyValueStore, MemoryStore};
pub use json::JsonKeyValueStore;
