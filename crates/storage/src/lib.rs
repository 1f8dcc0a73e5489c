//! Result stores for Refactorium.
//!
//! This crate provides a trait-based store keyed by analysis and proposal
//! ids, with an in-memory implementation for long-running processes and a
//! JSON-file implementation for the CLI.

#![warn(missing_docs)]

pub mod trait_;
pub mod memory;
#[cfg(feature = "json")]
pub mod json_storage;

pub use trait_::{Store, StorageError, Result};
pub use memory::MemoryStore;
#[cfg(feature = "json")]
pub use json_storage::JsonStore;
