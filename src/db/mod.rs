//! Persistence layer (JSON file).

pub mod library;

pub use library::{LibraryStore, StoreError};
