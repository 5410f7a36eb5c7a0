//! Repository layer: storage-independent item access for presentation code.
//!
//! # Responsibility
//! - Define the narrow read-stream/write contract the UI depends on.
//! - Provide the SQLite-backed implementation over the data access layer.
//!
//! # Invariants
//! - Implementations forward calls without validation or caching.
//! - Presentation code only sees `ItemsRepository`, never SQLite types.

pub mod items_repository;
