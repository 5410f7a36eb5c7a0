//! Inventory domain model.
//!
//! # Responsibility
//! - Define the data structures persisted and streamed by core.
//!
//! # Invariants
//! - `Item` is the only entity; nothing references it by foreign key.
//! - Deletion is a hard delete. There are no tombstones.

pub mod item;
