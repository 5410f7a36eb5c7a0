//! Data access layer over the `items` table.
//!
//! # Responsibility
//! - Translate CRUD calls and ordered queries into SQLite statements.
//! - Expose reads as live queries that re-emit when the table changes.
//!
//! # Invariants
//! - Writes that change rows invalidate the table exactly once per call.
//! - Live queries never emit the same snapshot twice in a row.

pub mod item_dao;
mod live_query;

pub use live_query::LiveQuery;
