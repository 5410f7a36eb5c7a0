//! Item domain model.
//!
//! # Responsibility
//! - Define the single inventory record persisted by core.
//!
//! # Invariants
//! - `id` is immutable once assigned and unique across stored items.
//! - `UNASSIGNED_ITEM_ID` marks a record whose id is assigned on insert.
//! - No field validation happens here; values are stored as given.

use serde::{Deserialize, Serialize};

/// Primary identity of a stored item.
///
/// Kept as a type alias so signatures read in domain terms.
pub type ItemId = i64;

/// Id value meaning "let storage assign one on insert".
pub const UNASSIGNED_ITEM_ID: ItemId = 0;

/// Inventory record: one row of the `items` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Storage-assigned identity, or `UNASSIGNED_ITEM_ID` before insert.
    #[serde(default)]
    pub id: ItemId,
    pub name: String,
    /// Currency amount.
    pub price: f64,
    /// Units in stock. Expected to be non-negative, but not enforced.
    pub quantity: i64,
}

impl Item {
    /// Creates an item whose id will be assigned on insert.
    pub fn new(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self::with_id(UNASSIGNED_ITEM_ID, name, price, quantity)
    }

    /// Creates an item with a caller-provided id.
    ///
    /// Inserting it conflicts with any stored item using the same id, in
    /// which case the insert is ignored.
    pub fn with_id(id: ItemId, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn has_assigned_id(&self) -> bool {
        self.id != UNASSIGNED_ITEM_ID
    }
}
