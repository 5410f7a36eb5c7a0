//! Item data access object.
//!
//! # Responsibility
//! - Provide async CRUD and live read queries over the `items` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Insert ignores primary-key conflicts instead of overwriting. Other
//!   constraint failures are returned as errors.
//! - Writes invalidate the table from the blocking task that ran them.
//! - Update and delete match rows by `id`; zero matches is not an error.
//! - List reads are ordered by `name` ascending, then `id`.
//! - No field validation: values are persisted as given.

use super::live_query::{observe, LiveQuery};
use crate::db::{DbResult, InventoryDatabase};
use crate::model::item::{Item, ItemId};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

const ITEM_SELECT_SQL: &str = "SELECT
    id,
    name,
    price,
    quantity
FROM items";

/// SQLite-backed access to stored items.
///
/// Cheap to clone; clones share the same engine.
#[derive(Debug, Clone)]
pub struct ItemDao {
    db: Arc<InventoryDatabase>,
}

impl ItemDao {
    pub fn new(db: Arc<InventoryDatabase>) -> Self {
        Self { db }
    }

    /// Inserts `item`, letting SQLite assign the id when it is unassigned.
    ///
    /// Returns the stored id, or `None` when the id already exists and the
    /// insert was ignored.
    pub async fn insert(&self, item: &Item) -> DbResult<Option<ItemId>> {
        let item = item.clone();
        let inserted = self
            .db
            .write("item_insert", move |conn| {
                let inserted = insert_item(conn, &item)?;
                Ok((inserted, usize::from(inserted.is_some())))
            })
            .await?;

        match inserted {
            Some(id) => debug!("event=item_insert module=dao status=ok id={id}"),
            None => debug!("event=item_insert module=dao status=ignored reason=duplicate_id"),
        }
        Ok(inserted)
    }

    /// Replaces the stored fields of the row whose id matches `item.id`.
    ///
    /// Returns the number of rows changed (`0` or `1`).
    pub async fn update(&self, item: &Item) -> DbResult<usize> {
        let item = item.clone();
        let id = item.id;
        let changed = self
            .db
            .write("item_update", move |conn| {
                let changed = conn.execute(
                    "UPDATE items
                     SET
                        name = ?1,
                        price = ?2,
                        quantity = ?3
                     WHERE id = ?4;",
                    params![item.name.as_str(), item.price, item.quantity, item.id],
                )?;
                Ok((changed, changed))
            })
            .await?;

        debug!("event=item_update module=dao status=ok id={id} rows={changed}");
        Ok(changed)
    }

    /// Removes the row with the same identity as `item`.
    ///
    /// Returns the number of rows removed (`0` or `1`).
    pub async fn delete(&self, item: &Item) -> DbResult<usize> {
        let id = item.id;
        let changed = self
            .db
            .write("item_delete", move |conn| {
                let changed = conn.execute("DELETE FROM items WHERE id = ?1;", [id])?;
                Ok((changed, changed))
            })
            .await?;

        debug!("event=item_delete module=dao status=ok id={id} rows={changed}");
        Ok(changed)
    }

    /// Live value of the item with `id`; `None` while no such row exists.
    pub fn get_item(&self, id: ItemId) -> LiveQuery<Option<Item>> {
        observe(Arc::clone(&self.db), "item_get", move |conn| find_item(conn, id))
    }

    /// Live list of all items sorted by name.
    pub fn get_all_items(&self) -> LiveQuery<Vec<Item>> {
        observe(Arc::clone(&self.db), "item_list", list_items)
    }
}

fn insert_item(conn: &Connection, item: &Item) -> DbResult<Option<ItemId>> {
    let id = item.has_assigned_id().then_some(item.id);
    let changed = conn.execute(
        "INSERT INTO items (id, name, price, quantity)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(id) DO NOTHING;",
        params![id, item.name.as_str(), item.price, item.quantity],
    )?;

    if changed == 0 {
        return Ok(None);
    }
    Ok(Some(id.unwrap_or_else(|| conn.last_insert_rowid())))
}

fn find_item(conn: &Connection, id: ItemId) -> DbResult<Option<Item>> {
    let item = conn
        .query_row(
            &format!("{ITEM_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_item_row,
        )
        .optional()?;
    Ok(item)
}

fn list_items(conn: &Connection) -> DbResult<Vec<Item>> {
    let mut stmt =
        conn.prepare_cached(&format!("{ITEM_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
    let items = stmt
        .query_map([], parse_item_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(items)
}

fn parse_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        name: row.get("name")?,
        price: row.get("price")?,
        quantity: row.get("quantity")?,
    })
}
