//! Live query streams driven by table invalidation.
//!
//! # Responsibility
//! - Re-run a read query each time the `items` table is invalidated.
//! - Yield immutable snapshots to one subscriber.
//!
//! # Invariants
//! - The subscription is registered before the first read, so no write
//!   between subscribe and first emission is missed.
//! - Consecutive equal snapshots are collapsed into one emission.
//! - Dropping the stream unsubscribes it. The stream holds the engine, and
//!   with it the change sender, so it never ends on its own.

use crate::db::{DbResult, InventoryDatabase};
use futures_util::stream::{self, BoxStream, StreamExt};
use log::debug;
use rusqlite::Connection;
use std::sync::Arc;
use tokio::sync::watch;

/// Long-lived stream of query snapshots. Read failures are yielded in-band.
pub type LiveQuery<T> = BoxStream<'static, DbResult<T>>;

struct LiveQueryState<T, Q> {
    db: Arc<InventoryDatabase>,
    changes: watch::Receiver<u64>,
    query: Arc<Q>,
    label: &'static str,
    last: Option<T>,
    primed: bool,
}

/// Builds a lazy stream that emits `query`'s result now and after each change.
pub(crate) fn observe<T, Q>(
    db: Arc<InventoryDatabase>,
    label: &'static str,
    query: Q,
) -> LiveQuery<T>
where
    T: Clone + PartialEq + Send + 'static,
    Q: Fn(&Connection) -> DbResult<T> + Send + Sync + 'static,
{
    let changes = db.invalidation().subscribe();
    let state = LiveQueryState {
        db,
        changes,
        query: Arc::new(query),
        label,
        last: None,
        primed: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if state.primed {
                state.changes.changed().await.ok()?;
            } else {
                state.primed = true;
            }
            let version = *state.changes.borrow_and_update();

            let query = Arc::clone(&state.query);
            let result = state.db.run(state.label, move |conn| query(conn)).await;
            match result {
                Ok(snapshot) if state.last.as_ref() == Some(&snapshot) => continue,
                Ok(snapshot) => {
                    debug!(
                        "event=live_query_emit module=dao status=ok query={} version={}",
                        state.label, version
                    );
                    state.last = Some(snapshot.clone());
                    return Some((Ok(snapshot), state));
                }
                Err(err) => {
                    debug!(
                        "event=live_query_emit module=dao status=error query={} version={} error={}",
                        state.label, version, err
                    );
                    return Some((Err(err), state));
                }
            }
        }
    })
    .boxed()
}
