//! Change notification for the `items` table.
//!
//! # Responsibility
//! - Count committed writes that changed at least one row.
//! - Wake live queries so they can re-read their snapshot.
//!
//! # Invariants
//! - The version only grows (wrapping on overflow).
//! - A fresh subscription has already observed the current version.

use log::trace;
use tokio::sync::watch;

/// Version counter over the `items` table, backed by a `watch` channel.
#[derive(Debug)]
pub struct InvalidationTracker {
    version: watch::Sender<u64>,
}

impl InvalidationTracker {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0);
        Self { version }
    }

    /// Records that a write changed the table.
    ///
    /// Works with zero subscribers; the value is kept for later ones.
    pub fn invalidate(&self) {
        self.version.send_modify(|version| *version = version.wrapping_add(1));
        trace!(
            "event=items_invalidated module=db status=ok version={} subscribers={}",
            self.version(),
            self.subscriber_count()
        );
    }

    /// Registers interest in future invalidations.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub fn subscriber_count(&self) -> usize {
        self.version.receiver_count()
    }
}

impl Default for InvalidationTracker {
    fn default() -> Self {
        Self::new()
    }
}
