// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::Connection;

use crate::db;
use crate::store::Store;
use crate::sync::Mirror;

/// Single owner of the in-memory state and its collaborators. All command
/// handlers mutate through here: mutate the store, then `commit()`.
///
/// Pushes to the mirror are gated on the one-shot initial remote load having
/// finished, so a local mutation can never overwrite freshly-loaded remote
/// state with a stale default.
pub struct Session {
    pub conn: Connection,
    pub store: Store,
    mirror: Option<Mirror>,
    ready: bool,
}

impl Session {
    pub fn new(conn: Connection, store: Store, mirror: Option<Mirror>) -> Self {
        Self {
            conn,
            store,
            mirror,
            ready: false,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mirror(&self) -> Option<&Mirror> {
        self.mirror.as_ref()
    }

    /// One-shot initial load: if the mirror holds a non-empty ledger, it
    /// replaces local state (last-writer-wins) and is persisted locally.
    /// Opens the push gate whether or not the fetch succeeded.
    pub fn init_remote(&mut self) {
        if let Some(mirror) = &self.mirror {
            match mirror.fetch_latest() {
                Ok(Some(entries)) => {
                    tracing::info!(count = entries.len(), "adopting remote ledger");
                    self.store.replace_ledger(entries);
                    if let Err(err) = db::save_store(&mut self.conn, &self.store) {
                        tracing::warn!(%err, "failed to persist remote ledger locally");
                    }
                }
                Ok(None) => {}
                Err(err) => tracing::warn!(%err, "initial remote load failed"),
            }
        }
        self.ready = true;
    }

    /// Persist the snapshot and mirror the ledger. Neither failure rolls the
    /// local mutation back; both degrade to a logged warning.
    pub fn commit(&mut self) {
        if let Err(err) = db::save_store(&mut self.conn, &self.store) {
            tracing::warn!(%err, "local snapshot write failed");
        }
        if !self.ready {
            return;
        }
        if let Some(mirror) = &self.mirror {
            if !self.store.ledger.is_empty() {
                if let Err(err) = mirror.push(&self.store.ledger) {
                    tracing::warn!(%err, "remote mirror push failed");
                }
            }
        }
    }
}
