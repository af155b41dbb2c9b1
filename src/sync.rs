// Copyright (c) 2025 WealthTrack.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Optional remote mirror: an append-only log of full ledger snapshots.
//! Every record wraps the serialized ledger in a `content` field. There is
//! no merge and no retry; the newest record wins on load, and push failures
//! are the caller's to log and ignore.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::LedgerEntry;
use crate::utils::http_client;

#[derive(Debug, Serialize, Deserialize)]
struct RemoteRecord {
    content: String,
}

pub struct Mirror {
    base: String,
    client: reqwest::blocking::Client,
}

impl Mirror {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base: base_url.trim_end_matches('/').to_string(),
            client: http_client()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Fetch the single most recently written record. `None` when the log is
    /// empty, the record is unparsable, or the stored ledger is empty.
    pub fn fetch_latest(&self) -> Result<Option<Vec<LedgerEntry>>> {
        let url = format!("{}/records/latest", self.base);
        let resp = self.client.get(url).send()?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let record: RemoteRecord = resp.error_for_status()?.json()?;
        match serde_json::from_str::<Vec<LedgerEntry>>(&record.content) {
            Ok(entries) if !entries.is_empty() => Ok(Some(entries)),
            Ok(_) => Ok(None),
            Err(err) => {
                tracing::warn!(%err, "unparsable remote ledger record, ignoring");
                Ok(None)
            }
        }
    }

    /// Append the current ledger as a new record.
    pub fn push(&self, ledger: &[LedgerEntry]) -> Result<()> {
        let url = format!("{}/records", self.base);
        let record = RemoteRecord {
            content: serde_json::to_string(ledger)?,
        };
        self.client
            .post(url)
            .json(&record)
            .send()?
            .error_for_status()?;
        Ok(())
    }
}
