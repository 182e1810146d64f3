//! Process-wide memoization of index values.
//!
//! `DashMap` keyed by series id; entries are overwritten on refresh and
//! never evicted — the key space is the five CPI series. Concurrent
//! requests racing on the same stale key may each fetch; last writer wins
//! on an idempotent value, so no single-flight lock is taken.

use std::time::{Duration, Instant};

use bls_client::BlsClient;
use dashmap::DashMap;
use tracing::{debug, warn};

/// A cached observation. `value` is `None` when the last fetch failed or
/// the series carried no data, so unavailability is never confused with a
/// real reading of zero.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    pub value: Option<f64>,
    pub fetched_at: Instant,
}

impl IndexEntry {
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.fetched_at.elapsed() < window
    }
}

/// Time-boxed memo of the latest value per series.
#[derive(Debug)]
pub struct IndexCache {
    entries: DashMap<String, IndexEntry>,
    fresh_window: Duration,
}

impl IndexCache {
    pub fn new(fresh_window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            fresh_window,
        }
    }

    /// Latest value for a series, fetching through `client` only when no
    /// fresh entry exists. Failures are stored as `None` with a fresh
    /// timestamp so a dead upstream is not hammered for the rest of the
    /// window.
    pub async fn get_latest(&self, client: &BlsClient, series_id: &str) -> Option<f64> {
        if let Some(entry) = self.entries.get(series_id) {
            if entry.is_fresh(self.fresh_window) {
                debug!("Index cache hit for {}", series_id);
                return entry.value;
            }
        }

        let value = match client.latest_value(series_id).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Index fetch failed for {}: {}", series_id, e);
                None
            }
        };

        self.entries.insert(
            series_id.to_string(),
            IndexEntry {
                value,
                fetched_at: Instant::now(),
            },
        );

        value
    }

    /// Seed an entry directly (tests).
    pub fn insert(&self, series_id: impl Into<String>, entry: IndexEntry) {
        self.entries.insert(series_id.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
