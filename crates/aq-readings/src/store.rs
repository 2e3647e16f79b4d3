//! Reading storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// One voltage sample from a field sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub sensor_id: String,
    pub voltage: f64,
    pub timestamp: DateTime<Utc>,
}

/// Append-only reading storage behind a shared-secret credential.
pub trait ReadingStore {
    /// Store one reading. Fails with [`StoreError::Unauthorized`] on a
    /// bad credential and [`StoreError::MissingField`] on an empty
    /// sensor id.
    fn append(&mut self, reading: Reading, credential: &str) -> StoreResult<()>;

    /// Readings with `from <= timestamp < to`, ascending by timestamp.
    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Reading>;

    /// All readings, descending by timestamp (newest first).
    fn all_descending(&self) -> Vec<Reading>;

    /// Delete readings with `voltage < threshold` and
    /// `from <= timestamp < to`, returning how many were removed.
    ///
    /// Sensor maintenance leaves stretches of implausibly low voltage;
    /// this clears them without touching readings outside the window.
    fn prune_below(
        &mut self,
        threshold: f64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        credential: &str,
    ) -> StoreResult<usize>;
}

/// In-process store. Readings live in insertion order; queries sort.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    secret: String,
    readings: Vec<Reading>,
}

impl MemoryStore {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            readings: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl ReadingStore for MemoryStore {
    fn append(&mut self, reading: Reading, credential: &str) -> StoreResult<()> {
        if credential != self.secret {
            warn!(sensor_id = %reading.sensor_id, "unauthorized append rejected");
            return Err(StoreError::Unauthorized);
        }
        if reading.sensor_id.is_empty() {
            return Err(StoreError::MissingField { field: "sensor_id" });
        }
        debug!(sensor_id = %reading.sensor_id, voltage = reading.voltage, "reading stored");
        self.readings.push(reading);
        Ok(())
    }

    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Reading> {
        let mut rows: Vec<Reading> = self
            .readings
            .iter()
            .filter(|r| r.timestamp >= from && r.timestamp < to)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.timestamp);
        rows
    }

    fn all_descending(&self) -> Vec<Reading> {
        let mut rows = self.readings.clone();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows
    }

    fn prune_below(
        &mut self,
        threshold: f64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        credential: &str,
    ) -> StoreResult<usize> {
        if credential != self.secret {
            warn!("unauthorized prune rejected");
            return Err(StoreError::Unauthorized);
        }
        let before = self.readings.len();
        self.readings
            .retain(|r| r.voltage >= threshold || r.timestamp < from || r.timestamp >= to);
        let removed = before - self.readings.len();
        debug!(removed, threshold, "low-voltage readings pruned");
        Ok(removed)
    }
}
