//! Durable mapping from [`PeriodKey`] to [`PeriodRecord`], held as a single
//! JSON object in one file. Every write replaces the whole file, so from the
//! caller's perspective a `put` or `delete` is a single atomic save.
//!
//! The read-modify-write in `put`/`delete` is last-writer-wins if two
//! processes ever share one store file. The data is single-user and local,
//! so that race is accepted rather than locked against.

use crate::error::Result;
use crate::schema::{PeriodKey, PeriodRecord, RawPeriodRecord};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// The entire persisted state: every period the user has touched, keyed by
/// month. `BTreeMap` keeps the keys in ascending (chronological) order.
pub type PeriodStoreBlob = BTreeMap<PeriodKey, PeriodRecord>;

pub struct PeriodStore {
    path: PathBuf,
}

impl PeriodStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and normalizes the whole blob. A missing, unreadable, or
    /// malformed file reads as "no data yet", never as an error: the store
    /// is a user-local cache, not a source of truth worth failing over.
    pub fn load_all(&self) -> PeriodStoreBlob {
        self.load_raw()
            .into_iter()
            .map(|(key, raw)| (key, raw.normalize()))
            .collect()
    }

    fn load_raw(&self) -> BTreeMap<PeriodKey, RawPeriodRecord> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return BTreeMap::new(),
        };

        match serde_json::from_str(&text) {
            Ok(blob) => blob,
            Err(err) => {
                warn!(
                    "Discarding malformed store file {}: {}",
                    self.path.display(),
                    err
                );
                BTreeMap::new()
            }
        }
    }

    /// Serializes and persists the entire blob in one write, always in the
    /// canonical shape.
    pub fn save_all(&self, blob: &PeriodStoreBlob) -> Result<()> {
        let text = serde_json::to_string_pretty(blob)?;
        fs::write(&self.path, text)?;
        debug!("Saved {} period(s) to {}", blob.len(), self.path.display());
        Ok(())
    }

    /// Returns the normalized record for `key`, or a fresh empty record if
    /// the period does not exist yet. The default is not persisted.
    pub fn get(&self, key: &str) -> PeriodRecord {
        self.load_all().remove(key).unwrap_or_default()
    }

    pub fn put(&self, key: &str, record: &PeriodRecord) -> Result<()> {
        let mut blob = self.load_all();
        blob.insert(key.to_string(), record.clone());
        self.save_all(&blob)
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let mut blob = self.load_all();
        blob.remove(key);
        self.save_all(&blob)
    }

    /// All stored period keys, ascending. Lexicographic order is
    /// chronological given the `"YYYY-MM"` key format.
    pub fn list_keys(&self) -> Vec<PeriodKey> {
        self.load_raw().into_keys().collect()
    }
}
