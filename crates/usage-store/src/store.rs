//! Per-address usage storage with optional JSON-file persistence.

use crate::error::StoreError;
use crate::types::{UsageRecord, UsageUpdate};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Usage record store.
///
/// The live map is held in memory; every successful mutation is
/// snapshotted to the backing file (when one is configured) with an
/// atomic temp-file-then-rename write. There is no locking across a
/// read-then-write sequence: concurrent requests for the same address
/// can both observe pre-update state.
#[derive(Clone)]
pub struct UsageStore {
    records: Arc<RwLock<HashMap<String, UsageRecord>>>,
    path: Option<PathBuf>,
}

impl UsageStore {
    /// Create an in-memory store with no persistence.
    pub fn memory() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            path: None,
        }
    }

    /// Open a file-backed store, loading the existing snapshot if present.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let records = if path.exists() {
            let bytes = fs::read(&path).await?;
            let records: HashMap<String, UsageRecord> = serde_json::from_slice(&bytes)?;
            info!("Loaded usage store with {} records from {:?}", records.len(), path);
            records
        } else {
            info!("Usage store not found at {:?}, starting fresh", path);
            HashMap::new()
        };

        Ok(Self {
            records: Arc::new(RwLock::new(records)),
            path: Some(path),
        })
    }

    /// Get the record for an address, if one exists.
    #[instrument(skip(self))]
    pub async fn find_one(&self, address: &str) -> Option<UsageRecord> {
        let records = self.records.read().await;
        records.get(address).cloned()
    }

    /// Insert a record for a previously unseen address.
    #[instrument(skip(self, record), fields(address = %record.address))]
    pub async fn insert(&self, record: UsageRecord) -> Result<(), StoreError> {
        {
            let mut records = self.records.write().await;
            records.insert(record.address.clone(), record);
        }
        self.persist().await
    }

    /// Apply a partial update to an existing record.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        address: &str,
        update: UsageUpdate,
    ) -> Result<UsageRecord, StoreError> {
        let updated = {
            let mut records = self.records.write().await;
            let record = records
                .get_mut(address)
                .ok_or_else(|| StoreError::NotFound(address.to_string()))?;

            record.holding = update.holding;
            record.usage = update.usage;
            if let Some(timestamp) = update.timestamp {
                record.timestamp = timestamp;
            }
            record.clone()
        };

        self.persist().await?;
        Ok(updated)
    }

    /// List every stored record, in the map's natural iteration order.
    pub async fn find_all(&self) -> Vec<UsageRecord> {
        let records = self.records.read().await;
        records.values().cloned().collect()
    }

    /// Get the number of stored records.
    pub async fn count(&self) -> usize {
        let records = self.records.read().await;
        records.len()
    }

    /// Snapshot the map to the backing file, if one is configured.
    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let snapshot = {
            let records = self.records.read().await;
            records.clone()
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Atomic write
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, path).await?;

        debug!("Saved usage store ({} bytes) to {:?}", bytes.len(), path);

        Ok(())
    }
}
