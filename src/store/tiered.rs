//! Tiered storage for the rate table.
//!
//! Reads prefer the freshly pushed file, then the saved snapshot, then an
//! empty table; they never fail. Updates are merged into whatever a read
//! would return and written to the saved snapshot only. A pushed file is
//! never touched by updates, so while one exists it wins every read.
//!
//! Every operation runs under one lock so a load-merge-persist sequence
//! cannot interleave with another, and snapshot writes go through a rename
//! so readers never see a partial file.

use crate::core::table::RateTable;
use crate::store::{StoreError, StorePaths, disk};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub struct RateStore {
    paths: StorePaths,
    lock: Mutex<()>,
}

impl RateStore {
    pub fn new(paths: StorePaths) -> Self {
        RateStore {
            paths,
            lock: Mutex::new(()),
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    #[instrument(name = "RatesLoad", skip(self))]
    pub async fn load(&self) -> RateTable {
        let _guard = self.lock.lock().await;
        self.load_locked().await
    }

    /// Merges `incoming` into the current table and persists the result.
    ///
    /// Returns the merged table. Only the final snapshot write can fail.
    #[instrument(name = "RatesUpdate", skip(self, incoming), fields(bases = incoming.len()))]
    pub async fn apply_update(&self, incoming: RateTable) -> Result<RateTable, StoreError> {
        let _guard = self.lock.lock().await;
        let merged = self.load_locked().await.merge(incoming);
        disk::write_table(&self.paths.saved_rates_file, &merged).await?;
        info!(bases = merged.len(), "Saved merged rates");
        Ok(merged)
    }

    /// Writes `table` as the saved snapshot unless one already exists.
    ///
    /// Returns whether anything was written.
    pub async fn seed(&self, table: &RateTable) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let saved = &self.paths.saved_rates_file;
        if fs::try_exists(saved).await.unwrap_or(false) {
            debug!(path = %saved.display(), "Snapshot exists, not seeding");
            return Ok(false);
        }
        disk::write_table(saved, table).await?;
        info!(path = %saved.display(), bases = table.len(), "Seeded rates snapshot");
        Ok(true)
    }

    async fn load_locked(&self) -> RateTable {
        let pushed = &self.paths.new_rates_file;
        match disk::read_table(pushed).await {
            Ok(Some(table)) => {
                info!(path = %pushed.display(), "Loaded pushed rates");
                if let Err(e) = disk::write_table(&self.paths.saved_rates_file, &table).await {
                    warn!(error = %e, "Could not save pushed rates to snapshot");
                }
                return table;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring pushed rates"),
        }

        let saved = &self.paths.saved_rates_file;
        match disk::read_table(saved).await {
            Ok(Some(table)) => {
                info!(path = %saved.display(), "Loaded saved rates");
                return table;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Ignoring saved rates"),
        }

        debug!("No usable rates file, serving an empty table");
        RateTable::new()
    }
}
