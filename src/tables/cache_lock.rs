use super::TableError;
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Log target for `cache_lock`
const LOG_TARGET: &str = "     cache";

/// Guard that releases a table's cache lock when dropped
#[derive(Debug)]
pub struct TableLockGuard(File);

impl Drop for TableLockGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.unlock() {
            log::warn!(target: LOG_TARGET, "Could not unlock table cache: {e:#}");
        }
    }
}

/// Acquire the exclusive lock that serializes downloading `table` into `cache_dir`.
///
/// Two processes sharing a cache directory never write the same table file at
/// the same time. Blocks until the lock is available.
pub async fn acquire_table_lock(cache_dir: &Path, table: &str) -> Result<TableLockGuard, TableError> {
    let lock_path = cache_dir.join(format!("{table}.csv.lock"));

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|source| TableError::CacheWrite {
            path: lock_path.clone(),
            source,
        })?;

    let blocking_path = lock_path.clone();
    let file = tokio::task::spawn_blocking(move || {
        file.lock_exclusive()?;
        log::debug!(target: LOG_TARGET, "Acquired table lock at '{}'", blocking_path.display());
        Ok::<_, io::Error>(file)
    })
    .await
    .map_err(io::Error::other)
    .and_then(|result| result)
    .map_err(|source| TableError::CacheWrite { path: lock_path, source })?;

    Ok(TableLockGuard(file))
}
