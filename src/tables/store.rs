use super::TableError;
use super::cache_lock::acquire_table_lock;
use super::table::with_suffix;
use crate::Result;
use bytes::Bytes;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

/// Log target for the table store
const LOG_TARGET: &str = "     cache";

/// Token in the source URL template that is replaced by the table name.
pub const CONTENT_TOKEN: &str = "{content}";

/// Default upper bound for a single table download.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5 * 60);

/// Retrieves raw CSV bytes for named tables, downloading each table at most once.
///
/// `<cache_root>/<table>.csv` is the source of truth: if it exists it is
/// returned as-is and the network is never touched.
#[derive(Debug, Clone)]
pub struct TableStore {
    cache_root: PathBuf,
    source_template: String,
    client: reqwest::Client,
}

impl TableStore {
    /// Create a store caching into `cache_root` and downloading from `source_template`.
    pub fn new(cache_root: impl Into<PathBuf>, source_template: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("csv-wiki/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            cache_root: cache_root.into(),
            source_template: source_template.into(),
            client,
        })
    }

    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Location of the cached CSV for `table`.
    #[must_use]
    pub fn cache_path(&self, table: &str) -> PathBuf {
        self.cache_root.join(format!("{}.csv", cache_file_stem(table)))
    }

    /// URL the table is downloaded from when it is not cached.
    #[must_use]
    pub fn source_url(&self, table: &str) -> String {
        self.source_template.replace(CONTENT_TOKEN, table)
    }

    /// Return the raw bytes of `table`, downloading and caching them first if needed.
    pub async fn fetch(&self, table: &str) -> Result<Bytes, TableError> {
        let path = self.cache_path(table);
        if let Some(bytes) = read_cached(&path)? {
            log::debug!(target: LOG_TARGET, "Cache hit for table '{table}' at {}", path.display());
            return Ok(bytes);
        }

        fs::create_dir_all(&self.cache_root).map_err(|source| TableError::CacheWrite {
            path: self.cache_root.clone(),
            source,
        })?;

        let _guard = acquire_table_lock(&self.cache_root, &cache_file_stem(table)).await?;

        // another process may have finished the download while we waited for the lock
        if let Some(bytes) = read_cached(&path)? {
            log::debug!(target: LOG_TARGET, "Table '{table}' was cached by another process while waiting for the lock");
            return Ok(bytes);
        }

        let bytes = self.download(table).await?;
        persist(&path, &bytes)?;

        Ok(bytes)
    }

    async fn download(&self, table: &str) -> Result<Bytes, TableError> {
        let url_text = self.source_url(table);
        let fail = |reason: String| TableError::RemoteFetch {
            table: table.to_string(),
            url: url_text.clone(),
            reason,
        };

        let url = Url::parse(&url_text).map_err(|e| fail(format!("invalid URL: {e}")))?;

        log::info!(target: LOG_TARGET, "Downloading '{table}.csv' for the first time from {url}");

        let response = self.client.get(url).send().await.map_err(|e| fail(e.to_string()))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| fail(e.to_string()))?;
        if bytes.is_empty() {
            return Err(fail("the server returned no content".to_string()));
        }

        log::info!(target: LOG_TARGET, "Download complete: '{table}.csv' ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

fn read_cached(path: &Path) -> Result<Option<Bytes>, TableError> {
    match fs::read(path) {
        Ok(data) => Ok(Some(Bytes::from(data))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(TableError::CacheRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write to a sibling file first so a reader never sees a half-written cache file.
fn persist(path: &Path, bytes: &[u8]) -> Result<(), TableError> {
    let partial = with_suffix(path, ".partial");

    fs::write(&partial, bytes).map_err(|source| TableError::CacheWrite {
        path: partial.clone(),
        source,
    })?;

    fs::rename(&partial, path).map_err(|source| TableError::CacheWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Table names go into file names; keep separators and traversal out of them.
fn cache_file_stem(table: &str) -> String {
    table.replace("..", "__").replace(['/', '\\', ':'], "_")
}
