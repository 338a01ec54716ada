use super::{Table, TableError, TableStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Log target for the table registry
const LOG_TARGET: &str = "    tables";

/// Something that can hand out parsed tables by name.
///
/// Document generators depend on this rather than on [`TableRegistry`] so they
/// can be driven by in-memory tables in tests.
pub trait TableProvider {
    /// Returns the table called `name`, loading it on first use.
    fn table(&mut self, name: &str) -> impl Future<Output = Result<Arc<Table>, TableError>> + Send;
}

/// Per-run memo of parsed tables.
///
/// The first request for a name fetches and parses the table and writes the
/// debug artifacts; every later request returns the same [`Arc`]. Tables are
/// never evicted or refreshed for the lifetime of the registry.
#[derive(Debug)]
pub struct TableRegistry {
    store: TableStore,
    tables: HashMap<String, Arc<Table>>,
}

impl TableRegistry {
    #[must_use]
    pub fn new(store: TableStore) -> Self {
        Self {
            store,
            tables: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn store(&self) -> &TableStore {
        &self.store
    }

    /// Number of tables loaded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub async fn get(&mut self, name: &str) -> Result<Arc<Table>, TableError> {
        if let Some(table) = self.tables.get(name) {
            return Ok(Arc::clone(table));
        }

        let start = Instant::now();
        log::debug!(target: LOG_TARGET, "Opening table '{name}'");

        let raw = self.store.fetch(name).await?;
        let table = Table::parse(name, &raw)?;
        table.write_artifacts(&self.store.cache_path(name))?;

        let table = Arc::new(table);
        let _ = self.tables.insert(name.to_string(), Arc::clone(&table));

        log::debug!(
            target: LOG_TARGET,
            "Finished opening table '{name}' ({} rows) in {:.3}s",
            table.total(),
            start.elapsed().as_secs_f64()
        );

        Ok(table)
    }
}

impl TableProvider for TableRegistry {
    async fn table(&mut self, name: &str) -> Result<Arc<Table>, TableError> {
        self.get(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;
    use std::fs;

    fn registry_with(files: &[(&str, &str)]) -> (tempfile::TempDir, TableRegistry) {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        for (name, contents) in files {
            fs::write(temp_dir.path().join(format!("{name}.csv")), contents).unwrap();
        }

        let store = TableStore::new(temp_dir.path(), "not a url {content}", Duration::from_secs(5)).unwrap();
        (temp_dir, TableRegistry::new(store))
    }

    #[tokio::test]
    async fn test_get_returns_same_instance() {
        let (_temp_dir, mut registry) = registry_with(&[("Item", "Name\nNothing\nPotion\n")]);

        let first = registry.get("Item").await.unwrap();
        let second = registry.get("Item").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_get_ignores_cache_changes_within_run() {
        let (temp_dir, mut registry) = registry_with(&[("Item", "Name\nPotion\n")]);

        let first = registry.get("Item").await.unwrap();
        fs::write(temp_dir.path().join("Item.csv"), "Name\nEther\n").unwrap();
        let second = registry.get("Item").await.unwrap();

        assert_eq!(second.at(0).unwrap().get("Name"), Some("Potion"));
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_get_writes_debug_artifacts() {
        let (temp_dir, mut registry) = registry_with(&[("Quest", "Name\nOn to Vesper Bay\n")]);

        let _ = registry.get("Quest").await.unwrap();

        for suffix in ["columns", "offsets", "data"] {
            assert!(temp_dir.path().join(format!("Quest.csv.{suffix}")).exists(), "missing .{suffix}");
        }
    }

    #[tokio::test]
    async fn test_get_propagates_fetch_failure() {
        let (_temp_dir, mut registry) = registry_with(&[]);

        let err = registry.get("Missing").await.unwrap_err();
        assert!(matches!(err, TableError::RemoteFetch { .. }));
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_provider_trait_delegates_to_get() {
        let (_temp_dir, mut registry) = registry_with(&[("Title", "Masculine,Feminine\n,\n")]);

        let via_trait = registry.table("Title").await.unwrap();
        let direct = registry.get("Title").await.unwrap();
        assert!(Arc::ptr_eq(&via_trait, &direct));
    }
}
