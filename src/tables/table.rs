use super::TableError;
use super::row::{Columns, Row};
use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Log target for tables
const LOG_TARGET: &str = "    tables";

/// A parsed reference table with rows addressable by their 0-based position.
#[derive(Debug)]
pub struct Table {
    columns: Arc<Columns>,
    rows: Vec<Row>,
    offsets: Vec<u64>,
}

impl Table {
    /// Parses raw CSV bytes. The first record is the header.
    pub fn parse(name: &str, raw: &[u8]) -> Result<Self, TableError> {
        let parse_err = |source| TableError::Parse {
            table: name.to_string(),
            source,
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(raw);
        let names = reader.headers().map_err(parse_err)?.iter().map(str::to_string).collect();
        let columns = Arc::new(Columns::new(name, names));

        let mut rows = Vec::new();
        let mut offsets = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record).map_err(parse_err)? {
            offsets.push(record.position().map_or(0, csv::Position::byte));
            rows.push(Row::new(Arc::clone(&columns), record.iter().map(str::to_string).collect()));
        }

        log::debug!(target: LOG_TARGET, "Parsed table '{name}': {} columns, {} rows", columns.names().len(), rows.len());

        Ok(Self { columns, rows, offsets })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.columns.table()
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.columns.names()
    }

    /// Number of data rows.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row at position `id`.
    pub fn at(&self, id: u64) -> Result<&Row, TableError> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.rows.get(index))
            .ok_or_else(|| TableError::RowNotFound {
                table: self.name().to_string(),
                id,
                total: self.total(),
            })
    }

    /// Iterates over `(id, row)` in parse order.
    pub fn data(&self) -> impl ExactSizeIterator<Item = (u64, &Row)> {
        self.rows.iter().enumerate().map(|(index, row)| (index as u64, row))
    }

    /// Byte offset of each row within the raw CSV, indexed by row id.
    #[must_use]
    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }

    /// Writes the `.columns`, `.offsets`, and `.data` debug dumps next to `csv_path`.
    ///
    /// These files are for people inspecting the cache; nothing reads them back.
    pub fn write_artifacts(&self, csv_path: &Path) -> Result<(), TableError> {
        let offsets: BTreeMap<usize, u64> = self.offsets.iter().copied().enumerate().collect();
        let data: Vec<&Row> = self.rows.iter().collect();

        write_pretty_json(&with_suffix(csv_path, ".columns"), &self.column_names())?;
        write_pretty_json(&with_suffix(csv_path, ".offsets"), &offsets)?;
        write_pretty_json(&with_suffix(csv_path, ".data"), &data)?;

        log::debug!(target: LOG_TARGET, "Wrote debug artifacts for '{}' next to {}", self.name(), csv_path.display());
        Ok(())
    }
}

pub(super) fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(path.as_os_str());
    s.push(suffix);
    PathBuf::from(s)
}

fn write_pretty_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), TableError> {
    let write = || -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()
    };

    write().map_err(|source| TableError::CacheWrite {
        path: path.to_path_buf(),
        source,
    })
}
