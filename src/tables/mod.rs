//! Reference tables: download, cache, parse, and look up rows.
//!
//! # Architecture Overview
//!
//! Game data is published as one CSV file per table. A [`TableStore`] turns a
//! table name into raw CSV bytes: it reads `<cache>/<name>.csv` if present and
//! otherwise downloads the file once from the configured URL template and
//! saves it there. [`Table::parse`] builds the in-memory [`Table`], whose rows
//! are addressed by their 0-based position. A [`TableRegistry`] sits on top and
//! makes sure each table is fetched and parsed at most once per run.
//!
//! Rows refer to rows of other tables by position. [`resolve`] and
//! [`resolve_chain`] follow those references; [`link_name`] decorates the
//! resolved names inside free text.
//!
//! # Cache Layout
//!
//! ```text
//! <cache>/
//!   Item.csv            raw download, the only file ever read back
//!   Item.csv.columns    pretty JSON list of column names
//!   Item.csv.offsets    pretty JSON map of row id -> byte offset in Item.csv
//!   Item.csv.data       pretty JSON array of all rows
//!   Item.csv.lock       advisory lock held while downloading Item
//! ```

mod cache_lock;
mod error;
mod registry;
mod resolve;
mod row;
mod store;
mod table;

pub use error::TableError;
pub use registry::{TableProvider, TableRegistry};
pub use resolve::{link_name, resolve, resolve_chain};
pub use row::Row;
pub use store::{CONTENT_TOKEN, DEFAULT_FETCH_TIMEOUT, TableStore};
pub use table::Table;
