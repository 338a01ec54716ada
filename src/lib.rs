#![doc(hidden)]

//! Core library for csv-wiki
//!
//! csv-wiki downloads game-data CSV tables, caches them on disk, follows the
//! integer references between their rows, and renders the result into wiki
//! page text.
//!
//! # Module Organization
//!
//! - [`tables`]: Table download, cache, parsing, lookup, and cross-table resolution
//! - [`render`]: Placeholder templates and text normalization
//! - [`parsers`]: Document generators that turn tables into pages
//! - [`output`]: Chunked output files and the run summary
//! - [`progress`]: Progress reporting seam
//! - [`commands`]: Command-line interface and orchestration

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod output;
pub mod parsers;
pub mod progress;
pub mod render;
pub mod tables;

pub use crate::commands::{Host, run};
