//! Command-line interface for csv-wiki
//!
//! # Commands
//!
//! - **parse**: run a document generator over the reference tables and write
//!   its pages to chunked files in the output directory
//! - **list**: show the available generators
//! - **init**: write the default configuration file
//!
//! # Execution Flow
//!
//! [`run`] parses the arguments with clap and routes to a handler. `parse`
//! resolves its settings from the optional `csv-wiki.toml` file, command-line
//! flags, and their environment variables, in increasing priority. It then
//! builds a [`TableRegistry`](crate::tables::TableRegistry) over a
//! [`TableStore`](crate::tables::TableStore), runs the generator, saves the
//! chunks, and prints a summary table.
//!
//! All console interaction goes through [`Host`], so a failing run reports its
//! error once on the host's error stream and asks the host to exit.

mod common;
mod config;
mod host;
mod init;
mod list;
mod parse;
mod progress_reporter;
mod run;

pub use common::{ColorMode, CommonArgs, LogLevel, Settings};
pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use list::list_generators;
pub use parse::{ParseArgs, process_parse};
pub use progress_reporter::ProgressReporter;
pub use run::run;
