//! Command dispatch logic for csv-wiki

use super::{InitArgs, ParseArgs, init_config, list_generators, process_parse};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "csv-wiki", version, author, long_about = None)]
#[command(about = "Turn game-data CSV tables into wiki pages")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CliSubcommand,
}

#[derive(Subcommand, Debug)]
enum CliSubcommand {
    /// Run a document generator and write its pages to the output directory
    Parse(Box<ParseArgs>),
    /// List the available document generators
    List,
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match Cli::parse_from(args).command {
        CliSubcommand::Parse(parse_args) => process_parse(host, &parse_args).await,
        CliSubcommand::List => {
            list_generators(host);
            Ok(())
        }
        CliSubcommand::Init(init_args) => init_config(host, &init_args),
    }
}
