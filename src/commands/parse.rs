use super::common::{CommonArgs, LogLevel, Settings};
use super::{Host, ProgressReporter};
use crate::Result;
use crate::output::{ChunkWriter, write_summary};
use crate::parsers::{DEFAULT_PATCH, Generator, GeneratorOptions};
use crate::progress::Progress;
use crate::tables::{TableRegistry, TableStore};
use clap::Parser;
use ohno::IntoAppError;
use std::io::{IsTerminal, Write, stderr};

/// Log target for the parse command
const LOG_TARGET: &str = "     parse";

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Generator to run (see `csv-wiki list`)
    #[arg(value_name = "GENERATOR")]
    pub generator: Generator,

    /// Game patch the pages are generated for
    #[arg(long, value_name = "PATCH", default_value = DEFAULT_PATCH)]
    pub patch: String,

    /// Emit edit links instead of pywikibot page markers
    #[arg(long)]
    pub no_bot: bool,

    /// Records per output file, 0 for a single file (default depends on the generator)
    #[arg(long, value_name = "COUNT")]
    pub chunk_size: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run a generator end to end, reporting any failure on the host's error stream.
pub async fn process_parse<H: Host>(host: &mut H, args: &ParseArgs) -> Result<()> {
    args.common.log_level.init_logging();

    match parse_inner(host, args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = writeln!(host.error(), "error: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

async fn parse_inner<H: Host>(host: &mut H, args: &ParseArgs) -> Result<()> {
    let settings = Settings::resolve(&args.common)?;

    let store = TableStore::new(settings.cache_dir.as_std_path(), settings.source_url.as_str(), settings.fetch_timeout)?;
    let mut registry = TableRegistry::new(store);

    let show_progress = args.common.log_level == LogLevel::None && stderr().is_terminal();
    let progress = ProgressReporter::new(show_progress, args.common.color.for_stderr());

    let options = GeneratorOptions {
        patch: args.patch.clone(),
        bot: !args.no_bot,
    };

    log::info!(target: LOG_TARGET, "Running generator {} for patch {}", args.generator, options.patch);

    let generated = args.generator.generate(&mut registry, &options, &progress).await;
    progress.done();
    let document = generated.into_app_err_with(|| format!("generator {} failed", args.generator))?;

    log::info!(target: LOG_TARGET, "Loaded {} tables", registry.len());

    let chunk_size = args.chunk_size.unwrap_or(document.chunk_size);
    let writer = ChunkWriter::new(settings.output_dir.as_std_path());
    let chunks = writer.save(&document.filename, &document.records, chunk_size)?;

    let mut summary = String::new();
    write_summary(&chunks, args.common.color.for_stdout(), &mut summary)?;
    let _ = write!(host.output(), "{summary}");

    Ok(())
}
