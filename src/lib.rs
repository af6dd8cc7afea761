//! Convert a bookmark export dump into an HTML or plain-text listing.
//!
//! The pipeline is strictly one pass: decode and normalize every record,
//! select, order and cap, then render the whole document in memory. Output
//! is written only after every stage succeeded.

pub mod args;
pub mod config;
pub mod error;
pub mod filter;
pub mod formatting;
mod help;
pub mod order;
pub mod record;
pub mod render;
pub mod shared;
pub mod timestamp;

use chrono::Utc;
use std::env;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::args::{Command, parse_args};
pub use crate::config::{Cap, Config, OutputFormat, StatusFilter, Window};
pub use crate::error::{DumpError, ErrorKind, MalformedInput};
use crate::filter::Selection;
use crate::formatting::FormatContext;
pub use crate::record::{Bookmark, Status};

/// Environment variable holding the `tracing` filter directive.
pub const LOG_ENV: &str = "POCKET_DUMP_LOG";

pub fn entry() -> Result<(), DumpError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let opts = match parse_args(args)? {
        Command::Help => {
            print!("{}", help::render());
            return Ok(());
        }
        Command::Version => {
            println!("pocket_dump {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    init_logging(opts.verbose);
    let config = Config::from_options(opts, Utc::now())?;
    run(&config)
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Read the configured input, convert it, and write the result.
pub fn run(config: &Config) -> Result<(), DumpError> {
    let input = read_input(config)?;

    let to_terminal = config.output.is_none() && io::stdout().is_terminal();
    let ctx = FormatContext::for_terminal(to_terminal);
    let width = if to_terminal { terminal_columns() } else { None };
    let document = convert_styled(&input, config, &ctx, width)?;

    write_output(config, &document)
}

/// Pure conversion of a dump into the output document.
pub fn convert(input: &[u8], config: &Config) -> Result<String, DumpError> {
    convert_styled(input, config, &FormatContext::new(false), None)
}

fn convert_styled(
    input: &[u8],
    config: &Config,
    ctx: &FormatContext,
    width: Option<usize>,
) -> Result<String, DumpError> {
    let bookmarks = record::decode(input)?;

    if config.range_only {
        let span = order::span(&bookmarks);
        return Ok(match config.format {
            OutputFormat::Html => render::html_range(span, &config.title),
            OutputFormat::Text => render::text_range(span),
        });
    }

    let selected = Selection::from_config(config).apply(bookmarks);
    let ordered = order::order(selected, config.reverse, config.cap);
    tracing::debug!(emitted = ordered.len(), "ordered and capped");

    Ok(match config.format {
        OutputFormat::Html => render::html_listing(&ordered, &config.title),
        OutputFormat::Text => render::text_listing(&ordered, ctx, width),
    })
}

fn read_input(config: &Config) -> Result<Vec<u8>, DumpError> {
    match &config.input {
        Some(path) => fs::read(path).map_err(|source| DumpError::Input {
            path: path.clone(),
            source,
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).map_err(|source| {
                DumpError::Input { path: PathBuf::from("<stdin>"), source }
            })?;
            Ok(buf)
        }
    }
}

fn write_output(config: &Config, document: &str) -> Result<(), DumpError> {
    match &config.output {
        Some(path) => {
            fs::write(path, document).map_err(|source| DumpError::Output {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), bytes = document.len(), "wrote output");
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(document.as_bytes())
                .and_then(|_| out.flush())
                .map_err(|source| DumpError::Output {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(())
}

pub(crate) fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize)
}
