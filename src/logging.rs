//! Log initialization.
//!
//! Progress and diagnostics are `tracing` events written to stderr, so the
//! rendered entities can go to stdout untouched.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    Layer, filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log output format
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single line per event, no timestamps
    #[default]
    Compact,
    /// Multi-line, colored
    Pretty,
    /// One JSON object per event
    Json,
}

/// `-q` keeps errors only, each `-v` adds a level above INFO.
pub fn level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber. Calling it twice keeps the first one.
pub fn init(level: LevelFilter, format: LogFormat) {
    let targets = Targets::new().with_default(level);

    let stderr_layer =
        create_format_layer(format, io::stderr().is_terminal(), io::stderr).with_filter(targets);

    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}

fn create_format_layer<W, F>(
    format: LogFormat,
    ansi: bool,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + Send + Sync + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_ansi(ansi)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_ansi(ansi)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
