//! Logging setup for the daemon and the one-shot CLI.

use crate::XsnapError;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::{
    fmt::{self, time::UtcTime, writer::MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// How the process reports on itself. The default is a quiet compact stream
/// on stdout; `--verbose` swaps in [`LogConfig::development`] and the
/// `XSNAP_LOG_*` variables override single fields. A set `RUST_LOG` wins over
/// all of it.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Highest level this crate emits
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Annotate events with source file and line
    pub include_source: bool,
    pub include_thread_names: bool,
}

/// Event rendering styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line output for reading at a terminal
    Pretty,
    /// One event per line, the daemon default
    Compact,
    /// JSON lines for log collectors
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Invalid log format: {other}")),
        }
    }
}

/// Where the stream goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    File(PathBuf),
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            include_source: false,
            include_thread_names: true,
        }
    }
}

impl LogConfig {
    /// Chatty preset for `--verbose` and local debugging
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Pretty,
            output: LogOutput::Stdout,
            include_source: true,
            include_thread_names: true,
        }
    }

    /// The default configuration with `XSNAP_LOG_LEVEL`, `XSNAP_LOG_FORMAT`,
    /// `XSNAP_LOG_OUTPUT`, `XSNAP_LOG_FILE` and `XSNAP_LOG_SOURCE` applied on
    /// top. Unparseable values are ignored rather than fatal.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(level) = env_parse::<Level>("XSNAP_LOG_LEVEL") {
            config.level = level;
        }
        if let Some(format) = env_parse::<LogFormat>("XSNAP_LOG_FORMAT") {
            config.format = format;
        }

        // XSNAP_LOG_FILE alone selects file output; XSNAP_LOG_OUTPUT=file
        // without a path falls back to the state directory.
        let wants_file = std::env::var("XSNAP_LOG_OUTPUT")
            .map(|value| value.eq_ignore_ascii_case("file"))
            .unwrap_or(false);
        match std::env::var("XSNAP_LOG_FILE") {
            Ok(path) => config.output = LogOutput::File(PathBuf::from(path)),
            Err(_) if wants_file => config.output = LogOutput::File(default_log_path()),
            Err(_) => {}
        }

        if let Ok(flag) = std::env::var("XSNAP_LOG_SOURCE") {
            config.include_source = flag.eq_ignore_ascii_case("true");
        }

        config
    }
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

fn default_log_path() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("xsnap")
        .join("xsnap.log")
}

/// Installs the global subscriber. Call once at startup, before anything logs.
pub fn init_logging(config: &LogConfig) -> crate::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xsnap={}", config.level)));

    let layer = match &config.output {
        LogOutput::Stdout => event_layer(config, std::io::stdout),
        LogOutput::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|err| {
                    XsnapError::ConfigurationError(format!(
                        "cannot open log file {}: {err}",
                        path.display()
                    ))
                })?;
            event_layer(config, file)
        }
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();

    info!("Logging initialized: {:?}", config);
    Ok(())
}

/// One fmt layer over any writer; the format picks the concrete event
/// encoder, so the result is boxed.
fn event_layer<W>(config: &LogConfig, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_timer(UtcTime::rfc_3339())
        .with_thread_names(config.include_thread_names)
        .with_file(config.include_source)
        .with_line_number(config.include_source);

    match config.format {
        LogFormat::Pretty => Box::new(base.pretty()),
        LogFormat::Compact => Box::new(base.compact()),
        LogFormat::Json => Box::new(base.json()),
    }
}
