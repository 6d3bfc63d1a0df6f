//! Structured logging setup.
//!
//! Library code only emits `tracing` events; nothing is printed until a
//! subscriber is installed, either by the host application or through
//! [`enable_logging`].

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Layer, Layered, SubscriberExt};
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

/// Filter used when neither an explicit level nor `LQP_TRACE` is given.
pub const DEFAULT_LEVEL: &str = "off";
pub const TRACE_ENV: &str = "LQP_TRACE";
pub const FORMAT_ENV: &str = "LQP_LOG_FORMAT";
pub const FILE_ENV: &str = "LQP_LOG_FILE";

/// Errors raised while installing the subscriber.
#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile(io::Error),
    Init(String),
}

impl LoggingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LoggingError::InvalidFilter(_) => "LOG_INVALID_FILTER",
            LoggingError::InvalidFormat(_) => "LOG_INVALID_FORMAT",
            LoggingError::LogFile(_) => "LOG_FILE",
            LoggingError::Init(_) => "LOG_INIT",
        }
    }
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::InvalidFilter(err) => {
                write!(f, "[{}] Invalid log filter: {}", self.code(), err)
            }
            LoggingError::InvalidFormat(format) => write!(
                f,
                "[{}] Invalid {FORMAT_ENV} '{}' (expected 'json' or 'pretty')",
                self.code(),
                format
            ),
            LoggingError::LogFile(err) => {
                write!(f, "[{}] Failed to open log file: {}", self.code(), err)
            }
            LoggingError::Init(err) => {
                write!(f, "[{}] Failed to initialize logging: {}", self.code(), err)
            }
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::LogFile(err) => Some(err),
            _ => None,
        }
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::LogFile)
}

fn map_init_err<E: std::fmt::Display>(err: E) -> LoggingError {
    LoggingError::Init(err.to_string())
}

/// Build the event filter from `level`, falling back to `LQP_TRACE`, then `off`.
pub fn resolve_filter(level: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var(TRACE_ENV).ok())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());

    if level_value.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(&level_value).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

/// Output format of the installed layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// Parse `pretty` or `json`, ignoring case.
    pub fn parse(value: &str) -> Result<Self, LoggingError> {
        if value.eq_ignore_ascii_case("pretty") {
            Ok(LogFormat::Pretty)
        } else if value.eq_ignore_ascii_case("json") {
            Ok(LogFormat::Json)
        } else {
            Err(LoggingError::InvalidFormat(value.to_string()))
        }
    }
}

type Base = Layered<EnvFilter, Registry>;
type BoxedLayer = Box<dyn Layer<Base> + Send + Sync>;

fn fmt_layer<W>(writer: W, format: LogFormat, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

/// Enable structured logging for lqp.
///
/// When `level` is None, this reads `LQP_TRACE` if set. If `LQP_TRACE` is
/// unset, the default level is `off`. `LQP_LOG_FORMAT` selects `pretty`
/// (default) or `json` output on stderr, and `LQP_LOG_FILE` adds a file sink
/// in the same format.
/// Returns `Ok(true)` when logging is initialized, `Ok(false)` if a
/// subscriber is already configured.
pub fn enable_logging(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let filter = resolve_filter(level)?;
    let format = match env::var(FORMAT_ENV) {
        Ok(value) => LogFormat::parse(&value)?,
        Err(_) => LogFormat::Pretty,
    };

    let mut layers = vec![fmt_layer(io::stderr, format, true)];
    if let Ok(path) = env::var(FILE_ENV) {
        layers.push(fmt_layer(open_log_file(&path)?, format, false));
    }
    let sinks = layers.len();

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(map_init_err)?;

    tracing::debug!(
        component = "logging",
        operation = "enable_logging",
        status = "success",
        format = ?format,
        sinks,
        "Installed tracing subscriber"
    );
    Ok(true)
}
