//! Courier Logging
//!
//! Installs a `tracing` subscriber for applications that send mail through
//! Courier. The mail pipeline emits `tracing` events; this crate decides
//! where they go and how they look.
//!
//! # Usage
//!
//! ```rust,no_run
//! courier_log::init();
//! tracing::info!("mailer started");
//! ```
//!
//! # Environment Variables
//!
//! - `COURIER_DEBUG=1` - Enable debug logging
//! - `COURIER_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `COURIER_LOG_FORMAT=pretty|json|compact` - Set output format
//! - `COURIER_LOG_COLOR=1|0` - Enable/disable colors
//!
//! `RUST_LOG`, when set, takes precedence over `COURIER_LOG_LEVEL`.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry};

// ============================================================================
// Log Levels
// ============================================================================

/// Minimum level of events to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
    /// Off (no logging)
    Off,
}

impl Level {
    /// Parse a level name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Get level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    /// The `EnvFilter` directive for this level.
    pub fn directive(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Off => "off",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Trace => LevelFilter::TRACE,
            Level::Debug => LevelFilter::DEBUG,
            Level::Info => LevelFilter::INFO,
            Level::Warn => LevelFilter::WARN,
            Level::Error => LevelFilter::ERROR,
            Level::Off => LevelFilter::OFF,
        }
    }
}

// ============================================================================
// Log Format
// ============================================================================

/// Output format for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Multi-line, human readable
    Pretty,
    /// Single-line, human readable
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl Format {
    /// Parse a format name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether debug mode is enabled
    pub debug: bool,
    /// Minimum log level
    pub level: Level,
    /// Output format
    pub format: Format,
    /// Whether colors are enabled
    pub color: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Info,
            format: Format::Json,
            color: false,
        }
    }
}

impl LogConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from `(name, value)` pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let var = |name: &str| vars.get(name).map(String::as_str);

        let debug = var("COURIER_DEBUG").map(is_truthy).unwrap_or(false);

        let level = var("COURIER_LOG_LEVEL")
            .and_then(Level::parse)
            .unwrap_or(if debug { Level::Debug } else { Level::Info });

        let format = var("COURIER_LOG_FORMAT")
            .and_then(Format::parse)
            .unwrap_or(Format::Json);

        // Color only when a terminal is likely and NO_COLOR is unset.
        let color = var("COURIER_LOG_COLOR")
            .map(is_truthy)
            .unwrap_or_else(|| var("NO_COLOR").is_none() && var("TERM").is_some());

        Self {
            debug,
            level,
            format,
            color,
        }
    }

    /// Build the event filter, preferring `RUST_LOG` when it parses.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| self.level_filter())
    }

    fn level_filter(&self) -> EnvFilter {
        EnvFilter::new(self.level.directive())
    }

    /// Build the formatting layer for this configuration.
    pub fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        match self.format {
            Format::Pretty => layer.pretty().with_ansi(self.color).boxed(),
            Format::Compact => layer.compact().with_ansi(self.color).boxed(),
            Format::Json => layer.json().with_ansi(false).boxed(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

// ============================================================================
// Public API
// ============================================================================

/// Get the global configuration, read from the environment on first use.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> Result<(), TryInitError> {
    try_init_with(config())
}

/// Install the global subscriber for an explicit configuration.
pub fn try_init_with(config: &LogConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(config.layer())
        .with(config.filter())
        .try_init()
}

/// Install the global subscriber, leaving an existing one in place.
pub fn init() {
    let _ = try_init();
}

// ============================================================================
// Tests
// ============================================================================
