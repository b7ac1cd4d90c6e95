//! Tracing subscriber setup.
//!
//! Keel logs through `tracing` everywhere but never installs a subscriber on
//! its own. Hosts call [`TracingConfig::init`] once at startup, before the
//! first touch of the process-wide registries, so static installation and
//! freeze events are captured.
//!
//! # Example
//!
//! ```
//! use keel_diagnostics::{TracingConfig, TracingFormat};
//! use tracing::Level;
//!
//! // Development: pretty output with debug level.
//! TracingConfig::new()
//!     .with_level(Level::DEBUG)
//!     .with_format(TracingFormat::Pretty)
//!     .init();
//!
//! // Production: JSON output, pipeline details only.
//! let production = TracingConfig::new()
//!     .with_format(TracingFormat::Json)
//!     .with_env_filter("keel_resource=debug,keel_registry=info");
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable consulted when no filter is configured.
pub const ENV_FILTER_VAR: &str = "KEEL_LOG";

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for the process-wide tracing subscriber.
///
/// Filter precedence: an explicit [`with_env_filter()`](Self::with_env_filter),
/// then the `KEEL_LOG` environment variable, then the configured level.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    level: Level,
    format: TracingFormat,
    env_filter: Option<String>,
    span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a configuration at `INFO` with pretty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a filter directive string, e.g. `keel_resource=debug,keel_registry=warn`.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Returns the configured level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the configured format.
    #[must_use]
    pub fn format(&self) -> TracingFormat {
        self.format
    }

    /// Builds the filter. Invalid directives fall back to the level.
    fn filter(&self) -> EnvFilter {
        let level = || EnvFilter::new(self.level.as_str());
        match &self.env_filter {
            Some(filter) => EnvFilter::try_new(filter).unwrap_or_else(|_| level()),
            None => EnvFilter::try_from_env(ENV_FILTER_VAR).unwrap_or_else(|_| level()),
        }
    }

    /// Installs the subscriber.
    ///
    /// Returns `false` if a global subscriber was already installed, in which
    /// case the existing one is kept.
    pub fn init(&self) -> bool {
        let span_events = if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        };

        let registry = tracing_subscriber::registry().with(self.filter());
        let installed = match self.format {
            TracingFormat::Pretty => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
            TracingFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()
                .is_ok(),
        };

        if installed {
            tracing::info!(level = %self.level, format = ?self.format, "tracing initialized");
        }
        installed
    }
}
