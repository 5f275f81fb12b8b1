#![forbid(unsafe_code)]

//! Trace replay and golden-log testing for drag surfaces.
//!
//! - **Trace replay**: scripted pointer, layout and frame steps (JSON Lines)
//!   drive a surface whose handler records every callback.
//! - **Golden logs**: the recorded log is compared against a stored file.
//!
//! # Quick Start
//!
//! ```ignore
//! use dragsurf_harness::{assert_golden, replay::{parse_trace, replay}};
//!
//! #[test]
//! fn clamp_scenario() {
//!     let steps = parse_trace(include_str!("traces/clamp.jsonl").as_bytes()).unwrap();
//!     let log = replay(DragConfig::default(), &steps).unwrap();
//!     assert_golden(&log, "clamp", env!("CARGO_MANIFEST_DIR"));
//! }
//! ```
//!
//! # Updating Golden Logs
//!
//! ```sh
//! BLESS=1 cargo test -p dragsurf-harness
//! ```

pub mod golden;
pub mod replay;

pub use golden::{GoldenOutcome, assert_golden, compare_golden};
pub use replay::{LogEntry, ReplayError, ReplayLog, Replayer, TraceStep};

/// Log output format for the harness binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` / `json` (case-insensitive). Anything else is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("text") {
            Some(Self::Text)
        } else if value.eq_ignore_ascii_case("json") || value.eq_ignore_ascii_case("jsonl") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Harness settings read from `DRAGSURF_HARNESS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarnessEnv {
    /// `DRAGSURF_HARNESS_CONFIG`: path to a JSON `DragConfig`.
    pub config_path: Option<std::path::PathBuf>,
    /// `DRAGSURF_HARNESS_FRAME_MS`: frame step for `settle` steps.
    pub frame_ms: Option<u64>,
    /// `DRAGSURF_HARNESS_LOG_FORMAT`: tracing output format.
    pub log_format: LogFormat,
    /// `DRAGSURF_HARNESS_OUTPUT`: replay log format on stdout.
    pub output_format: LogFormat,
}

impl HarnessEnv {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Unparseable values are ignored.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            config_path: lookup("DRAGSURF_HARNESS_CONFIG")
                .filter(|v| !v.is_empty())
                .map(Into::into),
            frame_ms: lookup("DRAGSURF_HARNESS_FRAME_MS").and_then(|v| v.parse().ok()),
            log_format: lookup("DRAGSURF_HARNESS_LOG_FORMAT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
            output_format: lookup("DRAGSURF_HARNESS_OUTPUT")
                .and_then(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }
}
