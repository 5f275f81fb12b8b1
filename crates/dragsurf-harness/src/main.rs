#![forbid(unsafe_code)]

//! Trace replay CLI.
//!
//! # Running
//!
//! ```sh
//! cargo run -p dragsurf-harness -- trace.jsonl
//! cat trace.jsonl | cargo run -p dragsurf-harness
//! ```
//!
//! # Environment
//!
//! - `DRAGSURF_HARNESS_CONFIG`: JSON `DragConfig` (missing fields default)
//! - `DRAGSURF_HARNESS_FRAME_MS`: frame step for `settle` steps (default 16)
//! - `DRAGSURF_HARNESS_LOG_FORMAT`: `text` or `json` tracing output on stderr
//! - `DRAGSURF_HARNESS_OUTPUT`: `text` or `json` replay log on stdout
//! - `RUST_LOG`: tracing filter (default `warn`)

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use dragsurf_core::config::DragConfig;
use dragsurf_harness::replay::{self, ReplayError, Replayer};
use dragsurf_harness::{HarnessEnv, LogFormat};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    if let Err(err) = installed {
        eprintln!("dragsurf-harness: tracing not installed: {err}");
    }
}

fn run(env: &HarnessEnv, trace: Option<&str>) -> Result<(), ReplayError> {
    let config = match &env.config_path {
        Some(path) => replay::load_config(path)?,
        None => DragConfig::default(),
    };
    let steps = match trace {
        Some(path) if path != "-" => replay::load_trace(Path::new(path))?,
        _ => replay::parse_trace(io::stdin().lock())?,
    };
    tracing::info!(steps = steps.len(), "replaying trace");

    let mut replayer = Replayer::new(config);
    if let Some(ms) = env.frame_ms {
        replayer = replayer.with_frame(Duration::from_millis(ms));
    }
    replayer.run(&steps)?;

    let log = replayer.log();
    let rendered = match env.output_format {
        LogFormat::Text => log.to_text(),
        LogFormat::Json => log.to_jsonl()?,
    };
    let mut stdout = io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let env = HarnessEnv::from_env();
    init_tracing(env.log_format);

    let trace = std::env::args().nth(1);
    match run(&env, trace.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "replay failed");
            eprintln!("dragsurf-harness: {err}");
            ExitCode::FAILURE
        }
    }
}
