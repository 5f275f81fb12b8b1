#![forbid(unsafe_code)]

//! Golden replay logs.
//!
//! A golden test replays a trace and compares the text log against
//! `tests/golden/<name>.log` under the crate root. Run with `BLESS=1` to
//! create or update the stored log.

use std::fs;
use std::path::{Path, PathBuf};

use crate::replay::ReplayLog;

/// Resolve the golden file path.
#[must_use]
pub fn golden_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir.join("tests").join("golden").join(format!("{name}.log"))
}

/// Check if the `BLESS` environment variable is set.
#[must_use]
pub fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Outcome of comparing a log with its golden file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenOutcome {
    Match,
    /// The golden file was written (bless mode).
    Blessed,
    Missing { path: PathBuf },
    Mismatch { expected: String, actual: String },
}

/// Compare `log` with the golden file, writing it in bless mode.
pub fn compare_golden(
    log: &ReplayLog,
    name: &str,
    base_dir: &Path,
    bless: bool,
) -> std::io::Result<GoldenOutcome> {
    let path = golden_path(base_dir, name);
    let actual = log.to_text();
    if bless {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &actual)?;
        return Ok(GoldenOutcome::Blessed);
    }
    match fs::read_to_string(&path) {
        Ok(expected) if expected == actual => Ok(GoldenOutcome::Match),
        Ok(expected) => Ok(GoldenOutcome::Mismatch { expected, actual }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Ok(GoldenOutcome::Missing { path })
        }
        Err(err) => Err(err),
    }
}

/// Assert that a replay log matches its golden file.
///
/// # Panics
///
/// * If the golden file does not exist and `BLESS=1` is **not** set.
/// * If the log does not match the stored golden file.
pub fn assert_golden(log: &ReplayLog, name: &str, base_dir: &str) {
    let outcome = match compare_golden(log, name, Path::new(base_dir), is_bless()) {
        Ok(outcome) => outcome,
        Err(err) => panic!("golden '{name}': i/o error: {err}"),
    };
    match outcome {
        GoldenOutcome::Match | GoldenOutcome::Blessed => {}
        GoldenOutcome::Missing { path } => panic!(
            "golden '{name}' not found at {}\n\nRun with BLESS=1 to create it.",
            path.display()
        ),
        GoldenOutcome::Mismatch { expected, actual } => panic!(
            "golden '{name}' mismatch\n--- expected\n{expected}--- actual\n{actual}\nRun with BLESS=1 to update."
        ),
    }
}
