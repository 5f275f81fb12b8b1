#![forbid(unsafe_code)]

//! Trace replay: drive a [`DragSurface`] from a scripted JSON Lines trace
//! and record every callback it emits.
//!
//! # Trace Schema
//!
//! One step per line. Blank lines and lines starting with `#` are skipped.
//!
//! ```json
//! {"step":"layout","width":36,"height":36}
//! {"step":"down","x":10,"y":10}
//! {"step":"move","dx":3,"dy":0}
//! {"step":"move","dx":83,"dy":0}
//! {"step":"up","dx":83,"dy":0}
//! {"step":"settle"}
//! {"step":"snapshot"}
//! ```
//!
//! `pointer` defaults to 1 on every pointer step. Move/up/cancel deltas are
//! cumulative since the last `down`.
//!
//! # Log Format
//!
//! [`ReplayLog::to_text`] renders one entry per line with integer-friendly
//! float formatting so logs are stable across runs:
//!
//! ```text
//! press_in pointer=1
//! press_out pointer=1
//! drag delta=(80,0) clamped=(64,0) rect=(64,0,100,36)
//! ```

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use dragsurf_core::config::{DragConfig, DragConfigError};
use dragsurf_core::event::{PointerEvent, PointerPhase};
use dragsurf_core::geometry::{Position, Rect, Size};
use dragsurf_core::gesture::GestureEffect;
use dragsurf_core::surface::{DragHandler, DragSurface, DragUpdate};
use serde::{Deserialize, Serialize};

/// Frames an unbounded `settle` step may run before giving up (one minute
/// at 60 Hz).
pub const MAX_SETTLE_FRAMES: usize = 3600;

/// Default frame step for `settle`.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

// ============================================================================
// Trace steps
// ============================================================================

fn default_pointer() -> u32 {
    1
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum TraceStep {
    Down {
        #[serde(default = "default_pointer")]
        pointer: u32,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Move {
        #[serde(default = "default_pointer")]
        pointer: u32,
        dx: f32,
        dy: f32,
    },
    Up {
        #[serde(default = "default_pointer")]
        pointer: u32,
        dx: f32,
        dy: f32,
    },
    Cancel {
        #[serde(default = "default_pointer")]
        pointer: u32,
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    Layout {
        width: f32,
        height: f32,
    },
    /// Advance the frame clock once by `ms`.
    Advance {
        ms: u64,
    },
    /// Advance frame by frame until the surface is idle.
    Settle,
    AnimateTo {
        #[serde(default)]
        target: Option<Position>,
    },
    SetReverse {
        on: bool,
    },
    SetDisabled {
        on: bool,
    },
    /// Record the current value and rect.
    Snapshot,
    Teardown,
}

/// Parse a JSON Lines trace.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<TraceStep>, ReplayError> {
    let mut steps = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = serde_json::from_str(trimmed).map_err(|source| ReplayError::Decode {
            line: idx + 1,
            source,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

/// Load a trace file.
pub fn load_trace(path: &Path) -> Result<Vec<TraceStep>, ReplayError> {
    let file = fs::File::open(path)?;
    parse_trace(io::BufReader::new(file))
}

/// Load and validate a JSON [`DragConfig`]. Missing fields take defaults.
pub fn load_config(path: &Path) -> Result<DragConfig, ReplayError> {
    let text = fs::read_to_string(path)?;
    let config: DragConfig =
        serde_json::from_str(&text).map_err(|source| ReplayError::Decode { line: 0, source })?;
    config.validate()?;
    Ok(config)
}

// ============================================================================
// Log
// ============================================================================

/// One recorded observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum LogEntry {
    PressIn { pointer: u32 },
    PressOut { pointer: u32 },
    LongPress { pointer: u32 },
    ShortPressRelease { pointer: u32 },
    Drag { delta: Position, clamped: Position, rect: Rect },
    DragRelease { delta: Position, clamped: Position, rect: Rect },
    Release { dragged: bool },
    LayoutRejected { width: f32, height: f32 },
    AnimateSettled { target: Position },
    Snapshot { value: Position, rect: Rect },
    Settled { frames: usize },
}

fn fmt_pos(p: Position) -> String {
    format!("({},{})", p.x, p.y)
}

fn fmt_rect(r: Rect) -> String {
    format!("({},{},{},{})", r.left, r.top, r.right, r.bottom)
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PressIn { pointer } => write!(f, "press_in pointer={pointer}"),
            Self::PressOut { pointer } => write!(f, "press_out pointer={pointer}"),
            Self::LongPress { pointer } => write!(f, "long_press pointer={pointer}"),
            Self::ShortPressRelease { pointer } => {
                write!(f, "short_press_release pointer={pointer}")
            }
            Self::Drag {
                delta,
                clamped,
                rect,
            } => write!(
                f,
                "drag delta={} clamped={} rect={}",
                fmt_pos(*delta),
                fmt_pos(*clamped),
                fmt_rect(*rect)
            ),
            Self::DragRelease {
                delta,
                clamped,
                rect,
            } => write!(
                f,
                "drag_release delta={} clamped={} rect={}",
                fmt_pos(*delta),
                fmt_pos(*clamped),
                fmt_rect(*rect)
            ),
            Self::Release { dragged } => write!(f, "release dragged={dragged}"),
            Self::LayoutRejected { width, height } => {
                write!(f, "layout_rejected size=({width},{height})")
            }
            Self::AnimateSettled { target } => write!(f, "animate_settled target={}", fmt_pos(*target)),
            Self::Snapshot { value, rect } => {
                write!(f, "snapshot value={} rect={}", fmt_pos(*value), fmt_rect(*rect))
            }
            Self::Settled { frames } => write!(f, "settled frames={frames}"),
        }
    }
}

/// Everything a replay observed, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub entries: Vec<LogEntry>,
}

impl ReplayLog {
    /// Plain-text rendering, one entry per line, trailing newline.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }

    /// JSON Lines rendering.
    pub fn to_jsonl(&self) -> Result<String, ReplayError> {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&serde_json::to_string(entry).map_err(ReplayError::Encode)?);
            out.push('\n');
        }
        Ok(out)
    }
}

// ============================================================================
// Recorder
// ============================================================================

type Shared = Rc<RefCell<Vec<LogEntry>>>;

/// A [`DragHandler`] that appends every callback to a shared log.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    log: Shared,
}

impl Recorder {
    fn push(&self, entry: LogEntry) {
        self.log.borrow_mut().push(entry);
    }
}

impl DragHandler for Recorder {
    fn on_drag(&mut self, _event: &PointerEvent, update: &DragUpdate) {
        self.push(LogEntry::Drag {
            delta: update.delta,
            clamped: update.clamped,
            rect: update.current_rect,
        });
    }

    fn on_drag_release(&mut self, _event: &PointerEvent, update: &DragUpdate) {
        self.push(LogEntry::DragRelease {
            delta: update.delta,
            clamped: update.clamped,
            rect: update.current_rect,
        });
    }

    fn on_short_press_release(&mut self, event: &PointerEvent) {
        self.push(LogEntry::ShortPressRelease {
            pointer: event.pointer_id,
        });
    }

    fn on_long_press(&mut self, event: &PointerEvent) {
        self.push(LogEntry::LongPress {
            pointer: event.pointer_id,
        });
    }

    fn on_press_in(&mut self, event: &PointerEvent) {
        self.push(LogEntry::PressIn {
            pointer: event.pointer_id,
        });
    }

    fn on_press_out(&mut self, event: &PointerEvent) {
        self.push(LogEntry::PressOut {
            pointer: event.pointer_id,
        });
    }

    fn on_release(&mut self, _event: &PointerEvent, was_dragged: bool) {
        self.push(LogEntry::Release {
            dragged: was_dragged,
        });
    }
}

// ============================================================================
// Replayer
// ============================================================================

/// Drives one surface through trace steps.
#[derive(Debug)]
pub struct Replayer {
    surface: DragSurface<Recorder>,
    log: Shared,
    origin: Position,
    frame: Duration,
}

impl Replayer {
    #[must_use]
    pub fn new(config: DragConfig) -> Self {
        let recorder = Recorder::default();
        let log = Rc::clone(&recorder.log);
        Self {
            surface: DragSurface::new(config, recorder),
            log,
            origin: Position::ZERO,
            frame: DEFAULT_FRAME,
        }
    }

    /// Frame step used by `settle`. A zero step falls back to the default.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = if frame.is_zero() { DEFAULT_FRAME } else { frame };
        self
    }

    #[must_use]
    pub fn surface(&self) -> &DragSurface<Recorder> {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut DragSurface<Recorder> {
        &mut self.surface
    }

    /// Touch-down point of the gesture in progress.
    #[must_use]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Apply one step. `index` is used for error reporting.
    pub fn apply(&mut self, index: usize, step: &TraceStep) -> Result<(), ReplayError> {
        tracing::trace!(index, ?step, "replay step");
        match *step {
            TraceStep::Down { pointer, x, y } => {
                let at = Position::new(x, y);
                let transition = self.surface.handle_pointer(&PointerEvent::down(pointer, at));
                // An ignored down must not move the active gesture's origin.
                if transition.is_some_and(|t| matches!(t.effect, GestureEffect::Pressed { .. })) {
                    self.origin = at;
                }
            }
            TraceStep::Move { pointer, dx, dy } => {
                self.pointer(PointerPhase::Move, pointer, dx, dy);
            }
            TraceStep::Up { pointer, dx, dy } => {
                self.pointer(PointerPhase::Up, pointer, dx, dy);
            }
            TraceStep::Cancel { pointer, dx, dy } => {
                self.pointer(PointerPhase::Cancel, pointer, dx, dy);
            }
            TraceStep::Layout { width, height } => {
                let outcome = self.surface.on_layout(Size::new(width, height));
                if outcome == dragsurf_core::bounds::LayoutOutcome::Rejected {
                    self.log
                        .borrow_mut()
                        .push(LogEntry::LayoutRejected { width, height });
                }
            }
            TraceStep::Advance { ms } => {
                self.surface.advance(Duration::from_millis(ms));
            }
            TraceStep::Settle => {
                let mut frames = 0;
                while self.surface.advance(self.frame) {
                    frames += 1;
                    if frames >= MAX_SETTLE_FRAMES {
                        return Err(ReplayError::NeverSettled { step: index });
                    }
                }
                self.log.borrow_mut().push(LogEntry::Settled { frames });
            }
            TraceStep::AnimateTo { target } => {
                let log = Rc::clone(&self.log);
                let dest = target.unwrap_or(Position::ZERO);
                self.surface.animate_to(
                    target,
                    Some(Box::new(move || {
                        log.borrow_mut()
                            .push(LogEntry::AnimateSettled { target: dest });
                    })),
                );
            }
            TraceStep::SetReverse { on } => self.surface.set_should_reverse(on),
            TraceStep::SetDisabled { on } => self.surface.set_disabled(on),
            TraceStep::Snapshot => {
                let entry = LogEntry::Snapshot {
                    value: self.surface.value(),
                    rect: self.surface.current_rect(),
                };
                self.log.borrow_mut().push(entry);
            }
            TraceStep::Teardown => self.surface.teardown(),
        }
        Ok(())
    }

    /// Apply every step in order.
    pub fn run(&mut self, steps: &[TraceStep]) -> Result<(), ReplayError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        tracing::debug!(steps = steps.len(), entries = self.log.borrow().len(), "replay finished");
        Ok(())
    }

    /// Snapshot of the log so far.
    #[must_use]
    pub fn log(&self) -> ReplayLog {
        ReplayLog {
            entries: self.log.borrow().clone(),
        }
    }

    fn pointer(&mut self, phase: PointerPhase, pointer: u32, dx: f32, dy: f32) {
        let delta = Position::new(dx, dy);
        let event = PointerEvent::new(phase, pointer, self.origin + delta, delta);
        self.surface.handle_pointer(&event);
    }
}

/// Replay `steps` against a fresh surface built from `config`.
pub fn replay(config: DragConfig, steps: &[TraceStep]) -> Result<ReplayLog, ReplayError> {
    let mut replayer = Replayer::new(config);
    replayer.run(steps)?;
    Ok(replayer.log())
}

// ============================================================================
// Errors
// ============================================================================

/// Trace replay failures.
#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    /// A trace line or config file did not decode. `line` is 1-based; 0 for
    /// whole-file input.
    Decode { line: usize, source: serde_json::Error },
    Encode(serde_json::Error),
    Config(DragConfigError),
    /// A `settle` step hit [`MAX_SETTLE_FRAMES`].
    NeverSettled { step: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "trace i/o error: {err}"),
            Self::Decode { line: 0, source } => write!(f, "decode error: {source}"),
            Self::Decode { line, source } => write!(f, "decode error at line {line}: {source}"),
            Self::Encode(err) => write!(f, "encode error: {err}"),
            Self::Config(err) => write!(f, "invalid config: {err}"),
            Self::NeverSettled { step } => write!(
                f,
                "step {step}: surface still animating after {MAX_SETTLE_FRAMES} frames"
            ),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::Encode(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::NeverSettled { .. } => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<DragConfigError> for ReplayError {
    fn from(err: DragConfigError) -> Self {
        Self::Config(err)
    }
}
