//! Session lifecycle and command dispatch.

use std::time::Duration;

use terrapin_core::{Canvas, Marker, TurtleInstance, TurtleResult, DEFAULT_STEP_SCALE};
use terrapin_types::Value;

use crate::command::{Command, Operation};
use crate::error::CommandResult;
use crate::pacing::{CancelToken, Pacer};
use crate::replica::ReplicaSet;

/// The reference-solution procedure: issues the same instance operations a
/// learner program would, against whichever reference replica it is given.
pub type SolutionProc = Box<dyn Fn(&mut TurtleInstance) -> TurtleResult<()>>;

/// Session-wide settings supplied by the task definition.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Step scale applied to every replica at reset.
    pub step_scale: f64,
    /// Delay between commands while a visible surface is attached.
    pub pace: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_scale: DEFAULT_STEP_SCALE,
            pace: Duration::from_millis(200),
        }
    }
}

/// Per-task wiring supplied at reset: the reference solution and the
/// external input value consumed by `read-input-value`.
pub struct GridConfig {
    pub draw_solution: SolutionProc,
    pub input_value: Option<Value>,
}

/// Rendering targets and marker supplied by the visible-surface
/// collaborator. Absent entirely in headless grading contexts.
pub struct DisplayBinding {
    /// Surface the learner's strokes land on.
    pub canvas: Canvas,
    /// Surface the reference solution is overlaid on.
    pub reference_canvas: Canvas,
    /// Marker following the learner's turtle.
    pub marker: Box<dyn Marker>,
}

/// One grading session: the four-replica set, the dispatcher, the pacing
/// scheduler, and the lifecycle controller.
///
/// Learner commands enter exclusively through [`dispatch`](Session::dispatch);
/// the reference replicas are driven exclusively by the solution replay in
/// [`reset`](Session::reset). Nothing else mutates replica state.
pub struct Session {
    config: SessionConfig,
    replicas: ReplicaSet,
    solution: Option<SolutionProc>,
    input_value: Option<Value>,
    cancel: CancelToken,
    log_output: Vec<String>,
}

impl Session {
    /// A headless session: the two validation replicas, fresh surfaces,
    /// no display pair.
    pub fn new(config: SessionConfig) -> Self {
        let mut replicas = ReplicaSet::new();
        replicas.validation.attach_canvas(Canvas::new());
        replicas.validation_reference.attach_canvas(Canvas::new());
        Self {
            config,
            replicas,
            solution: None,
            input_value: None,
            cancel: CancelToken::new(),
            log_output: Vec::new(),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ══════════════════════════════════════════════════════════════════════

    /// (Re)initialize the replica set.
    ///
    /// Clears and resets the display pair when visible, gives both
    /// validation replicas fresh surfaces, and — when `grid` is supplied —
    /// stores its wiring and replays the reference solution onto
    /// `validation_reference` (and `display_reference` when visible).
    pub fn reset(&mut self, grid: Option<GridConfig>) -> CommandResult<()> {
        self.cancel.rearm();
        self.log_output.clear();
        let step_scale = Some(self.config.step_scale);

        if let Some(display) = &mut self.replicas.display {
            display.reset(step_scale);
        }
        if let Some(display_reference) = &mut self.replicas.display_reference {
            display_reference.reset(step_scale);
        }

        self.replicas.validation.attach_canvas(Canvas::new());
        self.replicas.validation.reset(step_scale);
        self.replicas.validation_reference.attach_canvas(Canvas::new());
        self.replicas.validation_reference.reset(step_scale);

        if let Some(grid) = grid {
            self.input_value = grid.input_value;
            (grid.draw_solution)(&mut self.replicas.validation_reference)?;
            if let Some(display_reference) = &mut self.replicas.display_reference {
                (grid.draw_solution)(display_reference)?;
            }
            self.solution = Some(grid.draw_solution);
        }
        Ok(())
    }

    /// Attach the visible pair. The display replica carries the marker;
    /// both carry their on-screen surfaces. Replicas start at the reset
    /// pose; the next [`reset`](Session::reset) aligns them with the task.
    pub fn attach_display(&mut self, binding: DisplayBinding) {
        let mut display = TurtleInstance::new();
        display.attach_canvas(binding.canvas);
        display.attach_marker(binding.marker);

        let mut display_reference = TurtleInstance::new();
        display_reference.attach_canvas(binding.reference_canvas);

        self.replicas.display = Some(display);
        self.replicas.display_reference = Some(display_reference);
    }

    /// Drop the visible pair, returning to a headless session.
    pub fn detach_display(&mut self) {
        self.replicas.display = None;
        self.replicas.display_reference = None;
    }

    /// Stop the current run: queued continuations are dropped, applied
    /// geometry stays. Only `reset` returns to a known state.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Shared cancellation handle for the program runner.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ══════════════════════════════════════════════════════════════════════
    // Command dispatch
    // ══════════════════════════════════════════════════════════════════════

    /// The single entry point for learner commands.
    ///
    /// Resolves defaults, fans the command out over the active subset
    /// (`validation`, plus `display` when visible), then hands the
    /// continuation to the pacer. `read-input-value` passes the stored
    /// input value to the continuation and skips the pacing delay, as does
    /// `debug-log`. On error the continuation is never invoked.
    pub fn dispatch(
        &mut self,
        operation: Operation,
        args: &[Value],
        continuation: impl FnOnce(Option<Value>),
    ) -> CommandResult<()> {
        match Command::resolve(operation, args)? {
            Command::Move { amount } => {
                self.replicas.for_each_active(|t| t.advance(amount))?;
                self.pace(None, continuation);
            }
            Command::Turn { angle_degrees } => {
                self.replicas.for_each_active(|t| {
                    t.turn(angle_degrees);
                    Ok(())
                })?;
                self.pace(None, continuation);
            }
            Command::SetPen { down } => {
                self.replicas.for_each_active(|t| {
                    t.set_pen_down(down);
                    Ok(())
                })?;
                self.pace(None, continuation);
            }
            Command::SetColor { color } => {
                self.replicas.for_each_active(|t| {
                    t.set_stroke_color(color);
                    Ok(())
                })?;
                self.pace(None, continuation);
            }
            Command::ReadInputValue => {
                if !self.cancel.is_cancelled() {
                    continuation(self.input_value.clone());
                }
            }
            Command::DebugLog { message } => {
                self.log_output.push(message);
                if !self.cancel.is_cancelled() {
                    continuation(None);
                }
            }
        }
        Ok(())
    }

    /// Wire-level dispatch: operation by name.
    pub fn dispatch_named(
        &mut self,
        operation: &str,
        args: &[Value],
        continuation: impl FnOnce(Option<Value>),
    ) -> CommandResult<()> {
        self.dispatch(Operation::parse(operation)?, args, continuation)
    }

    fn pace(&self, value: Option<Value>, continuation: impl FnOnce(Option<Value>)) {
        let pacer = if self.replicas.is_visible() {
            Pacer::new(self.config.pace)
        } else {
            Pacer::immediate()
        };
        pacer.pace(&self.cancel, value, continuation);
    }

    // ══════════════════════════════════════════════════════════════════════
    // Grader and runner access
    // ══════════════════════════════════════════════════════════════════════

    pub fn replicas(&self) -> &ReplicaSet {
        &self.replicas
    }

    /// The learner's invisible surface.
    pub fn validation_canvas(&self) -> Option<&Canvas> {
        self.replicas.validation.canvas()
    }

    /// The solution's invisible surface.
    pub fn validation_reference_canvas(&self) -> Option<&Canvas> {
        self.replicas.validation_reference.canvas()
    }

    /// Both grading surfaces at once, when present.
    pub fn grading_surfaces(&self) -> Option<(&Canvas, &Canvas)> {
        Some((
            self.validation_canvas()?,
            self.validation_reference_canvas()?,
        ))
    }

    /// Captured `debug-log` output.
    pub fn log_output(&self) -> &[String] {
        &self.log_output
    }

    pub fn clear_log(&mut self) {
        self.log_output.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
