//! Integration tests for the replica-set session.
//!
//! Covers the dispatcher surface end to end:
//! - fan-out over the active subset, headless and visible
//! - reference isolation under learner dispatch
//! - default substitution and argument validation
//! - reference replay at reset and grading-surface comparison
//! - pacing, cancellation, and the input-value path

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use terrapin_core::{Canvas, Marker, TurtleInstance, CANVAS_CENTER};
use terrapin_session::{
    CommandError, DisplayBinding, GridConfig, Operation, Session, SessionConfig,
};
use terrapin_types::{Color, Point, Value};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn headless() -> Session {
    Session::new(SessionConfig {
        step_scale: 5.0,
        pace: Duration::ZERO,
    })
}

/// Reference solution: one step up, quarter turn right, one step.
fn square_corner_grid() -> GridConfig {
    GridConfig {
        draw_solution: Box::new(|t: &mut TurtleInstance| {
            t.advance(1.0)?;
            t.turn(-90.0);
            t.advance(1.0)
        }),
        input_value: Some(Value::Number(42.0)),
    }
}

/// Drive the learner through the same square corner via the dispatcher.
fn dispatch_square_corner(session: &mut Session) {
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| {})
        .unwrap();
    session
        .dispatch(Operation::TurnRight, &[Value::Number(90.0)], |_| {})
        .unwrap();
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| {})
        .unwrap();
}

struct NullMarker;

impl Marker for NullMarker {
    fn set_position(&mut self, _top_left: Point) {}
    fn set_rotation(&mut self, _radians: f64) {}
    fn clear_rotation(&mut self) {}
}

fn visible() -> Session {
    let mut session = Session::new(SessionConfig {
        step_scale: 5.0,
        pace: Duration::ZERO,
    });
    session.attach_display(DisplayBinding {
        canvas: Canvas::new(),
        reference_canvas: Canvas::new(),
        marker: Box::new(NullMarker),
    });
    session
}

// ══════════════════════════════════════════════════════════════════════════════
// Fan-out
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn headless_dispatch_drives_the_validation_replica() {
    let mut session = headless();
    session.reset(None).unwrap();
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| {})
        .unwrap();
    assert_eq!(
        session.replicas().validation().pose().position,
        Point::new(150.0, 100.0)
    );
    assert!(session.replicas().display().is_none());
}

#[test]
fn visible_dispatch_drives_display_and_validation_identically() {
    let mut session = visible();
    session.reset(None).unwrap();
    dispatch_square_corner(&mut session);

    let validation = session.replicas().validation();
    let display = session.replicas().display().unwrap();
    assert_eq!(validation.snapshot(), display.snapshot());
    assert_eq!(
        validation.canvas().unwrap().strokes(),
        display.canvas().unwrap().strokes()
    );
}

#[test]
fn dispatch_never_touches_the_reference_replicas() {
    let mut session = visible();
    session.reset(Some(square_corner_grid())).unwrap();
    let validation_ref_before = session.replicas().validation_reference().snapshot();
    let display_ref_before = session.replicas().display_reference().unwrap().snapshot();
    let ref_digest_before = session.validation_reference_canvas().unwrap().digest();

    dispatch_square_corner(&mut session);
    session
        .dispatch(Operation::SetColor, &["#ff0000".into()], |_| {})
        .unwrap();
    session.dispatch(Operation::PenUp, &[], |_| {}).unwrap();

    assert_eq!(
        session.replicas().validation_reference().snapshot(),
        validation_ref_before
    );
    assert_eq!(
        session.replicas().display_reference().unwrap().snapshot(),
        display_ref_before
    );
    assert_eq!(
        session.validation_reference_canvas().unwrap().digest(),
        ref_digest_before
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Defaults and argument validation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn move_without_arguments_defaults_to_one_step() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.dispatch(Operation::Move, &[], |_| {}).unwrap();
    assert_eq!(
        session.replicas().validation().pose().position,
        Point::new(150.0, 100.0)
    );
}

#[test]
fn turn_left_defaults_to_90_degrees() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.dispatch(Operation::TurnLeft, &[], |_| {}).unwrap();
    let expected = 90.0 * std::f64::consts::PI / 180.0;
    assert_eq!(session.replicas().validation().pose().heading, expected);
}

#[test]
fn pen_either_defaults_to_down() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.dispatch(Operation::PenUp, &[], |_| {}).unwrap();
    session.dispatch(Operation::PenEither, &[], |_| {}).unwrap();
    assert!(session.replicas().validation().pose().pen_down);
}

#[test]
fn set_color_reaches_the_pose() {
    let mut session = headless();
    session.reset(None).unwrap();
    session
        .dispatch(Operation::SetColor, &[Value::Color(Color::new(0, 0, 255))], |_| {})
        .unwrap();
    assert_eq!(
        session.replicas().validation().pose().stroke_color,
        Color::new(0, 0, 255)
    );
}

#[test]
fn argument_errors_are_synchronous_and_skip_the_continuation() {
    let mut session = headless();
    session.reset(None).unwrap();
    let fired = Cell::new(false);

    let err = session
        .dispatch(Operation::TurnEither, &[Value::Number(90.0), "diagonal".into()], |_| {
            fired.set(true)
        })
        .unwrap_err();
    assert_eq!(err, CommandError::InvalidDirection("diagonal".into()));

    let err = session
        .dispatch(Operation::Move, &["far".into()], |_| fired.set(true))
        .unwrap_err();
    assert!(matches!(err, CommandError::InvalidCommandArgument(_)));

    let err = session
        .dispatch_named("hop", &[], |_| fired.set(true))
        .unwrap_err();
    assert_eq!(err, CommandError::UnknownOperation("hop".into()));

    assert!(!fired.get());
    // No replica moved either.
    assert_eq!(
        session.replicas().validation().pose().position,
        CANVAS_CENTER
    );
}

#[test]
fn dispatch_named_resolves_wire_names() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.dispatch_named("turn-right", &[], |_| {}).unwrap();
    session.dispatch_named("move", &[], |_| {}).unwrap();
    assert!(session.replicas().validation().pose().position.x > 150.0);
}

// ══════════════════════════════════════════════════════════════════════════════
// Reference replay and grading
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn reset_replays_the_solution_onto_the_reference_surfaces() {
    let mut session = visible();
    session.reset(Some(square_corner_grid())).unwrap();

    let blank = Canvas::new().digest();
    assert_ne!(
        session.validation_reference_canvas().unwrap().digest(),
        blank
    );
    assert_ne!(
        session
            .replicas()
            .display_reference()
            .unwrap()
            .canvas()
            .unwrap()
            .digest(),
        blank
    );
    // The learner surfaces stay untouched by the replay.
    assert_eq!(session.validation_canvas().unwrap().digest(), blank);
    assert_eq!(
        session
            .replicas()
            .display()
            .unwrap()
            .canvas()
            .unwrap()
            .digest(),
        blank
    );
}

#[test]
fn matching_learner_program_matches_the_reference_digest() {
    let mut session = headless();
    session.reset(Some(square_corner_grid())).unwrap();
    dispatch_square_corner(&mut session);

    let (learner, reference) = session.grading_surfaces().unwrap();
    assert_eq!(learner.digest(), reference.digest());
    assert_eq!(learner.strokes(), reference.strokes());
    assert_eq!(learner.strokes_to_json(), reference.strokes_to_json());
}

#[test]
fn snapshots_serialize_for_golden_comparison() {
    let mut session = headless();
    session.reset(None).unwrap();
    dispatch_square_corner(&mut session);

    let snapshot = session.replicas().validation().snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: terrapin_core::PoseSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn diverging_learner_program_differs_from_the_reference_digest() {
    let mut session = headless();
    session.reset(Some(square_corner_grid())).unwrap();
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| {})
        .unwrap();
    session
        .dispatch(Operation::TurnLeft, &[Value::Number(90.0)], |_| {})
        .unwrap();
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| {})
        .unwrap();

    let (learner, reference) = session.grading_surfaces().unwrap();
    assert_ne!(learner.digest(), reference.digest());
}

#[test]
fn session_reset_is_idempotent() {
    let mut session = headless();
    session.reset(None).unwrap();
    dispatch_square_corner(&mut session);

    session.reset(None).unwrap();
    let first = session.replicas().validation().snapshot();
    let first_digest = session.validation_canvas().unwrap().digest();
    session.reset(None).unwrap();
    assert_eq!(session.replicas().validation().snapshot(), first);
    assert_eq!(session.validation_canvas().unwrap().digest(), first_digest);
}

#[test]
fn bare_reset_gives_fresh_reference_surfaces() {
    let mut session = headless();
    session.reset(Some(square_corner_grid())).unwrap();
    session.reset(None).unwrap();
    assert_eq!(
        session.validation_reference_canvas().unwrap().digest(),
        Canvas::new().digest()
    );
}

#[test]
fn two_sessions_replay_bit_identically() {
    let mut a = headless();
    let mut b = headless();
    for session in [&mut a, &mut b] {
        session.reset(Some(square_corner_grid())).unwrap();
        dispatch_square_corner(session);
    }
    assert_eq!(
        a.replicas().validation().snapshot(),
        b.replicas().validation().snapshot()
    );
    assert_eq!(
        a.validation_canvas().unwrap().digest(),
        b.validation_canvas().unwrap().digest()
    );
    assert_eq!(
        a.validation_reference_canvas().unwrap().digest(),
        b.validation_reference_canvas().unwrap().digest()
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Input value, logging, cancellation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn read_input_value_returns_the_stored_value_verbatim() {
    let mut session = headless();
    session.reset(Some(square_corner_grid())).unwrap();
    let received = Rc::new(RefCell::new(None));
    let slot = received.clone();
    session
        .dispatch(Operation::ReadInputValue, &[], move |v| {
            *slot.borrow_mut() = v;
        })
        .unwrap();
    assert_eq!(*received.borrow(), Some(Value::Number(42.0)));
}

#[test]
fn read_input_value_without_grid_yields_nothing() {
    let mut session = headless();
    session.reset(None).unwrap();
    let received = Cell::new(Some(Value::Number(0.0)));
    session
        .dispatch(Operation::ReadInputValue, &[], |v| received.set(v))
        .unwrap();
    assert_eq!(received.take(), None);
}

#[test]
fn debug_log_is_captured_in_order() {
    let mut session = headless();
    session.reset(None).unwrap();
    session
        .dispatch(Operation::DebugLog, &["first".into()], |_| {})
        .unwrap();
    session
        .dispatch(Operation::DebugLog, &[Value::Number(2.0)], |_| {})
        .unwrap();
    assert_eq!(
        session.log_output(),
        &["first".to_string(), "2".to_string()]
    );
    session.clear_log();
    assert!(session.log_output().is_empty());
}

#[test]
fn stop_drops_continuations_but_keeps_geometry() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.stop();

    let fired = Cell::new(false);
    session
        .dispatch(Operation::Move, &[Value::Number(1.0)], |_| fired.set(true))
        .unwrap();
    assert!(!fired.get());
    // Geometry already applied is not rolled back.
    assert_eq!(
        session.replicas().validation().pose().position,
        Point::new(150.0, 100.0)
    );
}

#[test]
fn reset_rearms_a_stopped_session() {
    let mut session = headless();
    session.reset(None).unwrap();
    session.stop();
    session.reset(None).unwrap();

    let fired = Cell::new(false);
    session
        .dispatch(Operation::Move, &[], |_| fired.set(true))
        .unwrap();
    assert!(fired.get());
}

#[test]
fn cancel_token_is_shared_with_the_runner() {
    let session = headless();
    let token = session.cancel_token();
    session.stop();
    assert!(token.is_cancelled());
}

#[test]
fn zero_amount_commands_still_complete() {
    let mut session = headless();
    session.reset(None).unwrap();
    let completions = Cell::new(0u32);
    session
        .dispatch(Operation::Move, &[Value::Number(0.0)], |_| {
            completions.set(completions.get() + 1)
        })
        .unwrap();
    session
        .dispatch(Operation::TurnEither, &[], |_| {
            completions.set(completions.get() + 1)
        })
        .unwrap();
    assert_eq!(completions.get(), 2);
    assert_eq!(
        session.replicas().validation().pose().position,
        CANVAS_CENTER
    );
}
