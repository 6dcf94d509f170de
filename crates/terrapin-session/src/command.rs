//! The command vocabulary and its argument resolution.
//!
//! Operations accept optional leading parameters. Defaults are substituted
//! here, once, at the dispatcher boundary — the rest of the session only
//! ever sees fully-resolved commands.

use terrapin_types::{Color, Value};

use crate::error::{CommandError, CommandResult};

/// Logical operation names accepted by
/// [`Session::dispatch`](crate::Session::dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Move,
    TurnEither,
    TurnLeft,
    TurnRight,
    PenEither,
    PenUp,
    PenDown,
    SetColor,
    ReadInputValue,
    DebugLog,
}

impl Operation {
    /// Resolve a wire name.
    pub fn parse(name: &str) -> CommandResult<Self> {
        match name {
            "move" => Ok(Self::Move),
            "turn-either" => Ok(Self::TurnEither),
            "turn-left" => Ok(Self::TurnLeft),
            "turn-right" => Ok(Self::TurnRight),
            "pen-either" => Ok(Self::PenEither),
            "pen-up" => Ok(Self::PenUp),
            "pen-down" => Ok(Self::PenDown),
            "set-color" => Ok(Self::SetColor),
            "read-input-value" => Ok(Self::ReadInputValue),
            "debug-log" => Ok(Self::DebugLog),
            other => Err(CommandError::UnknownOperation(other.to_string())),
        }
    }
}

/// Turn direction, as the palette emits it: `"l"`/`"r"` or the full words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn parse(word: &str) -> CommandResult<Self> {
        match word {
            "l" | "left" => Ok(Self::Left),
            "r" | "right" => Ok(Self::Right),
            other => Err(CommandError::InvalidDirection(other.to_string())),
        }
    }
}

/// Pen state words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Up,
    Down,
}

impl PenState {
    pub fn parse(word: &str) -> CommandResult<Self> {
        match word {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(CommandError::InvalidPenState(other.to_string())),
        }
    }
}

/// A fully-resolved command: defaults substituted, direction folded into
/// the angle's sign.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move { amount: f64 },
    Turn { angle_degrees: f64 },
    SetPen { down: bool },
    SetColor { color: Color },
    ReadInputValue,
    DebugLog { message: String },
}

impl Command {
    /// Resolve an operation and its loose arguments, substituting each
    /// omitted parameter's default:
    ///
    /// | operation    | defaults              |
    /// |--------------|-----------------------|
    /// | move         | amount 1              |
    /// | turn-either  | angle 0, direction l  |
    /// | turn-left/-right | angle 90          |
    /// | pen-either   | state down            |
    /// | set-color    | black                 |
    /// | debug-log    | empty message         |
    pub fn resolve(operation: Operation, args: &[Value]) -> CommandResult<Self> {
        match operation {
            Operation::Move => {
                arity(args, 1)?;
                let amount = number_or(args, 0, 1.0)?;
                Ok(Self::Move { amount })
            }
            Operation::TurnEither => {
                arity(args, 2)?;
                let angle = number_or(args, 0, 0.0)?;
                let direction = Direction::parse(word_or(args, 1, "l")?)?;
                Ok(Self::turn(angle, direction))
            }
            Operation::TurnLeft => {
                arity(args, 1)?;
                let angle = number_or(args, 0, 90.0)?;
                Ok(Self::turn(angle, Direction::Left))
            }
            Operation::TurnRight => {
                arity(args, 1)?;
                let angle = number_or(args, 0, 90.0)?;
                Ok(Self::turn(angle, Direction::Right))
            }
            Operation::PenEither => {
                arity(args, 1)?;
                let state = PenState::parse(word_or(args, 0, "down")?)?;
                Ok(Self::SetPen {
                    down: state == PenState::Down,
                })
            }
            Operation::PenUp => {
                arity(args, 0)?;
                Ok(Self::SetPen { down: false })
            }
            Operation::PenDown => {
                arity(args, 0)?;
                Ok(Self::SetPen { down: true })
            }
            Operation::SetColor => {
                arity(args, 1)?;
                let color = color_or(args, 0, Color::BLACK)?;
                Ok(Self::SetColor { color })
            }
            Operation::ReadInputValue => {
                arity(args, 0)?;
                Ok(Self::ReadInputValue)
            }
            Operation::DebugLog => {
                arity(args, 1)?;
                let message = args.first().map(Value::to_string).unwrap_or_default();
                Ok(Self::DebugLog { message })
            }
        }
    }

    fn turn(angle: f64, direction: Direction) -> Self {
        let angle_degrees = match direction {
            Direction::Left => angle,
            Direction::Right => -angle,
        };
        Self::Turn { angle_degrees }
    }
}

fn arity(args: &[Value], max: usize) -> CommandResult<()> {
    if args.len() > max {
        return Err(CommandError::InvalidCommandArgument(format!(
            "expected at most {max} arguments, found {}",
            args.len()
        )));
    }
    Ok(())
}

/// Optional numeric parameter, substituting `default` when absent.
fn number_or(args: &[Value], index: usize, default: f64) -> CommandResult<f64> {
    match args.get(index) {
        None => Ok(default),
        Some(Value::Number(n)) => Ok(*n),
        Some(other) => Err(CommandError::InvalidCommandArgument(format!(
            "expected a number, found {}",
            other.type_name()
        ))),
    }
}

/// Optional word parameter, substituting `default` when absent.
fn word_or<'a>(args: &'a [Value], index: usize, default: &'a str) -> CommandResult<&'a str> {
    match args.get(index) {
        None => Ok(default),
        Some(Value::Word(w)) => Ok(w),
        Some(other) => Err(CommandError::InvalidCommandArgument(format!(
            "expected a word, found {}",
            other.type_name()
        ))),
    }
}

/// Optional color parameter; hex words are accepted as colors.
fn color_or(args: &[Value], index: usize, default: Color) -> CommandResult<Color> {
    match args.get(index) {
        None => Ok(default),
        Some(Value::Color(c)) => Ok(*c),
        Some(Value::Word(w)) => Color::from_hex(w).ok_or_else(|| {
            CommandError::InvalidCommandArgument(format!("not a color: {w}"))
        }),
        Some(other) => Err(CommandError::InvalidCommandArgument(format!(
            "expected a color, found {}",
            other.type_name()
        ))),
    }
}
