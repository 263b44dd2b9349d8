//! Error handling and reporting utilities

use std::error::Error as StdError;
use std::fmt;

use crate::board::AtomId;
use crate::util::Position;


/// Errors reported by the engine
///
/// All of these errors are local to the operation which reported them. None
/// of them leave the session in a different state than before the operation.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The level data is malformed
    InvalidLevel(LevelError),
    /// A snapshot does not describe a valid state of its level
    InvalidSnapshot(String),
    /// There is no atom with the given id
    UnknownAtom(AtomId),
    /// The requested slide would not displace the atom
    NoMove,
    /// There is no move left to undo
    EmptyHistory,
    /// The session was already won
    SessionFinished,
}

impl StdError for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel(e)       => write!(f, "invalid level: {}", e),
            Self::InvalidSnapshot(msg)  => write!(f, "invalid snapshot: {}", msg),
            Self::UnknownAtom(id)       => write!(f, "no atom with id {}", id),
            Self::NoMove                => fmt::Display::fmt("atom is blocked in that direction", f),
            Self::EmptyHistory          => fmt::Display::fmt("nothing to undo", f),
            Self::SessionFinished       => fmt::Display::fmt("level already solved", f),
        }
    }
}

impl From<LevelError> for Error {
    fn from(e: LevelError) -> Self {
        Self::InvalidLevel(e)
    }
}


/// Details about malformed level data
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelError {
    /// The level text could not be parsed
    Parse{line: usize, msg: String},
    /// The wall mask does not cover the grid
    SizeMismatch{expected: usize, found: usize},
    /// An atom starts outside the grid
    AtomOffGrid(Position),
    /// An atom starts on a wall
    AtomOnWall(Position),
    /// Two atoms start on the same cell
    AtomCollision(Position),
    /// A slot of the goal molecule lies outside the grid
    GoalOffGrid(Position),
    /// A slot of the goal molecule lies on a wall
    GoalOnWall(Position),
    /// The goal molecule has no slots
    EmptyGoal,
    /// No level with the given number exists
    UnknownLevel(u32),
    /// Two levels share a number
    DuplicateLevel(u32),
}

impl LevelError {
    /// Create a parse error for the given line
    ///
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Self::Parse{line, msg: msg.into()}
    }
}

impl StdError for LevelError {}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse{line, msg}              => write!(f, "line {}: {}", line, msg),
            Self::SizeMismatch{expected, found} => write!(f, "expected {} cells, found {}", expected, found),
            Self::AtomOffGrid(p)                => write!(f, "atom at {} is outside the grid", p),
            Self::AtomOnWall(p)                 => write!(f, "atom at {} is placed on a wall", p),
            Self::AtomCollision(p)              => write!(f, "multiple atoms placed at {}", p),
            Self::GoalOffGrid(p)                => write!(f, "goal slot at {} is outside the grid", p),
            Self::GoalOnWall(p)                 => write!(f, "goal slot at {} is placed on a wall", p),
            Self::EmptyGoal                     => fmt::Display::fmt("goal molecule is empty", f),
            Self::UnknownLevel(n)               => write!(f, "no level number {}", n),
            Self::DuplicateLevel(n)             => write!(f, "level number {} defined twice", n),
        }
    }
}


/// Extension trait for `Result` and `Option`
///
/// This extension trait provides some convenience utilities such as functions
/// for reporting.
///
pub trait TryExt: Sized {
    /// Type transported/wrapped by the `Try` type
    ///
    type Output;

    /// Return the wrapped value or log
    ///
    /// If the instance transports a value, this function returns that value
    /// wrapped in an `Option`. Otherwise, the function logs the given `msg`
    /// with the given `level`.
    ///
    fn or_log(self, level: log::Level, msg: &str) -> Option<Self::Output>;

    /// Return the wrapped value or report an error
    ///
    fn or_err(self, msg: impl AsRef<str>) -> Option<Self::Output> {
        self.or_log(log::Level::Error, msg.as_ref())
    }

    /// Return the wrapped value or warn
    ///
    fn or_warn(self, msg: impl AsRef<str>) -> Option<Self::Output> {
        self.or_log(log::Level::Warn, msg.as_ref())
    }

    /// Return the wrapped value or inform
    ///
    fn or_info(self, msg: impl AsRef<str>) -> Option<Self::Output> {
        self.or_log(log::Level::Info, msg.as_ref())
    }
}

impl<T, E: StdError> TryExt for Result<T, E> {
    type Output = T;

    fn or_log(self, level: log::Level, msg: &str) -> Option<Self::Output> {
        if let Err(e) = &self {
            use fmt::Write;

            let mut err_string = msg.to_string();
            let mut err: Option<&dyn StdError> = Some(e);
            while let Some(current) = err {
                let _ = write!(err_string, ": {}", current);
                err = current.source();
            }
            log::log!(level, "{}", err_string);
        };
        self.ok()
    }
}

impl<T> TryExt for Option<T> {
    type Output = T;

    fn or_log(self, level: log::Level, msg: &str) -> Option<Self::Output> {
        if self.is_none() {
            log::log!(level, "{}", msg)
        };
        self
    }
}


/// Error type augmenting an inner error with a message
///
#[derive(Debug)]
pub struct WrappedErr {
    msg: &'static str,
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

impl WrappedErr {
    pub fn new(msg: &'static str, inner: impl StdError + Send + Sync + 'static) -> Self {
        Self {msg, inner: Box::new(inner)}
    }
}

impl StdError for WrappedErr {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl fmt::Display for WrappedErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.msg, f)
    }
}


/// Error type indicating some `Option` being `None`
///
#[derive(Default, Debug)]
pub struct NoneError;

impl StdError for NoneError {}

impl fmt::Display for NoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt("found None", f)
    }
}
