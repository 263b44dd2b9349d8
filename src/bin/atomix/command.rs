//! Console commands

use std::error::Error;
use std::fmt;
use std::str::FromStr;

use tokio::io;
use tokio_util::codec;

use atomix::board::AtomId;
use atomix::Direction;


/// Maximum length of a single command line
///
const MAX_LINE_LEN: usize = 256;


/// A command issued by the player
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Slide an atom
    Move(AtomId, Direction),
    /// Revert the most recent move
    Undo,
    /// Show the board
    Board,
    /// Show the goal molecule
    Goal,
    /// Show the session's progress
    Status,
    /// Stop the timer and save the game
    Pause,
    /// Restart the timer
    Resume,
    /// Save the game
    Save,
    /// Switch to the level with the given number
    Level(u32),
    /// Switch to the level following the current one
    Next,
    /// List commands
    Help,
    /// End the session
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some("move") | Some("m") => {
                let atom = argument(&mut words, "atom")?;
                let direction = argument(&mut words, "direction")?;
                Self::Move(atom, direction)
            },
            Some("undo")    => Self::Undo,
            Some("board")   => Self::Board,
            Some("goal")    => Self::Goal,
            Some("status")  => Self::Status,
            Some("pause")   => Self::Pause,
            Some("resume")  => Self::Resume,
            Some("save")    => Self::Save,
            Some("level")   => Self::Level(argument(&mut words, "level number")?),
            Some("next")    => Self::Next,
            Some("help")    => Self::Help,
            Some("quit")    => Self::Quit,
            Some(other)     => return Err(CommandError::Unknown(other.to_string())),
            None            => return Err(CommandError::Unknown(Default::default())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::TrailingInput(extra.to_string())),
            None => Ok(command),
        }
    }
}


/// Parse the next word as the argument with the given name
///
fn argument<'a, T: FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, CommandError> {
    let word = words.next().ok_or(CommandError::MissingArgument(name))?;
    word.parse().map_err(|_| CommandError::InvalidArgument(name, word.to_string()))
}


/// Error indicating a malformed command line
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The command is not known
    Unknown(String),
    /// A required argument was not supplied
    MissingArgument(&'static str),
    /// An argument could not be parsed
    InvalidArgument(&'static str, String),
    /// The command line contained more words than expected
    TrailingInput(String),
    /// The command line is not valid UTF-8
    NotUtf8,
}

impl Error for CommandError {}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(c)                => write!(f, "no such command '{}'", c),
            Self::MissingArgument(name)     => write!(f, "expected {}", name),
            Self::InvalidArgument(name, v)  => write!(f, "invalid {} '{}'", name, v),
            Self::TrailingInput(w)          => write!(f, "unexpected '{}'", w),
            Self::NotUtf8                   => fmt::Display::fmt("command is not valid UTF-8", f),
        }
    }
}


/// Decoder for line-based commands
///
/// Each non-blank line yields either a `Command` or a `CommandError`. A
/// malformed line does not terminate the stream.
///
#[derive(Default)]
pub struct CommandDecoder {}

impl codec::Decoder for CommandDecoder {
    type Item = Result<Command, CommandError>;
    type Error = io::Error;

    fn decode(
        &mut self,
        src: &mut bytes::BytesMut
    ) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(end) = src.iter().position(|b| *b == b'\n') {
            let line = src.split_to(end + 1);
            if let Some(command) = parse_line(&line[..end]) {
                return Ok(Some(command))
            }
        }

        if src.len() > MAX_LINE_LEN {
            Err(io::Error::new(io::ErrorKind::InvalidData, "command line too long"))
        } else {
            src.reserve(MAX_LINE_LEN - src.len());
            Ok(None)
        }
    }

    fn decode_eof(
        &mut self,
        src: &mut bytes::BytesMut
    ) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(command) = self.decode(src)? {
            return Ok(Some(command))
        }

        let rest = src.split();
        Ok(parse_line(&rest))
    }
}


/// Parse a single line, skipping blank ones
///
fn parse_line(line: &[u8]) -> Option<Result<Command, CommandError>> {
    match std::str::from_utf8(line).map(str::trim) {
        Ok("")      => None,
        Ok(line)    => Some(line.parse()),
        Err(_)      => Some(Err(CommandError::NotUtf8)),
    }
}
