//! Sliding atom puzzle engine
//!
//! Atoms sit on a grid-based level. When pushed in one of four directions, an
//! atom slides until it is blocked by a wall or another atom. A level is solved
//! once the atoms form the level's goal molecule.
//!
//! Levels are represented by [level::Level], either constructed in code or
//! parsed from text. A [session::Session] holds the state of a single
//! play-through: the [board::Board] with the live atom positions, the
//! [history::History] of committed moves and a [timer::Timer] accruing play
//! time. Sessions may be captured as and restored from a
//! [snapshot::Snapshot].

#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

pub mod board;
pub mod error;
pub mod goal;
pub mod history;
pub mod level;
pub mod movement;
pub mod session;
pub mod snapshot;
pub mod timer;
pub mod util;


pub use error::{Error, LevelError};
pub use level::{Level, LevelPack};
pub use session::{Notice, Observer, Session, State, WinReport};
pub use snapshot::Snapshot;
pub use util::{Direction, Position, Region};
