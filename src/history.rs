//! Undo history

use crate::board::Board;
use crate::error::Error;
use crate::movement::{self, Move};


/// Record of committed moves, most recent last
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct History {
    moves: Vec<Move>,
}

impl History {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record a committed move
    ///
    pub fn record(&mut self, mv: Move) {
        self.moves.push(mv)
    }

    /// Check whether there is a move to undo
    ///
    pub fn can_undo(&self) -> bool {
        !self.moves.is_empty()
    }

    /// Revert the most recent move
    ///
    /// The move is removed from the history and its inverse displacement is
    /// applied to the board directly. The reverted move is returned. If there
    /// is no move to undo, this function returns `Error::EmptyHistory`.
    ///
    pub fn undo(&mut self, board: &mut Board) -> Result<Move, Error> {
        let mv = self.moves.pop().ok_or(Error::EmptyHistory)?;
        movement::commit(board, &mv.inverse());
        Ok(mv)
    }

    /// Retrieve the most recent move
    ///
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Iterate over all moves, oldest first
    ///
    pub fn iter(&self) -> impl Iterator<Item = &Move> + '_ {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Forget all moves
    ///
    pub fn clear(&mut self) {
        self.moves.clear()
    }
}
