//! Move resolution and move records

use crate::board::{AtomId, Board};
use crate::error::Error;
use crate::util::{Direction, Position, Region};


/// A committed displacement of a single atom
///
/// A move always displaces its atom along a single axis by at least one cell.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    atom: AtomId,
    from: Position,
    to: Position,
}

impl Move {
    pub fn atom(&self) -> AtomId {
        self.atom
    }

    /// Retrieve the position the atom left
    ///
    pub fn from(&self) -> Position {
        self.from
    }

    /// Retrieve the position the atom came to rest at
    ///
    pub fn to(&self) -> Position {
        self.to
    }

    /// Retrieve the displacement as a signed delta
    ///
    pub fn delta(&self) -> (isize, isize) {
        self.from.delta_to(self.to)
    }

    /// Retrieve the direction of the slide
    ///
    pub fn direction(&self) -> Option<Direction> {
        let (dx, dy) = self.delta();
        Direction::of_delta(dx, dy)
    }

    /// Retrieve the number of cells the atom travelled
    ///
    pub fn distance(&self) -> usize {
        let (dx, dy) = self.delta();
        dx.unsigned_abs() + dy.unsigned_abs()
    }

    /// Retrieve the move reverting this one
    ///
    pub fn inverse(&self) -> Self {
        Self {atom: self.atom, from: self.to, to: self.from}
    }

    /// Retrieve the region of cells affected by the move
    ///
    pub fn region(&self) -> Region {
        Region::spanning(self.from, self.to)
    }
}


/// Cells an atom at `start` would pass through when sliding in `direction`
///
/// The path ends with the last cell before the first blocked one. It does not
/// include `start` itself.
///
pub fn slide_path(
    board: &Board,
    start: Position,
    direction: Direction,
) -> impl Iterator<Item = Position> + '_ {
    std::iter::successors(start + direction, move |p| *p + direction)
        .take_while(move |p| !board.is_blocked(*p))
}


/// Resolve a slide of an atom
///
/// The atom slides until the next cell is blocked. If the atom cannot leave its
/// cell at all, the function returns `Error::NoMove`. The board is not altered.
///
pub fn resolve(board: &Board, atom: AtomId, direction: Direction) -> Result<Move, Error> {
    let from = board.atom(atom).ok_or(Error::UnknownAtom(atom))?.position();
    slide_path(board, from, direction)
        .last()
        .map(|to| Move {atom, from, to})
        .ok_or(Error::NoMove)
}


/// Apply a move to a board
///
pub fn commit(board: &mut Board, mv: &Move) {
    let (dx, dy) = mv.delta();
    board.move_atom(mv.atom, dx, dy)
}
