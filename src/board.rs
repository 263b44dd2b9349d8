//! Board holding the grid and the live atoms

use std::fmt;

use crate::error::{Error, LevelError};
use crate::level::{Element, Level};
use crate::util::Position;


/// Identifier of an atom
///
/// Atoms are numbered in the order in which they appear in the level, starting
/// at `0`.
///
pub type AtomId = usize;


/// A single atom on the board
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Atom {
    id: AtomId,
    element: Element,
    position: Position,
}

impl Atom {
    pub fn id(&self) -> AtomId {
        self.id
    }

    pub fn element(&self) -> Element {
        self.element
    }

    /// Retrieve the atom's current position
    ///
    pub fn position(&self) -> Position {
        self.position
    }
}


/// Grid geometry and live atom positions of a session
///
/// The board maintains the following invariants: every atom is placed within
/// the grid and not on a wall, and no two atoms share a cell.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    atoms: Vec<Atom>,
    occupants: Vec<Option<AtomId>>,
}

impl Board {
    /// Create a board from level data
    ///
    /// Atoms are placed at their start positions. The function fails with an
    /// `Error::InvalidLevel` if the level is inconsistent or if an atom would
    /// be placed outside the grid, on a wall, or on another atom.
    ///
    pub fn new(level: &Level) -> Result<Self, Error> {
        level.validate()?;

        let mut board = Self {
            width: level.width(),
            height: level.height(),
            walls: level.walls().to_vec(),
            atoms: Vec::with_capacity(level.atoms().len()),
            occupants: vec![None; level.width() * level.height()],
        };
        level.atoms().iter().try_for_each(|start| board.place(start.element, start.position))?;
        Ok(board)
    }

    /// Create a copy of this board with atoms at the given positions
    ///
    /// The `positions` are indexed by atom id. The function fails with an
    /// `Error::InvalidSnapshot` if the number of positions does not match the
    /// number of atoms or if a position violates the board's invariants.
    ///
    pub fn with_positions(&self, positions: &[Position]) -> Result<Self, Error> {
        if positions.len() != self.atoms.len() {
            return Err(Error::InvalidSnapshot(
                format!("expected {} atom positions, found {}", self.atoms.len(), positions.len())
            ))
        }

        let mut board = Self {
            atoms: Vec::with_capacity(self.atoms.len()),
            occupants: vec![None; self.occupants.len()],
            ..self.clone()
        };
        self.atoms
            .iter()
            .zip(positions)
            .try_for_each(|(atom, pos)| board.place(atom.element, *pos))
            .map_err(|e| Error::InvalidSnapshot(e.to_string()))?;
        Ok(board)
    }

    /// Place a new atom
    ///
    fn place(&mut self, element: Element, position: Position) -> Result<(), LevelError> {
        let index = self.index(position).ok_or(LevelError::AtomOffGrid(position))?;
        if self.walls[index] {
            return Err(LevelError::AtomOnWall(position))
        }
        if self.occupants[index].is_some() {
            return Err(LevelError::AtomCollision(position))
        }

        let id = self.atoms.len();
        self.atoms.push(Atom {id, element, position});
        self.occupants[index] = Some(id);
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a position lies within the grid
    ///
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Check whether a position holds a wall
    ///
    /// Positions outside the grid count as walls.
    ///
    pub fn is_wall(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.walls[i]).unwrap_or(true)
    }

    /// Check whether an atom could enter the given position
    ///
    /// A position is blocked if it is outside the grid, holds a wall or is
    /// occupied by an atom.
    ///
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.index(pos).map(|i| self.walls[i] || self.occupants[i].is_some()).unwrap_or(true)
    }

    /// Retrieve the atom occupying the given position, if any
    ///
    pub fn atom_at(&self, pos: Position) -> Option<&Atom> {
        self.index(pos).and_then(|i| self.occupants[i]).map(|id| &self.atoms[id])
    }

    /// Retrieve an atom by its id
    ///
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Retrieve all atoms, ordered by id
    ///
    pub fn atoms(&self) -> &[Atom] {
        self.atoms.as_ref()
    }

    /// Retrieve the positions of all atoms, ordered by id
    ///
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.atoms.iter().map(Atom::position)
    }

    /// Displace an atom by the given delta
    ///
    /// This is the only function altering atom positions. The caller is
    /// responsible for ensuring that the destination is free. A delta which
    /// would place the atom outside the grid is refused and reported, leaving
    /// the board unchanged.
    ///
    pub fn move_atom(&mut self, id: AtomId, dx: isize, dy: isize) {
        let from = match self.atoms.get(id) {
            Some(atom) => atom.position,
            None => {
                log::error!("Attempt to move unknown atom {}", id);
                return
            },
        };
        let (src, to, dst) = match from.offset(dx, dy).and_then(|to| Some((self.index(from)?, to, self.index(to)?))) {
            Some(indices) => indices,
            None => {
                log::error!("Attempt to move atom {} by ({}, {}) off the grid", id, dx, dy);
                return
            },
        };
        debug_assert!(src == dst || self.occupants[dst].is_none(), "destination {} is occupied", to);

        self.occupants[src] = None;
        self.occupants[dst] = Some(id);
        self.atoms[id].position = to;
    }

    /// Compute the index of a position within the grid
    ///
    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }
}

/// Renders walls as `#`, empty cells as `.` and atoms as their element
///
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        for y in 0..self.height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..self.width {
                let pos = Position::new(x, y);
                let symbol = match self.atom_at(pos) {
                    Some(atom) => atom.element.symbol(),
                    None if self.is_wall(pos) => '#',
                    None => '.',
                };
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}
