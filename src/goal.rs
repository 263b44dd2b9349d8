//! Goal molecule matching

use crate::board::Board;
use crate::level::{Element, Level, MatchRule, Molecule};
use crate::util::Position;


/// Check whether the atoms on the board form the goal molecule
///
/// A slot is filled if an atom of the slot's element occupies the slot's
/// absolute position. Under `MatchRule::AllAtoms`, every atom on the board must
/// additionally be part of the molecule.
///
pub fn matches(board: &Board, goal: &Molecule, rule: MatchRule) -> bool {
    let filled = unfilled(board, goal).next().is_none();
    match rule {
        MatchRule::AllAtoms => filled && board.atoms().len() == goal.len(),
        MatchRule::Subset   => filled,
    }
}


/// Check whether the level's goal is met on the board
///
pub fn is_solved(board: &Board, level: &Level) -> bool {
    matches(board, level.goal(), level.rule())
}


/// Retrieve the goal slots not yet filled by a matching atom
///
pub fn unfilled<'a>(
    board: &'a Board,
    goal: &'a Molecule,
) -> impl Iterator<Item = (Position, Element)> + 'a {
    goal.cells().filter(move |(pos, element)| board.atom_at(*pos).map(|a| a.element()) != Some(*element))
}


#[cfg(test)]
mod tests;
