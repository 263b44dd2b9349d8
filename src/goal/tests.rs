//! Goal matching tests

use crate::level::Level;
use crate::tests::{element, ArbitraryLevel};

use super::*;


fn setup(text: &str) -> (Board, Level) {
    let level: Level = text.parse().expect("Could not parse level");
    (Board::new(&level).expect("Could not create board"), level)
}


#[test]
fn all_atoms_in_place() {
    let (board, level) = setup("level 1\nboard\n#####\n#HOH#\n#####\ngoal 1 1\nHOH\nend\n");
    assert!(is_solved(&board, &level));
    assert_eq!(unfilled(&board, level.goal()).count(), 0);
}


#[test]
fn wrong_element() {
    let (board, level) = setup("level 1\nboard\n#####\n#HHO#\n#####\ngoal 1 1\nHOH\nend\n");
    assert!(!is_solved(&board, &level));
    assert_eq!(
        unfilled(&board, level.goal()).collect::<Vec<_>>(),
        vec![(Position::new(2, 1), element('O')), (Position::new(3, 1), element('H'))]
    );
}


#[test]
fn extra_atoms() {
    let text = "level 1\nboard\n######\n#HO.C#\n######\ngoal 1 1 subset\nHO\nend\n";
    let (board, level) = setup(text);
    assert!(is_solved(&board, &level));
    assert!(!matches(&board, level.goal(), MatchRule::AllAtoms));

    let (board, level) = setup(&text.replace(" subset", ""));
    assert_eq!(level.rule(), MatchRule::AllAtoms);
    assert!(!is_solved(&board, &level));
}


#[test]
fn goal_elsewhere() {
    let (board, level) = setup("level 1\nboard\n#####\n#HO.#\n#...#\n#####\ngoal 1 2\nHO\nend\n");
    assert!(!is_solved(&board, &level));
    assert_eq!(unfilled(&board, level.goal()).count(), 2);
}


#[quickcheck]
fn subset_is_weaker(level: ArbitraryLevel) -> bool {
    let board = Board::new(&level.0).expect("Could not create board");
    let goal = level.0.goal();
    !matches(&board, goal, MatchRule::AllAtoms) || matches(&board, goal, MatchRule::Subset)
}
