//! Level tests

use crate::board::Board;
use crate::error::Error;

use super::*;


const WATER: &str = concat!(
    "; water, the classic first level\n",
    "level 1\n",
    "board\n",
    "#######\n",
    "#H....#\n",
    "#..#..#\n",
    "#O...H#\n",
    "#######\n",
    "goal 2 1\n",
    "HOH\n",
    "end\n",
);


fn element(c: char) -> Element {
    Element::try_from(c).expect("Invalid element")
}


#[test]
fn parse_level() {
    let level: Level = WATER.parse().expect("Could not parse level");

    assert_eq!(level.number(), 1);
    assert_eq!(level.width(), 7);
    assert_eq!(level.height(), 5);
    assert_eq!(level.rule(), MatchRule::AllAtoms);
    assert!(level.is_wall(Position::new(0, 0)));
    assert!(level.is_wall(Position::new(3, 2)));
    assert!(!level.is_wall(Position::new(2, 2)));
    assert!(level.is_wall(Position::new(7, 1)));
    assert_eq!(
        level.atoms(),
        &[
            AtomStart::new(element('H'), Position::new(1, 1)),
            AtomStart::new(element('O'), Position::new(1, 3)),
            AtomStart::new(element('H'), Position::new(5, 3)),
        ][..]
    );
    assert_eq!(level.goal().anchor(), Position::new(2, 1));
    assert_eq!(
        level.goal().cells().collect::<Vec<_>>(),
        vec![
            (Position::new(2, 1), element('H')),
            (Position::new(3, 1), element('O')),
            (Position::new(4, 1), element('H')),
        ]
    );
    assert_eq!(level.validate(), Ok(()));
}


#[test]
fn parse_pack() {
    let text = format!("{}\n{}", WATER, WATER.replace("level 1", "level 2").replace("goal 2 1", "goal 1 1 subset"));
    let pack: LevelPack = text.parse().expect("Could not parse pack");

    assert_eq!(pack.len(), 2);
    assert_eq!(pack.numbers().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(pack.get(2).map(|l| l.rule()), Ok(MatchRule::Subset));
    assert_eq!(pack.get(2).map(|l| l.goal().anchor()), Ok(Position::new(1, 1)));
    assert_eq!(pack.get(3), Err(LevelError::UnknownLevel(3)));
}


#[test]
fn duplicate_level() {
    let text = format!("{}{}", WATER, WATER);
    assert_eq!(text.parse::<LevelPack>().err(), Some(LevelError::DuplicateLevel(1)));
}


#[test]
fn ragged_rows_are_padded() {
    let level: Level = "level 4\nboard\n####\n#H\n####\ngoal 1 1\nH\nend\n".parse().expect("Could not parse level");
    assert_eq!(level.width(), 4);
    assert_eq!(level.walls().len(), 12);
    assert!(!level.is_wall(Position::new(3, 1)));
}


#[test]
fn blank_rows_are_kept() {
    let text = "level 5\nboard\n#####\n#H..#\n     \n#..O#\n#####\ngoal 1 1 subset\nH\nend\n";
    let level: Level = text.parse().expect("Could not parse level");
    assert_eq!(level.height(), 5);
    assert_eq!(level.width(), 5);
    assert!(!level.is_wall(Position::new(0, 2)));
    assert_eq!(level.atoms()[1], AtomStart::new(element('O'), Position::new(3, 3)));

    let text = "level 5\nboard\n#####\n#H..#\n\n#..O#\n#####\ngoal 1 1\nH\nend\n";
    assert_eq!(text.parse::<Level>().err(), Some(LevelError::parse(6, "expected 'goal'")));
}


#[test]
fn blank_lines_between_levels() {
    let text = format!("\n\n{}\n  \n\r\n{}\n\n", WATER, WATER.replace("level 1", "level 2"));
    let pack: LevelPack = text.parse().expect("Could not parse pack");
    assert_eq!(pack.numbers().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(pack.get(2).map(|l| l.height()), Ok(5));
}


#[test]
fn parse_errors() {
    assert_eq!(
        "board\n".parse::<Level>().err(),
        Some(LevelError::parse(1, "expected 'level'"))
    );
    assert_eq!(
        "level x\n".parse::<Level>().err(),
        Some(LevelError::parse(1, "expected level number"))
    );
    assert_eq!(
        "level 1\nboard\n#H*#\ngoal 1 1\nH\nend\n".parse::<Level>().err(),
        Some(LevelError::parse(3, "expected 'goal'"))
    );
    assert_eq!(
        "level 1\nboard\n#H.#\ngoal 1\nH\nend\n".parse::<Level>().err(),
        Some(LevelError::parse(4, "expected goal anchor coordinates"))
    );
    assert_eq!(
        "level 1\nboard\n#H.#\ngoal 1 0 most\nH\nend\n".parse::<Level>().err(),
        Some(LevelError::parse(4, "unknown match rule 'most'"))
    );
    assert_eq!(
        "level 1\nboard\n#H.#\ngoal 1 0\nH#\nend\n".parse::<Level>().err(),
        Some(LevelError::parse(5, "unexpected character '#' in goal"))
    );
    assert!(matches!(
        "level 1\nboard\n#H.#\ngoal 1 0\nH\n".parse::<Level>().err(),
        Some(LevelError::Parse{line: 0, ..})
    ));
    assert_eq!(
        format!("{}level", WATER).parse::<Level>().err(),
        Some(LevelError::parse(12, "unexpected content after level"))
    );
}


#[test]
fn validate_goal() {
    let atoms = vec![AtomStart::new(element('H'), Position::new(1, 1))];

    let level = Level::bordered(1, 4, 4, atoms.clone(), Molecule::new(Position::new(3, 1), vec![(Position::new(0, 0), element('H'))]));
    assert_eq!(level.validate(), Err(LevelError::GoalOnWall(Position::new(3, 1))));

    let level = Level::bordered(1, 4, 4, atoms.clone(), Molecule::new(Position::new(2, 4), vec![(Position::new(0, 0), element('H'))]));
    assert_eq!(level.validate(), Err(LevelError::GoalOffGrid(Position::new(2, 4))));

    let level = Level::bordered(1, 4, 4, atoms.clone(), Molecule::new(Position::new(2, 1), vec![]));
    assert_eq!(level.validate(), Err(LevelError::EmptyGoal));

    let goal = Molecule::new(Position::new(2, 1), vec![(Position::new(0, 0), element('H'))]);
    let level = Level::new(1, 4, 4, vec![false; 15], atoms, goal);
    assert_eq!(level.validate(), Err(LevelError::SizeMismatch{expected: 16, found: 15}));
}


#[test]
fn bordered_walls() {
    let goal = Molecule::new(Position::new(1, 1), vec![(Position::new(0, 0), element('C'))]);
    let level = Level::bordered(9, 4, 3, Vec::new(), goal);
    let rendered: String = level.walls().iter().map(|w| if *w { '#' } else { '.' }).collect();
    assert_eq!(rendered, "#####..#####");
}


#[test]
fn molecule_pattern() {
    let goal = Molecule::new(
        Position::new(3, 3),
        vec![
            (Position::new(1, 1), element('H')),
            (Position::new(1, 0), element('O')),
            (Position::new(0, 0), element('H')),
        ],
    );
    assert_eq!(goal.to_string(), "HO\n.H");
    assert_eq!(goal.slots()[0], (Position::new(0, 0), element('H')));
    assert_eq!(goal.len(), 3);
}


#[test]
fn element_symbols() {
    assert_eq!(Element::try_from('O').map(Element::symbol), Ok('O'));
    assert_eq!(Element::try_from('o'), Err('o'));
    assert_eq!(Element::try_from('#'), Err('#'));
}


#[test]
fn goal_beyond_coordinate_range() {
    let text = format!("level 1\nboard\n####\n#H.#\n####\ngoal {} 1\n.H\nend\n", usize::MAX);
    let level: Level = text.parse().expect("Could not parse level");
    assert_eq!(level.validate(), Err(LevelError::GoalOffGrid(Position::new(usize::MAX, 1))));
    assert!(matches!(
        Board::new(&level),
        Err(Error::InvalidLevel(LevelError::GoalOffGrid(_)))
    ));
}
