//! Level data, level text format and level packs
//!
//! Levels are plain, immutable data. They are either built in code via
//! `Level::new` or parsed from text. A text may contain several levels, which
//! are then collected in a `LevelPack`:
//!
//! ```text
//! ; comment
//! level 1
//! board
//! #####
//! #H..#
//! #..O#
//! #####
//! goal 2 1 all
//! HO
//! end
//! ```
//!
//! Board rows use `#` for walls, `.` or a space for empty cells and uppercase
//! letters for atoms. The `goal` line names the anchor cell of the goal
//! molecule and, optionally, the match rule (`all` or `subset`). The rows
//! following it hold the molecule's pattern, with letters for slots and `.`
//! or spaces for gaps.
//!
//! An empty line ends a grid, while a line of spaces is a row of empty cells.

use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::LevelError;
use crate::util::Position;


/// Element identifier of an atom
///
/// Elements are identified by an uppercase ASCII letter.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Element(char);

impl Element {
    /// Retrieve the letter identifying the element
    ///
    pub fn symbol(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Element {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        if value.is_ascii_uppercase() {
            Ok(Self(value))
        } else {
            Err(value)
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        f.write_char(self.0)
    }
}


/// Initial placement of an atom
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtomStart {
    pub element: Element,
    pub position: Position,
}

impl AtomStart {
    pub fn new(element: Element, position: Position) -> Self {
        Self {element, position}
    }
}


/// Target molecule
///
/// A molecule consists of slots, each holding an element at an offset relative
/// to the molecule's anchor. The anchor fixes the molecule's absolute position
/// on the board.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Molecule {
    anchor: Position,
    slots: Vec<(Position, Element)>,
}

impl Molecule {
    /// Create a molecule from an anchor and slots at relative offsets
    ///
    pub fn new(anchor: Position, slots: impl IntoIterator<Item = (Position, Element)>) -> Self {
        let mut slots: Vec<_> = slots.into_iter().collect();
        slots.sort_by_key(|(offset, _)| (offset.y, offset.x));
        slots.dedup_by_key(|(offset, _)| *offset);
        Self {anchor, slots}
    }

    /// Retrieve the anchor
    ///
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Retrieve the slots with their relative offsets
    ///
    pub fn slots(&self) -> &[(Position, Element)] {
        self.slots.as_ref()
    }

    /// Retrieve the slots with their absolute positions
    ///
    pub fn cells(&self) -> impl Iterator<Item = (Position, Element)> + '_ {
        self.slots.iter().map(move |(offset, element)| (self.anchor.saturating_add(*offset), *element))
    }

    /// Retrieve the number of slots
    ///
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Renders the molecule's pattern, without the anchor
///
impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;

        let width = self.slots.iter().map(|(o, _)| o.x + 1).max().unwrap_or(0);
        let height = self.slots.iter().map(|(o, _)| o.y + 1).max().unwrap_or(0);
        for y in 0..height {
            if y > 0 {
                f.write_char('\n')?;
            }
            for x in 0..width {
                let symbol = self
                    .slots
                    .iter()
                    .find(|(o, _)| *o == Position::new(x, y))
                    .map(|(_, e)| e.symbol())
                    .unwrap_or('.');
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}


/// Rule deciding when the goal molecule counts as assembled
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Every slot is filled and every atom on the board is part of the molecule
    AllAtoms,
    /// Every slot is filled, other atoms may be anywhere
    Subset,
}

impl Default for MatchRule {
    fn default() -> Self {
        Self::AllAtoms
    }
}

impl FromStr for MatchRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::AllAtoms),
            "subset" => Ok(Self::Subset),
            s => Err(format!("unknown match rule '{}'", s)),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllAtoms  => fmt::Display::fmt("all", f),
            Self::Subset    => fmt::Display::fmt("subset", f),
        }
    }
}


/// A single level
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    number: u32,
    width: usize,
    height: usize,
    walls: Vec<bool>,
    atoms: Vec<AtomStart>,
    goal: Molecule,
    rule: MatchRule,
}

impl Level {
    /// Create a new level
    ///
    /// The wall mask `walls` is expected to hold `width * height` entries in
    /// row-major order. The level is not validated at this point. Malformed
    /// data is rejected when a board is created from the level.
    ///
    pub fn new(
        number: u32,
        width: usize,
        height: usize,
        walls: Vec<bool>,
        atoms: Vec<AtomStart>,
        goal: Molecule,
    ) -> Self {
        Self {number, width, height, walls, atoms, goal, rule: Default::default()}
    }

    /// Create a new level surrounded by walls
    ///
    /// All border cells will be walls, all other cells will be empty.
    ///
    pub fn bordered(
        number: u32,
        width: usize,
        height: usize,
        atoms: Vec<AtomStart>,
        goal: Molecule,
    ) -> Self {
        let walls = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| x == 0 || y == 0 || x + 1 == width || y + 1 == height)
            .collect();
        Self::new(number, width, height, walls, atoms, goal)
    }

    /// Replace the match rule
    ///
    pub fn with_rule(self, rule: MatchRule) -> Self {
        Self {rule, ..self}
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn walls(&self) -> &[bool] {
        self.walls.as_ref()
    }

    pub fn atoms(&self) -> &[AtomStart] {
        self.atoms.as_ref()
    }

    pub fn goal(&self) -> &Molecule {
        &self.goal
    }

    pub fn rule(&self) -> MatchRule {
        self.rule
    }

    /// Check whether a position lies within the grid
    ///
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Check whether a position holds a wall
    ///
    /// Positions outside the grid are considered walls.
    ///
    pub fn is_wall(&self, pos: Position) -> bool {
        !self.contains(pos) || self.walls.get(pos.y * self.width + pos.x).copied().unwrap_or(true)
    }

    /// Check the grid and goal for consistency
    ///
    /// Atom placement is checked by the board.
    ///
    pub fn validate(&self) -> Result<(), LevelError> {
        let expected = self.width * self.height;
        if self.walls.len() != expected {
            return Err(LevelError::SizeMismatch{expected, found: self.walls.len()})
        }
        if self.goal.is_empty() {
            return Err(LevelError::EmptyGoal)
        }
        self.goal.cells().try_for_each(|(pos, _)| if !self.contains(pos) {
            Err(LevelError::GoalOffGrid(pos))
        } else if self.is_wall(pos) {
            Err(LevelError::GoalOnWall(pos))
        } else {
            Ok(())
        })
    }
}

impl FromStr for Level {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = content_lines(s).peekable();
        let level = parse_level(&mut lines)?;
        match skip_blank(&mut lines) {
            Some(n) => Err(LevelError::parse(n, "unexpected content after level")),
            None => Ok(level),
        }
    }
}


/// Collection of levels, keyed by level number
///
#[derive(Clone, Debug, Default)]
pub struct LevelPack {
    levels: BTreeMap<u32, Arc<Level>>,
}

impl LevelPack {
    /// Add a level to the pack
    ///
    pub fn insert(&mut self, level: Level) -> Result<(), LevelError> {
        let number = level.number();
        if self.levels.contains_key(&number) {
            return Err(LevelError::DuplicateLevel(number))
        }
        self.levels.insert(number, Arc::new(level));
        Ok(())
    }

    /// Retrieve the level with the given number
    ///
    pub fn get(&self, number: u32) -> Result<Arc<Level>, LevelError> {
        self.levels.get(&number).cloned().ok_or(LevelError::UnknownLevel(number))
    }

    /// Retrieve the numbers of all levels, in ascending order
    ///
    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromStr for LevelPack {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = content_lines(s).peekable();
        let mut pack: Self = Default::default();
        while skip_blank(&mut lines).is_some() {
            pack.insert(parse_level(&mut lines)?)?;
        }
        Ok(pack)
    }
}


/// Numbered lines of a level text, without comments
///
/// Blank lines are kept since a line of spaces may be a grid row.
///
fn content_lines(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.lines()
        .enumerate()
        .map(|(n, l)| (n + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.trim_start().starts_with(';'))
}


/// Skip blank lines
///
/// Returns the number of the next non-blank line, if any.
///
fn skip_blank<'a>(lines: &mut std::iter::Peekable<impl Iterator<Item = (usize, &'a str)>>) -> Option<usize> {
    while lines.next_if(|(_, l)| l.trim().is_empty()).is_some() {}
    lines.peek().map(|(n, _)| *n)
}


/// Parse a single level, consuming its lines
///
fn parse_level<'a>(
    lines: &mut std::iter::Peekable<impl Iterator<Item = (usize, &'a str)>>
) -> Result<Level, LevelError> {
    let (n, mut words) = keyword(lines, "level")?;
    let number = words
        .next()
        .and_then(|w| w.parse().ok())
        .ok_or_else(|| LevelError::parse(n, "expected level number"))?;

    keyword(lines, "board")?;
    let rows = grid_rows(lines);
    let width = rows.iter().map(|(_, r)| r.chars().count()).max().unwrap_or(0);
    let height = rows.len();

    let mut walls = Vec::with_capacity(width * height);
    let mut atoms = Vec::new();
    for (y, (n, row)) in rows.into_iter().enumerate() {
        let mut cells = row.chars().chain(std::iter::repeat(' ')).take(width).enumerate();
        cells.try_for_each(|(x, c)| {
            match cell(c) {
                Some(Cell::Wall) => walls.push(true),
                Some(Cell::Empty) => walls.push(false),
                Some(Cell::Atom(element)) => {
                    walls.push(false);
                    atoms.push(AtomStart::new(element, Position::new(x, y)));
                },
                None => return Err(LevelError::parse(n, format!("unexpected character '{}'", c))),
            }
            Ok(())
        })?;
    }

    let (n, mut words) = keyword(lines, "goal")?;
    let mut coord = || words
        .next()
        .and_then(|w| w.parse().ok())
        .ok_or_else(|| LevelError::parse(n, "expected goal anchor coordinates"));
    let anchor = Position::new(coord()?, coord()?);
    let rule = words
        .next()
        .map(str::parse::<MatchRule>)
        .transpose()
        .map_err(|e| LevelError::parse(n, e))?
        .unwrap_or_default();

    let mut slots = Vec::new();
    for (y, (n, row)) in grid_rows(lines).into_iter().enumerate() {
        row.chars().enumerate().try_for_each(|(x, c)| {
            match cell(c) {
                Some(Cell::Empty) => (),
                Some(Cell::Atom(element)) => slots.push((Position::new(x, y), element)),
                _ => return Err(LevelError::parse(n, format!("unexpected character '{}' in goal", c))),
            }
            Ok(())
        })?;
    }

    keyword(lines, "end")?;

    Ok(Level::new(number, width, height, walls, atoms, Molecule::new(anchor, slots)).with_rule(rule))
}


/// Consume a line starting with the given keyword
///
/// On success, the line number and the remaining words are returned.
///
fn keyword<'a>(
    lines: &mut std::iter::Peekable<impl Iterator<Item = (usize, &'a str)>>,
    expected: &str,
) -> Result<(usize, std::str::SplitWhitespace<'a>), LevelError> {
    skip_blank(lines);
    match lines.next() {
        Some((n, line)) => {
            let mut words = line.split_whitespace();
            if words.next() == Some(expected) {
                Ok((n, words))
            } else {
                Err(LevelError::parse(n, format!("expected '{}'", expected)))
            }
        },
        None => Err(LevelError::parse(0, format!("unexpected end of input, expected '{}'", expected))),
    }
}


/// Consume consecutive grid rows
///
/// An empty line ends the grid. A line holding only spaces is a row of empty
/// cells. Trailing spaces are stripped from the rows returned.
///
fn grid_rows<'a>(
    lines: &mut std::iter::Peekable<impl Iterator<Item = (usize, &'a str)>>
) -> Vec<(usize, &'a str)> {
    std::iter::from_fn(|| lines.next_if(|(_, l)| !l.is_empty() && l.chars().all(|c| cell(c).is_some())))
        .map(|(n, l)| (n, l.trim_end_matches(' ')))
        .collect()
}


/// Contents of a single cell in the level text
///
enum Cell {
    Wall,
    Empty,
    Atom(Element),
}

fn cell(c: char) -> Option<Cell> {
    match c {
        '#' => Some(Cell::Wall),
        '.' | ' ' => Some(Cell::Empty),
        c => Element::try_from(c).ok().map(Cell::Atom),
    }
}


#[cfg(test)]
mod tests;
