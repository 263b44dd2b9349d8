//! Game session state machine
//!
//! A [Session] aggregates everything belonging to a single play-through of a
//! level: the board with the live atom positions, the undo history, the timer
//! and the move counter. Hosts drive a session through synchronous calls and
//! learn about changes via [Observer]s.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::board::{AtomId, Board};
use crate::error::{Error, TryExt};
use crate::goal;
use crate::history::History;
use crate::level::Level;
use crate::movement::{self, Move};
use crate::snapshot::Snapshot;
use crate::timer::{Clock, SystemClock, Timer};
use crate::util::{Direction, Region};


/// Progress of a session
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    InProgress,
    Won,
}


/// Summary of a solved level
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WinReport {
    pub level: u32,
    pub seconds: u64,
    pub moves: u32,
}


/// Notification emitted by a session
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// The board changed, optionally only within the given region
    Redraw(Option<Region>),
    /// The level was solved
    Won(WinReport),
}


/// Receiver of session notifications
///
/// Callbacks are invoked synchronously from within the mutating operation,
/// after the session's state was updated.
///
pub trait Observer {
    /// Called after the board changed
    ///
    /// If `region` is `Some`, only cells within that region changed.
    ///
    fn redraw(&mut self, _region: Option<Region>) {}

    /// Called once when the session transitions to `State::Won`
    ///
    fn won(&mut self, _report: &WinReport) {}
}

/// Forwards notifications to a channel, e.g. to a host's console task
///
impl Observer for mpsc::UnboundedSender<Notice> {
    fn redraw(&mut self, region: Option<Region>) {
        self.send(Notice::Redraw(region)).or_warn("Could not forward redraw");
    }

    fn won(&mut self, report: &WinReport) {
        self.send(Notice::Won(*report)).or_warn("Could not forward win");
    }
}


/// A single play-through of a level
///
pub struct Session<C: Clock = SystemClock> {
    level: Arc<Level>,
    board: Board,
    history: History,
    timer: Timer<C>,
    moves: u32,
    state: State,
    observers: Vec<Box<dyn Observer + Send + Sync>>,
}

impl Session<SystemClock> {
    /// Start a new session for the given level
    ///
    /// The session's timer follows the system clock.
    ///
    pub fn start(level: Arc<Level>) -> Result<Self, Error> {
        Self::with_clock(level, Default::default())
    }
}

impl<C: Clock> Session<C> {
    /// Start a new session for the given level, using a specific clock
    ///
    /// Atoms are placed at their start positions, the history is empty and
    /// the timer is started immediately.
    ///
    pub fn with_clock(level: Arc<Level>, clock: C) -> Result<Self, Error> {
        let board = Board::new(&level)?;
        let mut timer = Timer::new(clock);
        timer.start();

        log::info!("Starting level {}", level.number());
        Ok(Self {
            level,
            board,
            history: Default::default(),
            timer,
            moves: 0,
            state: State::InProgress,
            observers: Default::default(),
        })
    }

    /// Reconstruct a session from a snapshot
    ///
    /// The snapshot must refer to the given level and its atom positions must
    /// be valid for that level. The restored session has an empty history. An
    /// unfinished session has its timer running, a finished one is `Won`.
    ///
    pub fn restore(level: Arc<Level>, snapshot: &Snapshot, clock: C) -> Result<Self, Error> {
        if snapshot.level != level.number() {
            return Err(Error::InvalidSnapshot(
                format!("snapshot is for level {}, not level {}", snapshot.level, level.number())
            ))
        }

        let board = Board::new(&level)?.with_positions(&snapshot.atoms)?;
        let mut timer = Timer::resume_from(clock, snapshot.seconds);
        let state = if snapshot.finished {
            State::Won
        } else {
            timer.start();
            State::InProgress
        };

        log::info!("Resuming level {} after {} moves", level.number(), snapshot.moves);
        Ok(Self {
            level,
            board,
            history: Default::default(),
            timer,
            moves: snapshot.moves,
            state,
            observers: Default::default(),
        })
    }

    /// Slide an atom in the given direction
    ///
    /// On success, the move is recorded, observers are asked to redraw the
    /// affected region and the goal is checked. If the goal is met, the session
    /// transitions to `State::Won`. Rejected moves leave the session unchanged.
    ///
    pub fn apply_move(&mut self, atom: AtomId, direction: Direction) -> Result<Move, Error> {
        self.ensure_in_progress()?;

        let mv = movement::resolve(&self.board, atom, direction)?;
        movement::commit(&mut self.board, &mv);
        self.history.record(mv);
        self.moves += 1;
        log::debug!("Atom {} slid {} from {} to {}", atom, direction, mv.from(), mv.to());

        let region = mv.region();
        self.observers.iter_mut().for_each(|o| o.redraw(Some(region)));

        if goal::is_solved(&self.board, &self.level) {
            self.win()
        }
        Ok(mv)
    }

    /// Revert the most recent move
    ///
    /// The goal is not checked after an undo.
    ///
    pub fn undo(&mut self) -> Result<Move, Error> {
        self.ensure_in_progress()?;

        let mv = self.history.undo(&mut self.board)?;
        self.moves = self.moves.saturating_sub(1);
        log::debug!("Reverted move of atom {} back to {}", mv.atom(), mv.from());

        self.observers.iter_mut().for_each(|o| o.redraw(None));
        Ok(mv)
    }

    /// Check whether there is a move to undo
    ///
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.timer.elapsed_seconds()
    }

    pub fn move_count(&self) -> u32 {
        self.moves
    }

    pub fn is_won(&self) -> bool {
        self.state == State::Won
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Resume accruing play time
    ///
    /// This has no effect on a won session.
    ///
    pub fn start_timer(&mut self) {
        if self.state == State::InProgress {
            self.timer.start()
        }
    }

    /// Pause accruing play time
    ///
    pub fn stop_timer(&mut self) {
        self.timer.stop()
    }

    /// Retrieve the number of the level to offer after this one
    ///
    pub fn next_level(&self) -> u32 {
        self.level.number().saturating_add(1)
    }

    /// Capture the current state as a snapshot
    ///
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            level: self.level.number(),
            atoms: self.board.positions().collect(),
            moves: self.moves,
            seconds: self.timer.elapsed_seconds(),
            finished: self.is_won(),
        }
    }

    /// Register an observer
    ///
    pub fn subscribe(&mut self, observer: impl Observer + Send + Sync + 'static) {
        self.observers.push(Box::new(observer))
    }

    pub fn level(&self) -> &Arc<Level> {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn timer(&self) -> &Timer<C> {
        &self.timer
    }

    /// Transition to `State::Won`
    ///
    fn win(&mut self) {
        self.timer.stop();
        self.state = State::Won;

        let report = WinReport {
            level: self.level.number(),
            seconds: self.timer.elapsed_seconds(),
            moves: self.moves,
        };
        log::info!("Level {} solved in {} moves and {} seconds", report.level, report.moves, report.seconds);
        self.observers.iter_mut().for_each(|o| o.won(&report));
    }

    /// Reject mutations of a won session
    ///
    fn ensure_in_progress(&self) -> Result<(), Error> {
        match self.state {
            State::InProgress => Ok(()),
            State::Won => {
                log::warn!("Rejecting mutation of solved level {}", self.level.number());
                Err(Error::SessionFinished)
            },
        }
    }
}
