//! Game console

use std::error::Error as StdError;
use std::sync::Arc;

use tokio::io;
use tokio::sync::mpsc;
use tokio_util::codec;

use atomix::error::{NoneError, TryExt, WrappedErr};
use atomix::goal;
use atomix::{Error, LevelPack, Notice, Session, Snapshot, WinReport};

use crate::command::{Command, CommandDecoder};
use crate::store::FileStore;


/// Serve a game console via the given reader and writer
///
/// Commands are read from `reader` line by line, replies are written to
/// `writer`. If a `store` is given, an unfinished game found in it is resumed.
/// The game is saved to the store when paused, when solved, when switching
/// levels and when the console terminates.
///
pub async fn serve(
    reader: impl io::AsyncRead + Unpin,
    writer: impl io::AsyncWrite + Unpin,
    levels: Arc<LevelPack>,
    start: u32,
    store: Option<FileStore>,
) -> Result<(), WrappedErr> {
    use futures::StreamExt;

    let mut commands = codec::FramedRead::new(reader, CommandDecoder::default());
    let mut out = codec::FramedWrite::new(writer, codec::LinesCodec::new());

    let mut console = Console::new(levels, start, store).await?;
    send(&mut out, console.intro()).await.map_err(|e| WrappedErr::new("Could not send intro", e))?;

    while let Some(command) = commands.next().await.and_then(|c| c.or_warn("Could not read command")) {
        let mut reply = match command {
            Ok(Command::Quit)   => break,
            Ok(command)         => console.process(command).await.unwrap_or_else(|e| vec![report(&e)]),
            Err(e)              => vec![report(&e)],
        };
        reply.extend(console.drain_notices().await);

        if send(&mut out, reply).await.or_warn("Could not send reply").is_none() {
            break
        }
    }

    console.suspend().await;
    Ok(())
}


/// Send some lines
///
async fn send(
    out: &mut codec::FramedWrite<impl io::AsyncWrite + Unpin, codec::LinesCodec>,
    lines: Vec<String>,
) -> Result<(), codec::LinesCodecError> {
    use futures::SinkExt;
    use futures::stream::iter;

    out.send_all(&mut iter(lines.into_iter().map(Ok))).await
}


/// Format an error, including its sources, for the player
///
fn report(err: &(dyn StdError + 'static)) -> String {
    let chain: Vec<_> = std::iter::successors(Some(err), |&e| e.source()).map(ToString::to_string).collect();
    format!("error: {}", chain.join(": "))
}


/// State of a single console
///
struct Console {
    levels: Arc<LevelPack>,
    session: Session,
    store: Option<FileStore>,
    notifier: mpsc::UnboundedSender<Notice>,
    notices: mpsc::UnboundedReceiver<Notice>,
    paused: bool,
}

impl Console {
    /// Create a new console
    ///
    /// An unfinished game in the `store` is resumed. Otherwise, the level with
    /// the number `start` is started.
    ///
    pub async fn new(
        levels: Arc<LevelPack>,
        start: u32,
        store: Option<FileStore>,
    ) -> Result<Self, WrappedErr> {
        let (notifier, notices) = mpsc::unbounded_channel();

        let saved = match &store {
            Some(store) => store.load().await.or_warn("Could not load saved game").flatten(),
            None => None,
        };
        let resumed = saved
            .filter(|s| !s.finished)
            .and_then(|s| resume(&levels, &s).or_warn("Could not resume saved game"));
        let mut session = match resumed {
            Some(session) => session,
            None => start_level(&levels, start)?,
        };
        session.subscribe(notifier.clone());

        Ok(Self {levels, session, store, notifier, notices, paused: false})
    }

    /// Process a single command
    ///
    /// `Command::Quit` is not handled by the console itself.
    ///
    pub async fn process(&mut self, command: Command) -> Result<Vec<String>, WrappedErr> {
        use WrappedErr as E;

        match command {
            Command::Move(..) | Command::Undo if self.paused => {
                Err(E::new("Game is paused, type 'resume' to continue", NoneError))
            },
            Command::Move(atom, direction) => {
                let mv = self.session.apply_move(atom, direction).map_err(|e| E::new("Could not move", e))?;
                Ok(vec![format!("atom {} slid {} from {} to {}", atom, direction, mv.from(), mv.to())])
            },
            Command::Undo => {
                let mv = self.session.undo().map_err(|e| E::new("Could not undo", e))?;
                Ok(vec![format!("atom {} returned to {}", mv.atom(), mv.from())])
            },
            Command::Board  => Ok(self.board_lines()),
            Command::Goal   => Ok(self.goal_lines()),
            Command::Status => Ok(vec![self.status()]),
            Command::Pause  => {
                self.session.stop_timer();
                self.paused = true;
                self.save().await?;
                Ok(vec!["paused".to_string()])
            },
            Command::Resume => {
                self.session.start_timer();
                self.paused = false;
                Ok(vec!["resumed".to_string()])
            },
            Command::Save => {
                if self.store.is_none() {
                    return Err(E::new("No save file configured", NoneError))
                }
                self.save().await?;
                Ok(vec!["saved".to_string()])
            },
            Command::Level(number) => self.switch(number).await,
            Command::Next => {
                let number = self.session.next_level();
                self.switch(number).await
            },
            Command::Help => Ok(HELP.iter().map(ToString::to_string).collect()),
            Command::Quit => Ok(Default::default()),
        }
    }

    /// Handle all pending notifications from the session
    ///
    pub async fn drain_notices(&mut self) -> Vec<String> {
        let mut redraw = false;
        let mut wins = Vec::new();
        while let Ok(notice) = self.notices.try_recv() {
            match notice {
                Notice::Redraw(_)   => redraw = true,
                Notice::Won(report) => wins.push(report),
            }
        }

        let mut lines = if redraw {
            self.board_lines()
        } else {
            Default::default()
        };
        for report in wins {
            lines.extend(self.won_lines(&report));
            self.save().await.or_warn("Could not save solved game");
        }
        lines
    }

    /// Stop the timer and save the game
    ///
    pub async fn suspend(&mut self) {
        self.session.stop_timer();
        self.save().await.or_warn("Could not save game");
    }

    /// Greeting for the current level
    ///
    pub fn intro(&self) -> Vec<String> {
        let mut lines = vec![format!("level {}", self.session.level().number())];
        lines.extend(self.board_lines());
        lines.push("type 'help' for a list of commands".to_string());
        lines
    }

    /// Save the game, if a store is configured
    ///
    async fn save(&mut self) -> Result<(), WrappedErr> {
        let snapshot = self.session.snapshot();
        match &self.store {
            Some(store) => store.save(&snapshot).await,
            None => Ok(()),
        }
    }

    /// Replace the session with one for the level with the given number
    ///
    async fn switch(&mut self, number: u32) -> Result<Vec<String>, WrappedErr> {
        let mut session = start_level(&self.levels, number)?;
        session.subscribe(self.notifier.clone());

        self.session.stop_timer();
        self.session = session;
        self.paused = false;
        self.save().await.or_warn("Could not save game");
        Ok(self.intro())
    }

    fn board_lines(&self) -> Vec<String> {
        let board = self.session.board();
        board
            .to_string()
            .lines()
            .map(ToString::to_string)
            .chain(board.atoms().iter().map(|a| format!("atom {}: {} at {}", a.id(), a.element(), a.position())))
            .collect()
    }

    fn goal_lines(&self) -> Vec<String> {
        let level = self.session.level();
        let goal = level.goal();
        let missing = goal::unfilled(self.session.board(), goal).count();

        let mut lines = vec![format!("goal at {}, matching {} atoms", goal.anchor(), level.rule())];
        lines.extend(goal.to_string().lines().map(ToString::to_string));
        lines.push(format!("{} of {} slots filled", goal.len() - missing, goal.len()));
        lines
    }

    fn status(&self) -> String {
        let session = &self.session;
        format!(
            "level {}: {} moves, {} seconds, {}{}, undo {}",
            session.level().number(),
            session.move_count(),
            session.elapsed_seconds(),
            if session.is_won() { "solved" } else { "in progress" },
            if self.paused { " (paused)" } else { "" },
            if session.can_undo() { "available" } else { "unavailable" },
        )
    }

    fn won_lines(&self, report: &WinReport) -> Vec<String> {
        let next = self.session.next_level();
        let offer = if self.levels.get(next).is_ok() {
            format!("type 'next' to continue with level {}", next)
        } else {
            "that was the last level".to_string()
        };
        vec![
            format!("solved level {} in {} moves and {} seconds", report.level, report.moves, report.seconds),
            offer,
        ]
    }
}


/// Start a new session for the level with the given number
///
fn start_level(levels: &LevelPack, number: u32) -> Result<Session, WrappedErr> {
    levels
        .get(number)
        .map_err(Error::from)
        .and_then(Session::start)
        .map_err(|e| WrappedErr::new("Could not start level", e))
}


/// Reconstruct a session from a saved game
///
fn resume(levels: &LevelPack, snapshot: &Snapshot) -> Result<Session, Error> {
    let level = levels.get(snapshot.level)?;
    Session::restore(level, snapshot, Default::default())
}


const HELP: [&str; 12] = [
    "move <atom> <direction>    slide an atom (up, down, left, right), alias 'm'",
    "undo                       revert the last move",
    "board                      show the board",
    "goal                       show the goal molecule",
    "status                     show moves, time and whether undo is available",
    "pause                      stop the timer and save, moves wait for resume",
    "resume                     restart the timer",
    "save                       save the game",
    "level <n>                  switch to level n",
    "next                       switch to the next level",
    "help                       show this list",
    "quit                       end the game",
];


#[cfg(test)]
mod tests;
