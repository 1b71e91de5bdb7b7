use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::mem;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No session has been started.
    Idle,
    /// Session running, timer advancing.
    Active,
    Won,
    Lost,
}

impl EngineState {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// One playthrough, from `start` to a terminal outcome.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    level: Level,
    board: Board,
    state: EngineState,
    revealed_count: CellCount,
    flagged_count: CellCount,
    elapsed_seconds: u32,
}

impl Session {
    fn new(level: Level, board: Board) -> Self {
        Self {
            level,
            board,
            state: EngineState::Active,
            revealed_count: 0,
            flagged_count: 0,
            elapsed_seconds: 0,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.board.mine_count().saturating_sub(self.flagged_count)
    }

    /// Visible state of one cell. Once lost, every mine shows as a mine.
    pub fn cell_view(&self, index: CellIndex) -> Option<CellView> {
        self.board.get(index).map(|cell| self.view_of(cell))
    }

    /// Visible state of the whole board in row-major order.
    pub fn view(&self) -> Vec<CellView> {
        self.board.iter().map(|cell| self.view_of(cell)).collect()
    }

    fn view_of(&self, cell: &Cell) -> CellView {
        if self.state == EngineState::Lost && cell.is_mine() {
            CellView::Mine
        } else {
            cell.view()
        }
    }

    fn is_cleared(&self) -> bool {
        self.revealed_count + self.flagged_count == self.board.total_cells()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealResult {
    pub newly_revealed: Vec<RevealedCell>,
    pub outcome: RevealOutcome,
}

impl RevealResult {
    const fn no_change() -> Self {
        Self {
            newly_revealed: Vec::new(),
            outcome: RevealOutcome::NoChange,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagResult {
    pub index: CellIndex,
    pub now_flagged: bool,
    pub flags_remaining: CellCount,
    /// Session state after the flag change; `Won` if it cleared the board.
    pub state: EngineState,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    /// Every available flag is already placed.
    CapReached,
    Changed(FlagResult),
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// Owns the current session and applies player commands to it.
///
/// At most one tick handle is held at a time; it is dropped whenever the
/// session leaves `Active` and before a new session starts.
pub struct Engine<G = RandomBoardGenerator, T = ManualTicks>
where
    T: TickSource,
{
    generator: G,
    ticks: T,
    session: Option<Session>,
    timer: Option<T::Handle>,
    events: Vec<EngineEvent>,
}

#[cfg(feature = "std")]
impl Engine {
    pub fn new() -> Self {
        Self::with_generator(RandomBoardGenerator::from_entropy(), ManualTicks::new())
    }
}

#[cfg(feature = "std")]
impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, T> Engine<G, T>
where
    G: BoardGenerator,
    T: TickSource,
{
    pub fn with_generator(generator: G, ticks: T) -> Self {
        Self {
            generator,
            ticks,
            session: None,
            timer: None,
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn state(&self) -> EngineState {
        self.session
            .as_ref()
            .map_or(EngineState::Idle, Session::state)
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Drains the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        mem::take(&mut self.events)
    }

    /// Replaces any current session with a fresh board for `level`.
    pub fn start(&mut self, level: Level) -> Result<&Session> {
        if let Err(err) = level.validate() {
            log::warn!("Refusing to start invalid level {}", level);
            return Err(err);
        }

        // cancel the previous session's timer before anything else
        self.timer = None;

        let board = self.generator.generate(&level);
        log::debug!("Starting session on {}", level);

        let session = Session::new(level, board);
        self.events.push(EngineEvent::SessionStarted {
            level: session.level.clone(),
            flags_remaining: session.flags_remaining(),
        });
        self.timer = Some(self.ticks.start_ticking());

        Ok(&*self.session.insert(session))
    }

    /// Starts over on the current session's level.
    pub fn restart(&mut self) -> Result<&Session> {
        let level = self
            .session
            .as_ref()
            .map(|session| session.level.clone())
            .ok_or(GameError::IllegalStateOperation)?;
        self.start(level)
    }

    pub fn reveal(&mut self, index: CellIndex) -> Result<RevealResult> {
        let Some(session) = self.session.as_mut() else {
            return Ok(RevealResult::no_change());
        };
        let index = session.board.validate_index(index)?;

        if !session.is_active() || !session.board[index].is_hidden() {
            return Ok(RevealResult::no_change());
        }

        let mut newly_revealed = Vec::new();
        let outcome = if session.board[index].is_mine() {
            Self::reveal_mine(session, index, &mut newly_revealed);
            RevealOutcome::HitMine
        } else {
            Self::flood_reveal(session, index, &mut newly_revealed);
            if session.is_cleared() {
                session.state = EngineState::Won;
                RevealOutcome::Won
            } else {
                RevealOutcome::Revealed
            }
        };

        self.events.push(EngineEvent::CellsRevealed {
            cells: newly_revealed.clone(),
        });
        self.finish_if_ended();

        Ok(RevealResult {
            newly_revealed,
            outcome,
        })
    }

    pub fn toggle_flag(&mut self, index: CellIndex) -> Result<FlagOutcome> {
        let Some(session) = self.session.as_mut() else {
            return Ok(FlagOutcome::NoChange);
        };
        let index = session.board.validate_index(index)?;

        if !session.is_active() {
            return Ok(FlagOutcome::NoChange);
        }

        let mine_count = session.board.mine_count();
        let Some(cell) = session.board.get_mut(index) else {
            return Ok(FlagOutcome::NoChange);
        };

        if cell.is_revealed() {
            return Ok(FlagOutcome::NoChange);
        }

        let now_flagged = if cell.is_flagged() {
            cell.set_flagged(false);
            session.flagged_count -= 1;
            false
        } else if session.flagged_count >= mine_count {
            log::debug!("No flags left for cell {}", index);
            return Ok(FlagOutcome::CapReached);
        } else {
            cell.set_flagged(true);
            session.flagged_count += 1;
            true
        };

        if session.is_cleared() {
            session.state = EngineState::Won;
        }

        let result = FlagResult {
            index,
            now_flagged,
            flags_remaining: session.flags_remaining(),
            state: session.state,
        };
        self.events.push(EngineEvent::FlagChanged {
            index,
            flagged: now_flagged,
            flags_remaining: result.flags_remaining,
        });
        self.finish_if_ended();

        Ok(FlagOutcome::Changed(result))
    }

    /// Advances the elapsed-time counter by one second while a session is active.
    pub fn tick(&mut self) -> Option<u32> {
        if self.timer.is_none() {
            return None;
        }
        let session = self.session.as_mut().filter(|session| session.is_active())?;

        session.elapsed_seconds += 1;
        let elapsed_seconds = session.elapsed_seconds;
        self.events.push(EngineEvent::Ticked { elapsed_seconds });
        Some(elapsed_seconds)
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.session.as_ref().map_or(0, Session::elapsed_seconds)
    }

    /// Routes a forwarded command to the matching operation.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Start(level) => self.start(level).map(|_| ()),
            Command::Restart => self.restart().map(|_| ()),
            Command::Reveal(index) => self.reveal(index).map(|_| ()),
            Command::ToggleFlag(index) => self.toggle_flag(index).map(|_| ()),
            Command::Tick => {
                self.tick();
                Ok(())
            }
        }
    }

    /// Reveals the tripped mine, then every other unflagged mine for display.
    fn reveal_mine(session: &mut Session, index: CellIndex, newly_revealed: &mut Vec<RevealedCell>) {
        log::debug!("Hit mine at {}", index);
        if let Some(cell) = session.board.get_mut(index) {
            cell.reveal();
            session.revealed_count += 1;
        }
        session.state = EngineState::Lost;

        for cell in session.board.iter_mut() {
            if cell.is_mine() && cell.is_hidden() {
                cell.reveal();
            }
        }
        newly_revealed.extend(
            session
                .board
                .iter()
                .filter(|cell| cell.is_mine())
                .map(|cell| RevealedCell {
                    index: cell.index(),
                    view: CellView::Mine,
                }),
        );
    }

    /// Opens `start` and, through zero-count cells, everything connected to it.
    fn flood_reveal(session: &mut Session, start: CellIndex, newly_revealed: &mut Vec<RevealedCell>) {
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit) = to_visit.pop_front() {
            let board = &mut session.board;
            let Some(cell) = board.get_mut(visit) else {
                continue;
            };

            // flagged or already opened
            if !cell.is_hidden() {
                continue;
            }

            cell.reveal();
            session.revealed_count += 1;
            let count = cell.adjacent_mine_count();
            newly_revealed.push(RevealedCell {
                index: visit,
                view: CellView::Revealed(count),
            });
            log::trace!("Opened cell {}, adjacent mines: {}", visit, count);

            if count == 0 {
                to_visit.extend(board.neighbors(visit).filter(|&n| board[n].is_hidden()));
            }
        }
    }

    fn finish_if_ended(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.state.is_finished() || self.timer.is_none() {
            return;
        }

        self.timer = None;
        log::debug!(
            "Session ended {:?} after {}s",
            session.state,
            session.elapsed_seconds
        );
        self.events.push(EngineEvent::GameOver {
            state: session.state,
            elapsed_seconds: session.elapsed_seconds,
        });
    }
}
