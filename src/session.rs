//! Round controller: drives a session from setup to a winner.
//!
//! Each round the controller shows the state, takes one command from the
//! human through a [`Frontend`], records the round in the history, resolves
//! the human's command, resolves one action drawn from the opponent's
//! [`DecisionSource`], and evaluates victory. A terminal outcome is
//! announced and the history exported before the controller stops.

use std::fmt;
use std::io;

use tracing::{debug, info, warn};

use crate::agent::{next_action, DecisionSource};
use crate::error::{ActionError, CaptureError};
use crate::game::{
    apply_action, assert_invariants, evaluate, Action, GameState, Outcome, Side, Target,
};
use crate::persist::SnapshotStore;
use crate::report::HistoryReporter;

/// A command the human can give in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerChoice {
    /// Gather water.
    GatherWater,
    /// Irrigate for rice.
    Irrigate,
    /// Capture a cell; the target is asked for separately.
    Capture,
    /// Recruit a farmer.
    Recruit,
    /// Save the session.
    Save,
    /// Export the round history.
    Export,
}

impl PlayerChoice {
    /// Every choice in menu order.
    pub const ALL: [PlayerChoice; 6] = [
        PlayerChoice::GatherWater,
        PlayerChoice::Irrigate,
        PlayerChoice::Capture,
        PlayerChoice::Recruit,
        PlayerChoice::Save,
        PlayerChoice::Export,
    ];

    /// Choice for a 1-based menu number.
    #[must_use]
    pub fn from_menu(number: u32) -> Option<PlayerChoice> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PlayerChoice::GatherWater => "Gather water",
            PlayerChoice::Irrigate => "Irrigate rice",
            PlayerChoice::Capture => "Capture territory",
            PlayerChoice::Recruit => "Recruit a farmer",
            PlayerChoice::Save => "Save game",
            PlayerChoice::Export => "Export history",
        }
    }
}

/// Message from the controller to the human.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The human's action was rejected; nothing changed.
    ActionFailed(ActionError),
    /// The session was saved.
    Saved,
    /// Saving failed; the session continues.
    SaveFailed(String),
    /// The history was exported.
    Exported,
    /// Exporting failed; the session continues.
    ExportFailed(String),
    /// Somebody won.
    GameOver(Outcome),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ActionFailed(e) => write!(f, "Action failed: {e}"),
            Notice::Saved => write!(f, "Game saved."),
            Notice::SaveFailed(e) => write!(f, "Could not save the game: {e}"),
            Notice::Exported => write!(f, "History exported."),
            Notice::ExportFailed(e) => write!(f, "Could not export the history: {e}"),
            Notice::GameOver(Outcome::PlayerWin) => write!(f, "You win!"),
            Notice::GameOver(Outcome::AiWin) => write!(f, "The agent wins."),
            Notice::GameOver(Outcome::Continue) => write!(f, "The game continues."),
        }
    }
}

/// Failure to obtain input from the human.
#[derive(Debug)]
pub enum InputError {
    /// The input stream ended.
    Closed,
    /// Reading or writing the terminal failed.
    Io(io::Error),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Closed => write!(f, "input closed"),
            InputError::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io(e) => Some(e),
            InputError::Closed => None,
        }
    }
}

impl From<io::Error> for InputError {
    fn from(e: io::Error) -> Self {
        InputError::Io(e)
    }
}

/// The human side of a session: input plus a read-only view of the game.
///
/// Implementations re-prompt on malformed input themselves; an error
/// means no more input can be obtained at all.
pub trait Frontend {
    /// Show the board and counters at the start of a round.
    fn show_state(&mut self, state: &GameState);

    /// Ask for this round's command.
    ///
    /// # Errors
    ///
    /// Returns an error if input is no longer available.
    fn choose_command(&mut self) -> Result<PlayerChoice, InputError>;

    /// Ask for capture coordinates on a `size`×`size` board. Coordinates
    /// off the board are returned as entered and fail the capture.
    ///
    /// # Errors
    ///
    /// Returns an error if input is no longer available.
    fn capture_target(&mut self, size: usize) -> Result<Target, InputError>;

    /// Tell the human what happened.
    fn notify(&mut self, notice: &Notice);
}

/// Errors that end or refuse a round.
#[derive(Debug)]
pub enum SessionError {
    /// `start` was called twice.
    AlreadyStarted,
    /// A round was requested before `start` or after the game ended.
    NotInRound,
    /// The human's input ended mid-session.
    InputClosed,
    /// The human's input failed.
    Input(io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyStarted => write!(f, "session already started"),
            SessionError::NotInRound => write!(f, "no round in progress"),
            SessionError::InputClosed => write!(f, "input closed before the game ended"),
            SessionError::Input(e) => write!(f, "input failed: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Input(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InputError> for SessionError {
    fn from(e: InputError) -> Self {
        match e {
            InputError::Closed => SessionError::InputClosed,
            InputError::Io(e) => SessionError::Input(e),
        }
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Built but not started.
    AwaitingStart,
    /// Rounds are being played.
    InRound,
    /// Somebody won; no more rounds.
    Terminal(Outcome),
}

/// Resolved human command, ready to apply after the round is recorded.
enum Command {
    Act(Action),
    OffBoard(Target),
    Save,
    Export,
}

/// Orchestrates rounds between a human [`Frontend`] and an opponent
/// [`DecisionSource`], with a store for saves and a reporter for exports.
#[derive(Debug)]
pub struct RoundController<F, D, S, R> {
    state: GameState,
    frontend: F,
    agent: D,
    store: S,
    reporter: R,
    phase: Phase,
    rounds_played: u32,
}

impl<F, D, S, R> RoundController<F, D, S, R>
where
    F: Frontend,
    D: DecisionSource,
    S: SnapshotStore,
    R: HistoryReporter,
{
    /// Create a controller over a fresh or restored state.
    #[must_use]
    pub fn new(state: GameState, frontend: F, agent: D, store: S, reporter: R) -> Self {
        Self {
            state,
            frontend,
            agent,
            store,
            reporter,
            phase: Phase::AwaitingStart,
            rounds_played: 0,
        }
    }

    /// Begin playing rounds.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyStarted`] if called more than once.
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::AwaitingStart {
            return Err(SessionError::AlreadyStarted);
        }
        self.phase = Phase::InRound;
        info!(
            size = self.state.size(),
            rounds = self.state.rounds_recorded(),
            "session started"
        );
        Ok(())
    }

    /// Play one full round and return its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotInRound`] outside of `InRound`, or an
    /// input error if the human's command could not be read. Input is read
    /// before anything is mutated, so an input error leaves the state as it
    /// was at the start of the round.
    pub fn play_round(&mut self) -> Result<Outcome, SessionError> {
        if self.phase != Phase::InRound {
            return Err(SessionError::NotInRound);
        }

        self.frontend.show_state(&self.state);
        let command = self.read_command()?;

        self.state.record_round();
        self.resolve_human(command);
        self.resolve_agent();
        self.end_of_round();

        self.rounds_played += 1;
        let outcome = evaluate(&self.state);
        info!(round = self.state.rounds_recorded(), %outcome, "round complete");

        if outcome.is_terminal() {
            self.finish(outcome);
        }
        Ok(outcome)
    }

    /// Play rounds until somebody wins.
    ///
    /// With `max_rounds` set, stops after that many rounds and returns
    /// [`Outcome::Continue`] if nobody has won. Starts the session first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the human's input fails.
    pub fn run(&mut self, max_rounds: Option<u32>) -> Result<Outcome, SessionError> {
        if self.phase == Phase::AwaitingStart {
            self.start()?;
        }
        let mut played = 0;
        loop {
            if let Phase::Terminal(outcome) = self.phase {
                return Ok(outcome);
            }
            if max_rounds.is_some_and(|max| played >= max) {
                return Ok(Outcome::Continue);
            }
            self.play_round()?;
            played += 1;
        }
    }

    fn read_command(&mut self) -> Result<Command, InputError> {
        let command = match self.frontend.choose_command()? {
            PlayerChoice::GatherWater => Command::Act(Action::GatherWater),
            PlayerChoice::Irrigate => Command::Act(Action::Irrigate),
            PlayerChoice::Capture => {
                let size = self.state.size();
                let target = self.frontend.capture_target(size)?;
                match target.on_board(size) {
                    Some(coord) => Command::Act(Action::Capture(coord)),
                    None => Command::OffBoard(target),
                }
            }
            PlayerChoice::Recruit => Command::Act(Action::Recruit),
            PlayerChoice::Save => Command::Save,
            PlayerChoice::Export => Command::Export,
        };
        Ok(command)
    }

    fn resolve_human(&mut self, command: Command) {
        match command {
            Command::Act(action) => {
                if let Err(e) = apply_action(&mut self.state, Side::Player, action) {
                    debug!(%action, error = %e, "player action rejected");
                    self.frontend.notify(&Notice::ActionFailed(e));
                }
            }
            Command::OffBoard(target) => {
                let size = self.state.size();
                let e = ActionError::Capture(CaptureError::OutOfBounds { target, size });
                debug!(%target, "player capture off the board");
                self.frontend.notify(&Notice::ActionFailed(e));
            }
            Command::Save => {
                let notice = match self.store.save(&self.state) {
                    Ok(()) => Notice::Saved,
                    Err(e) => {
                        warn!(error = %e, "save failed");
                        Notice::SaveFailed(e.to_string())
                    }
                };
                self.frontend.notify(&notice);
            }
            Command::Export => self.export(),
        }
    }

    fn resolve_agent(&mut self) {
        let action = next_action(&mut self.agent, self.state.size());
        if let Err(e) = apply_action(&mut self.state, Side::Agent, action) {
            debug!(%action, error = %e, "agent action discarded");
        }
    }

    /// Hook run after both sides have acted. Checks invariants in debug
    /// builds.
    fn end_of_round(&self) {
        assert_invariants(&self.state);
    }

    fn export(&mut self) {
        let notice = match self.reporter.export_history(&self.state) {
            Ok(()) => Notice::Exported,
            Err(e) => {
                warn!(error = %e, "export failed");
                Notice::ExportFailed(e.to_string())
            }
        };
        self.frontend.notify(&notice);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Terminal(outcome);
        info!(
            %outcome,
            rounds = self.rounds_played,
            player = self.state.territories[Side::Player],
            agent = self.state.territories[Side::Agent],
            "game over"
        );
        self.frontend.notify(&Notice::GameOver(outcome));
        self.export();
    }
}

impl<F, D, S, R> RoundController<F, D, S, R> {
    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds played by this controller (not counting rounds restored from
    /// a snapshot).
    #[must_use]
    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// The human frontend.
    #[must_use]
    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    /// The snapshot store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The history reporter.
    #[must_use]
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consume the controller and return the final state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }
}
