//! Turn sequencing, modes and win detection.
//!
//! [`Game`] is the only writer of [`GameState`]. Every request either commits
//! a whole transition or is rejected without touching anything.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use rand::Rng;

use crate::ai::{self, AiMemory};
use crate::board::{Board, ShotOutcome, GRID};
use crate::common::BoardError;
use crate::fleet;
use crate::placement::FleetSetup;
use crate::ship::{Orientation, Ship, ShipKind};

/// Game mode chosen at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Manual setup, alternating turns, AI retaliates.
    #[default]
    Standard,
    /// Target practice: the player fires at the AI board every turn.
    FreePlay,
}

impl Mode {
    /// Selector string used by front ends.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Standard => "normal",
            Mode::FreePlay => "easy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode {0:?}, expected \"normal\" or \"easy\"")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "standard" => Ok(Mode::Standard),
            "easy" | "freeplay" | "free-play" => Ok(Mode::FreePlay),
            _ => Err(ParseModeError(s.into())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two participants. Also names whose turn it is and who won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    #[cfg_attr(feature = "std", serde(rename = "AI"))]
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        })
    }
}

/// Where the state machine currently is. Derived from [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    PlayerTurn,
    AiTurn,
    GameOver,
}

/// Why a shot request was turned down. The game is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotRejected {
    #[error("the game is over")]
    GameOver,
    #[error("fleet setup is not complete")]
    SetupIncomplete,
    #[error("it is the {turn} turn; the {target} board cannot be fired at")]
    WrongTurn { turn: Side, target: Side },
    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("cell ({row}, {col}) was already tried")]
    AlreadyTried { row: usize, col: usize },
    #[error("no untried cell left")]
    NoTarget,
}

/// Why a setup request was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("ships can only be placed during setup")]
    NotInSetup,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A restored snapshot that breaks a game invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("the {0} board is inconsistent")]
    InconsistentBoard(Side),
    #[error("winner does not match game over flag")]
    WinnerMismatch,
    #[error("free play never hands the turn to the AI")]
    FreePlayAiTurn,
    #[error("free play has no setup phase")]
    FreePlaySetup,
    #[error("setup workspace is invalid: {0}")]
    InvalidSetup(BoardError),
    #[error("placements left over after setup completed")]
    StaleSetup,
}

/// Complete state of one game. This is also the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct GameState {
    player_board: Board,
    ai_board: Board,
    turn: Side,
    game_over: bool,
    winner: Option<Side>,
    elapsed_seconds: u64,
    setup_complete: bool,
    ai_memory: AiMemory,
    mode: Mode,
    #[cfg_attr(feature = "std", serde(default))]
    setup: FleetSetup,
}

impl GameState {
    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn ai_board(&self) -> &Board {
        &self.ai_board
    }

    /// Board owned by `side`.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Player => &self.player_board,
            Side::Ai => &self.ai_board,
        }
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_setup_complete(&self) -> bool {
        self.setup_complete
    }

    pub fn ai_memory(&self) -> &AiMemory {
        &self.ai_memory
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Manual placements in progress. Empty once setup is complete.
    pub fn setup(&self) -> &FleetSetup {
        &self.setup
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if !self.setup_complete {
            Phase::Setup
        } else {
            match self.turn {
                Side::Player => Phase::PlayerTurn,
                Side::Ai => Phase::AiTurn,
            }
        }
    }

    /// Check the invariants a restored snapshot must satisfy.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        for side in [Side::Player, Side::Ai] {
            if !self.board(side).is_consistent() {
                return Err(SnapshotError::InconsistentBoard(side));
            }
        }
        if self.game_over != self.winner.is_some() {
            return Err(SnapshotError::WinnerMismatch);
        }
        if self.mode == Mode::FreePlay {
            if self.turn == Side::Ai {
                return Err(SnapshotError::FreePlayAiTurn);
            }
            if !self.setup_complete {
                return Err(SnapshotError::FreePlaySetup);
            }
        }
        if self.setup_complete && !self.setup.placed().is_empty() {
            return Err(SnapshotError::StaleSetup);
        }
        self.setup.check_layout().map_err(SnapshotError::InvalidSetup)
    }
}

/// The state machine driving one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Fresh game with random fleets on both boards.
    ///
    /// Standard games start in setup, where the player's board is replaced by
    /// the manual layout. Free play skips setup.
    pub fn new<R: Rng + ?Sized>(mode: Mode, rng: &mut R) -> Self {
        let player_board = fleet::generate_board(rng);
        let ai_board = fleet::generate_board(rng);
        log::debug!("new {} game", mode);
        Game {
            state: GameState {
                player_board,
                ai_board,
                turn: Side::Player,
                game_over: false,
                winner: None,
                elapsed_seconds: 0,
                setup_complete: mode == Mode::FreePlay,
                ai_memory: AiMemory::new(),
                mode,
                setup: FleetSetup::new(),
            },
        }
    }

    /// Resume from a snapshot.
    pub fn from_state(state: GameState) -> Self {
        Game { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    fn setup_mut(&mut self) -> Result<&mut FleetSetup, SetupError> {
        if self.phase() != Phase::Setup {
            return Err(SetupError::NotInSetup);
        }
        Ok(&mut self.state.setup)
    }

    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), SetupError> {
        Ok(self.setup_mut()?.place(kind, row, col, orientation)?)
    }

    pub fn remove_ship(&mut self, kind: ShipKind) -> Result<Ship, SetupError> {
        Ok(self.setup_mut()?.remove(kind)?)
    }

    pub fn clear_placements(&mut self) -> Result<(), SetupError> {
        self.setup_mut()?.clear();
        Ok(())
    }

    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SetupError> {
        Ok(self.setup_mut()?.auto_place(rng)?)
    }

    /// Setup → player turn, once all ships are placed. The placed layout
    /// becomes the player's board.
    pub fn complete_setup(&mut self) -> Result<(), SetupError> {
        let board = self.setup_mut()?.to_board()?;
        self.state.player_board = board;
        self.state.setup.clear();
        self.state.setup_complete = true;
        self.state.turn = Side::Player;
        log::debug!("setup complete");
        Ok(())
    }

    fn check_shot(&self, shooter: Side, row: usize, col: usize) -> Result<(), ShotRejected> {
        match self.phase() {
            Phase::GameOver => return Err(ShotRejected::GameOver),
            Phase::Setup => return Err(ShotRejected::SetupIncomplete),
            _ => {}
        }
        if self.state.turn != shooter {
            return Err(ShotRejected::WrongTurn {
                turn: self.state.turn,
                target: shooter.opponent(),
            });
        }
        if row >= GRID || col >= GRID {
            return Err(ShotRejected::OutOfBounds { row, col });
        }
        Ok(())
    }

    /// A shot requested by the front end at the `target` board. Only the AI
    /// board, on the player's turn, is a legal target.
    pub fn request_shot(
        &mut self,
        target: Side,
        row: usize,
        col: usize,
    ) -> Result<ShotOutcome, ShotRejected> {
        if target != Side::Ai && !self.state.game_over {
            return Err(ShotRejected::WrongTurn {
                turn: self.state.turn,
                target,
            });
        }
        self.player_shot(row, col)
    }

    /// The player fires at the AI board.
    pub fn player_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, ShotRejected> {
        self.check_shot(Side::Player, row, col)?;
        let outcome = self
            .state
            .ai_board
            .apply_shot(row, col)
            .map_err(|_| ShotRejected::OutOfBounds { row, col })?;
        if outcome.already_tried {
            return Err(ShotRejected::AlreadyTried { row, col });
        }
        if self.state.ai_board.is_defeated() {
            self.finish(Side::Player);
        } else if self.state.mode == Mode::Standard {
            self.state.turn = Side::Ai;
        }
        Ok(outcome)
    }

    /// The AI picks a target on the player board and fires.
    pub fn ai_shot<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<((usize, usize), ShotOutcome), ShotRejected> {
        match self.phase() {
            Phase::GameOver => return Err(ShotRejected::GameOver),
            Phase::AiTurn => {}
            _ => {
                return Err(ShotRejected::WrongTurn {
                    turn: self.state.turn,
                    target: Side::Player,
                })
            }
        }
        let state = &mut self.state;
        let (row, col) = ai::choose_target(&state.player_board, &mut state.ai_memory, rng)
            .ok_or(ShotRejected::NoTarget)?;
        let outcome = state
            .player_board
            .apply_shot(row, col)
            .map_err(|_| ShotRejected::OutOfBounds { row, col })?;
        ai::observe(&state.player_board, &mut state.ai_memory, (row, col), &outcome);
        log::debug!("AI fired at ({}, {}): hit={}", row, col, outcome.hit);
        if state.player_board.is_defeated() {
            self.finish(Side::Ai);
        } else {
            self.state.turn = Side::Player;
        }
        Ok(((row, col), outcome))
    }

    fn finish(&mut self, winner: Side) {
        self.state.game_over = true;
        self.state.winner = Some(winner);
        log::info!("game over, {} wins", winner);
    }

    /// One second of play. Returns false, without counting, once the game
    /// is over.
    pub fn tick(&mut self) -> bool {
        if self.state.game_over {
            return false;
        }
        self.state.elapsed_seconds += 1;
        true
    }
}

/// `HH:MM:SS` rendering of an elapsed time in seconds.
pub fn format_elapsed(seconds: u64) -> String {
    alloc::format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
