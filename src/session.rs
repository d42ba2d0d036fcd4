#![cfg(feature = "std")]
//! A running game: one task owns the [`Game`], its store and its timers.
//!
//! Commands arrive over a channel and are handled one at a time, so no shot
//! is ever in flight while another is resolved. Two timers live in the same
//! loop:
//! - a repeating tick that counts elapsed seconds while the game is live
//! - a one-shot AI move armed whenever the game enters the AI turn
//!
//! Starting a new game or shutting down cancels both. An AI move also carries
//! the generation of the game it was armed for and is dropped if that game
//! has since been replaced.

use std::fmt;
use std::future::pending;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep_until, Duration, Instant, Interval};

use crate::board::ShotOutcome;
use crate::config::{AI_THINK_DELAY_MS, TICK_INTERVAL_MS};
use crate::game::{Game, GameState, Mode, Phase, ShotRejected, Side};
use crate::persistence::SnapshotStore;
use crate::protocol::{Command, GameApi};
use crate::ship::{Orientation, ShipKind};

/// Runtime knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mode of a freshly generated game. A resumed game keeps its own.
    pub mode: Mode,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
    pub ai_delay: Duration,
    pub tick_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Standard,
            seed: None,
            ai_delay: Duration::from_millis(AI_THINK_DELAY_MS),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }
}

struct PendingAiMove {
    deadline: Instant,
    generation: u64,
}

#[derive(Default)]
struct Timers {
    ticker: Option<Interval>,
    ai_move: Option<PendingAiMove>,
}

impl Timers {
    fn cancel_all(&mut self) {
        self.ticker = None;
        self.ai_move = None;
    }
}

/// Single writer of a game's state.
pub struct Session<S: SnapshotStore> {
    game: Game,
    store: S,
    rng: SmallRng,
    config: SessionConfig,
    generation: u64,
    cleared: bool,
    timers: Timers,
    updates: watch::Sender<GameState>,
}

impl<S: SnapshotStore> Session<S> {
    /// Resume the game saved in `store`, or start a new one.
    pub fn new(config: SessionConfig, mut store: S) -> (Self, watch::Receiver<GameState>) {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let game = match store.load() {
            Some(state) => {
                log::info!("resuming {} game at {:?}", state.mode(), state.phase());
                Game::from_state(state)
            }
            None => Game::new(config.mode, &mut rng),
        };
        let (updates, receiver) = watch::channel(game.state().clone());
        let cleared = game.state().is_game_over();
        let session = Session {
            game,
            store,
            rng,
            config,
            generation: 0,
            cleared,
            timers: Timers::default(),
            updates,
        };
        (session, receiver)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Process commands until `Shutdown` or until every handle is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        self.persist();
        self.arm_timers();
        loop {
            let ai_deadline = self.timers.ai_move.as_ref().map(|m| m.deadline);
            tokio::select! {
                biased;
                cmd = commands.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if !self.handle(cmd) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                () = wait_until(ai_deadline) => self.fire_ai_move(),
                () = next_tick(&mut self.timers.ticker) => self.on_tick(),
            }
        }
        self.timers.cancel_all();
        log::debug!("session stopped");
    }

    /// Returns false when the loop should stop.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Place {
                ship,
                row,
                col,
                orientation,
                reply,
            } => {
                let result = self.game.place_ship(ship, row, col, orientation);
                let _ = reply.send(self.settle("placement", result));
            }
            Command::Remove { ship, reply } => {
                let result = self.game.remove_ship(ship);
                let _ = reply.send(self.settle("removal", result));
            }
            Command::ClearPlacements { reply } => {
                let result = self.game.clear_placements();
                let _ = reply.send(self.settle("clear", result));
            }
            Command::AutoPlace { reply } => {
                let result = self.game.auto_place(&mut self.rng);
                let _ = reply.send(self.settle("auto placement", result));
            }
            Command::CompleteSetup { reply } => {
                let result = self.game.complete_setup();
                let _ = reply.send(self.settle("setup completion", result));
            }
            Command::Shoot {
                target,
                row,
                col,
                reply,
            } => {
                let result = self.game.request_shot(target, row, col);
                match &result {
                    Ok(_) => self.commit(),
                    Err(err) => log::debug!("shot at ({}, {}) rejected: {}", row, col, err),
                }
                let _ = reply.send(result);
            }
            Command::NewGame { mode, reply } => {
                self.restart(mode);
                let _ = reply.send(());
            }
            Command::Shutdown => return false,
        }
        true
    }

    fn settle<T, E: fmt::Display>(&mut self, what: &str, result: Result<T, E>) -> bool {
        match result {
            Ok(_) => {
                self.commit();
                true
            }
            Err(err) => {
                log::debug!("{} rejected: {}", what, err);
                false
            }
        }
    }

    /// Persist, re-arm timers and publish after a committed transition.
    fn commit(&mut self) {
        self.persist();
        self.arm_timers();
        self.updates.send_replace(self.game.state().clone());
    }

    fn persist(&mut self) {
        let state = self.game.state();
        if state.is_game_over() {
            if !self.cleared {
                if let Err(err) = self.store.clear() {
                    log::warn!("failed to clear saved game: {}", err);
                }
                self.cleared = true;
            }
        } else if let Err(err) = self.store.save(state) {
            log::warn!("failed to save game: {}", err);
        }
    }

    fn arm_timers(&mut self) {
        if self.game.state().is_game_over() {
            if self.timers.ticker.take().is_some() {
                log::debug!("clock stopped at {}s", self.game.state().elapsed_seconds());
            }
        } else if self.timers.ticker.is_none() {
            let period = self.config.tick_interval;
            self.timers.ticker = Some(interval_at(Instant::now() + period, period));
        }

        if self.game.phase() != Phase::AiTurn {
            self.timers.ai_move = None;
        } else if self.timers.ai_move.is_none() {
            self.timers.ai_move = Some(PendingAiMove {
                deadline: Instant::now() + self.config.ai_delay,
                generation: self.generation,
            });
        }
    }

    fn restart(&mut self, mode: Mode) {
        self.timers.cancel_all();
        self.generation += 1;
        if let Err(err) = self.store.clear() {
            log::warn!("failed to clear saved game: {}", err);
        }
        self.game = Game::new(mode, &mut self.rng);
        self.cleared = false;
        self.commit();
    }

    fn fire_ai_move(&mut self) {
        let Some(pending) = self.timers.ai_move.take() else {
            return;
        };
        if pending.generation != self.generation {
            log::debug!("dropping AI move armed for an earlier game");
            return;
        }
        match self.game.ai_shot(&mut self.rng) {
            Ok(_) => self.commit(),
            Err(err) => log::debug!("AI move skipped: {}", err),
        }
    }

    fn on_tick(&mut self) {
        if self.game.tick() {
            self.commit();
        }
    }
}

impl<S: SnapshotStore + 'static> Session<S> {
    /// Start a session on the current tokio runtime.
    pub fn spawn(config: SessionConfig, store: S) -> (SessionHandle, JoinHandle<()>) {
        let (session, updates) = Session::new(config, store);
        let (commands, receiver) = mpsc::channel(32);
        let task = tokio::spawn(session.run(receiver));
        (SessionHandle { commands, updates }, task)
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => pending::<()>().await,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => pending::<()>().await,
    }
}

/// Cloneable front for a spawned [`Session`].
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    updates: watch::Receiver<GameState>,
}

impl SessionHandle {
    async fn call<T, F>(&self, make: F) -> anyhow::Result<T>
    where
        T: Send,
        F: FnOnce(oneshot::Sender<T>) -> Command + Send,
    {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(make(reply))
            .await
            .map_err(|_| anyhow::anyhow!("session has stopped"))?;
        response
            .await
            .map_err(|_| anyhow::anyhow!("session dropped the request"))
    }

    /// Receiver that observes every committed state.
    pub fn updates(&self) -> watch::Receiver<GameState> {
        self.updates.clone()
    }

    /// Stop the session loop, cancelling its timers.
    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| anyhow::anyhow!("session has stopped"))
    }
}

#[async_trait::async_trait]
impl GameApi for SessionHandle {
    async fn request_placement(
        &self,
        ship: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> anyhow::Result<bool> {
        self.call(|reply| Command::Place {
            ship,
            row,
            col,
            orientation,
            reply,
        })
        .await
    }

    async fn request_remove(&self, ship: ShipKind) -> anyhow::Result<bool> {
        self.call(|reply| Command::Remove { ship, reply }).await
    }

    async fn request_clear_placements(&self) -> anyhow::Result<bool> {
        self.call(|reply| Command::ClearPlacements { reply }).await
    }

    async fn request_auto_place(&self) -> anyhow::Result<bool> {
        self.call(|reply| Command::AutoPlace { reply }).await
    }

    async fn request_complete_setup(&self) -> anyhow::Result<bool> {
        self.call(|reply| Command::CompleteSetup { reply }).await
    }

    async fn request_shot(
        &self,
        target: Side,
        row: usize,
        col: usize,
    ) -> anyhow::Result<Result<ShotOutcome, ShotRejected>> {
        self.call(|reply| Command::Shoot {
            target,
            row,
            col,
            reply,
        })
        .await
    }

    async fn new_game(&self, mode: Mode) -> anyhow::Result<()> {
        self.call(|reply| Command::NewGame { mode, reply }).await
    }

    fn snapshot(&self) -> GameState {
        self.updates.borrow().clone()
    }
}
