#![cfg(feature = "std")]
//! Requests a front end sends to a running session.

use tokio::sync::oneshot;

use crate::board::ShotOutcome;
use crate::game::{GameState, Mode, ShotRejected, Side};
use crate::ship::{Orientation, ShipKind};

/// Messages processed by the session loop, in submission order.
#[derive(Debug)]
pub enum Command {
    Place {
        ship: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
        reply: oneshot::Sender<bool>,
    },
    Remove {
        ship: ShipKind,
        reply: oneshot::Sender<bool>,
    },
    ClearPlacements {
        reply: oneshot::Sender<bool>,
    },
    AutoPlace {
        reply: oneshot::Sender<bool>,
    },
    CompleteSetup {
        reply: oneshot::Sender<bool>,
    },
    Shoot {
        target: Side,
        row: usize,
        col: usize,
        reply: oneshot::Sender<Result<ShotOutcome, ShotRejected>>,
    },
    NewGame {
        mode: Mode,
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Placement, shot and query interface offered to front ends.
///
/// Transport errors (the session has stopped) surface as `Err`; rejected
/// requests are ordinary `Ok` values.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    async fn request_placement(
        &self,
        ship: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> anyhow::Result<bool>;

    /// Take a placed ship back so it can be moved.
    async fn request_remove(&self, ship: ShipKind) -> anyhow::Result<bool>;

    async fn request_clear_placements(&self) -> anyhow::Result<bool>;

    async fn request_auto_place(&self) -> anyhow::Result<bool>;

    /// Accepted only once every fleet ship is placed.
    async fn request_complete_setup(&self) -> anyhow::Result<bool>;

    async fn request_shot(
        &self,
        target: Side,
        row: usize,
        col: usize,
    ) -> anyhow::Result<Result<ShotOutcome, ShotRejected>>;

    /// Abandon the current game and start another.
    async fn new_game(&self, mode: Mode) -> anyhow::Result<()>;

    /// Latest committed state.
    fn snapshot(&self) -> GameState;
}
