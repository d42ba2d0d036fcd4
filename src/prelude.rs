//! Commonly used types and utilities for ease of import.

pub use crate::{
    choose_target, generate_board, is_valid, AiMemory, Board, Cell, FleetSetup, Game, GameState,
    Mode, Orientation, Phase, Ship, ShipKind, ShotOutcome, ShotRejected, Side,
};

#[cfg(feature = "std")]
pub use crate::{
    FileStore, GameApi, MemoryStore, Session, SessionConfig, SessionHandle, SnapshotStore,
};
