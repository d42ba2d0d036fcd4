#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod fleet;
mod game;
mod placement;
mod ship;
#[cfg(feature = "std")]
pub mod cli;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod persistence;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod session;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, SetBits};
pub use board::*;
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
pub use placement::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use persistence::{Codec, FileStore, MemoryStore, PersistError, SnapshotStore};
#[cfg(feature = "std")]
pub use protocol::GameApi;
#[cfg(feature = "std")]
pub use session::{Session, SessionConfig, SessionHandle};
