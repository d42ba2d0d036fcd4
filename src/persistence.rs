#![cfg(feature = "std")]
//! Snapshot storage for resuming a game after restart.
//!
//! A store holds at most one [`GameState`]. The session saves after every
//! committed transition of a live game and clears the store when the game
//! ends or a new one starts. Anything unreadable on load counts as "no saved
//! game".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::game::{GameState, SnapshotError};

/// Errors raised while writing or decoding a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("snapshot is not valid bincode: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("snapshot rejected: {0}")]
    Invalid(#[from] SnapshotError),
}

/// Key-value style storage for a single game snapshot.
pub trait SnapshotStore: Send {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError>;

    /// The saved snapshot, or `None` if there is none or it cannot be used.
    fn load(&mut self) -> Option<GameState>;

    fn clear(&mut self) -> Result<(), PersistError>;
}

/// On-disk encoding of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// camelCase JSON, the schema front ends read.
    #[default]
    Json,
    /// Compact bincode.
    Bincode,
}

impl Codec {
    /// Bincode for `*.bin`, JSON otherwise.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") => Codec::Bincode,
            _ => Codec::Json,
        }
    }

    pub fn encode(self, state: &GameState) -> Result<Vec<u8>, PersistError> {
        Ok(match self {
            Codec::Json => serde_json::to_vec_pretty(state)?,
            Codec::Bincode => bincode::serialize(state)?,
        })
    }

    /// Decode and validate a snapshot.
    pub fn decode(self, bytes: &[u8]) -> Result<GameState, PersistError> {
        let state: GameState = match self {
            Codec::Json => serde_json::from_slice(bytes)?,
            Codec::Bincode => bincode::deserialize(bytes)?,
        };
        state.validate()?;
        Ok(state)
    }
}

#[derive(Debug, Default)]
struct MemorySlot {
    bytes: Option<Vec<u8>>,
    saves: usize,
    clears: usize,
}

/// In-process store. Clones share the same slot, so a caller can keep a
/// handle after moving the store into a session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<MemorySlot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with `state`, as if a previous run had saved it.
    pub fn with_snapshot(state: &GameState) -> Result<Self, PersistError> {
        let store = Self::new();
        store.slot().bytes = Some(Codec::Json.encode(state)?);
        Ok(store)
    }

    /// Store pre-loaded with raw bytes, which need not be a valid snapshot.
    pub fn with_raw(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.slot().bytes = Some(bytes.into());
        store
    }

    fn slot(&self) -> MutexGuard<'_, MemorySlot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn has_snapshot(&self) -> bool {
        self.slot().bytes.is_some()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.slot().saves
    }

    pub fn clear_count(&self) -> usize {
        self.slot().clears
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        let bytes = Codec::Json.encode(state)?;
        let mut slot = self.slot();
        slot.bytes = Some(bytes);
        slot.saves += 1;
        Ok(())
    }

    fn load(&mut self) -> Option<GameState> {
        let bytes = self.slot().bytes.clone()?;
        match Codec::Json.decode(&bytes) {
            Ok(state) => Some(state),
            Err(err) => {
                log::warn!("ignoring saved game: {}", err);
                None
            }
        }
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        let mut slot = self.slot();
        slot.bytes = None;
        slot.clears += 1;
        Ok(())
    }
}

/// Snapshot kept in a single file. Saves write a sibling temp file and
/// rename it over the target.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    codec: Codec,
}

impl FileStore {
    /// Store at `path`, with the codec picked from its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let codec = Codec::for_path(&path);
        Self { path, codec }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, state: &GameState) -> Result<(), PersistError> {
        let bytes = self.codec.encode(state)?;
        let tmp = self.temp_path();
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        log::trace!("saved game to {}", self.path.display());
        Ok(())
    }

    fn load(&mut self) -> Option<GameState> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("cannot read {}: {}", self.path.display(), err);
                return None;
            }
        };
        match self.codec.decode(&bytes) {
            Ok(state) => {
                log::info!("resuming saved game from {}", self.path.display());
                Some(state)
            }
            Err(err) => {
                log::warn!("ignoring saved game in {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn clear(&mut self) -> Result<(), PersistError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
