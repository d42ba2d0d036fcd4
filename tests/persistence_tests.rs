use std::path::Path;

use broadside::{
    BoardError, Codec, FileStore, Game, GameState, MemoryStore, Mode, Orientation, PersistError,
    Ship, ShipKind, SnapshotError, SnapshotStore,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn sample_state(seed: u64) -> GameState {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new(Mode::FreePlay, &mut rng);
    game.player_shot(2, 3).unwrap();
    game.tick();
    game.into_state()
}

#[test]
fn memory_store_save_load_clear() {
    let mut store = MemoryStore::new();
    assert!(store.load().is_none());

    let state = sample_state(1);
    store.save(&state).unwrap();
    assert!(store.has_snapshot());
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.load(), Some(state));

    store.clear().unwrap();
    assert!(!store.has_snapshot());
    assert!(store.load().is_none());
    assert_eq!(store.clear_count(), 1);
}

#[test]
fn memory_store_clones_share_slot() {
    let observer = MemoryStore::new();
    let mut writer = observer.clone();
    writer.save(&sample_state(2)).unwrap();
    assert!(observer.has_snapshot());
    assert_eq!(observer.save_count(), 1);
}

#[test]
fn corrupt_snapshot_counts_as_missing() {
    let mut store = MemoryStore::with_raw("{ not json");
    assert!(store.load().is_none());
}

#[test]
fn inconsistent_snapshot_is_rejected() {
    let state = sample_state(3);
    let mut value = serde_json::to_value(&state).unwrap();
    value["gameOver"] = serde_json::Value::Bool(true);
    let bytes = serde_json::to_vec(&value).unwrap();

    assert!(matches!(
        Codec::Json.decode(&bytes),
        Err(PersistError::Invalid(_))
    ));
    let mut store = MemoryStore::with_raw(bytes);
    assert!(store.load().is_none());
}

fn with_placements(state: &GameState, placed: &[Ship]) -> Vec<u8> {
    let mut value = serde_json::to_value(state).unwrap();
    value["setup"]["placed"] = serde_json::to_value(placed).unwrap();
    serde_json::to_vec(&value).unwrap()
}

fn decode_error(bytes: &[u8]) -> Option<SnapshotError> {
    match Codec::Json.decode(bytes) {
        Err(PersistError::Invalid(err)) => Some(err),
        _ => None,
    }
}

#[test]
fn broken_setup_workspace_is_rejected() {
    let mut rng = SmallRng::seed_from_u64(8);
    let state = Game::new(Mode::Standard, &mut rng).into_state();
    let h = Orientation::Horizontal;

    let duplicate = with_placements(
        &state,
        &[
            Ship::new(ShipKind::Carrier, h, 0, 0),
            Ship::new(ShipKind::Carrier, h, 1, 0),
            Ship::new(ShipKind::Cruiser, h, 2, 0),
            Ship::new(ShipKind::Destroyer, h, 3, 0),
        ],
    );
    assert_eq!(
        decode_error(&duplicate),
        Some(SnapshotError::InvalidSetup(BoardError::ShipAlreadyPlaced(
            ShipKind::Carrier
        )))
    );
    assert!(MemoryStore::with_raw(duplicate).load().is_none());

    let overlapping = with_placements(
        &state,
        &[
            Ship::new(ShipKind::Carrier, h, 0, 0),
            Ship::new(ShipKind::Destroyer, Orientation::Vertical, 0, 2),
        ],
    );
    assert_eq!(
        decode_error(&overlapping),
        Some(SnapshotError::InvalidSetup(BoardError::ShipOverlaps))
    );

    let off_board = with_placements(&state, &[Ship::new(ShipKind::Cruiser, h, 0, 8)]);
    assert_eq!(
        decode_error(&off_board),
        Some(SnapshotError::InvalidSetup(BoardError::ShipOutOfBounds))
    );

    let partial = with_placements(&state, &[Ship::new(ShipKind::Cruiser, h, 0, 7)]);
    assert!(Codec::Json.decode(&partial).is_ok());
}

#[test]
fn setup_flags_must_match_mode() {
    let mut rng = SmallRng::seed_from_u64(9);
    let free_play = Game::new(Mode::FreePlay, &mut rng).into_state();
    let mut value = serde_json::to_value(&free_play).unwrap();
    value["setupComplete"] = serde_json::Value::Bool(false);
    let bytes = serde_json::to_vec(&value).unwrap();
    assert_eq!(decode_error(&bytes), Some(SnapshotError::FreePlaySetup));

    let mut game = Game::new(Mode::Standard, &mut rng);
    game.auto_place(&mut rng).unwrap();
    game.complete_setup().unwrap();
    let leftover = with_placements(
        game.state(),
        &[Ship::new(ShipKind::Destroyer, Orientation::Vertical, 0, 0)],
    );
    assert_eq!(decode_error(&leftover), Some(SnapshotError::StaleSetup));
}

#[test]
fn file_store_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let mut store = FileStore::new(&path);
    assert!(store.load().is_none());

    let state = sample_state(4);
    store.save(&state).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"playerBoard\""));
    assert_eq!(store.load(), Some(state.clone()));

    // A second store on the same path resumes the game.
    let mut reopened = FileStore::new(&path);
    assert_eq!(reopened.load(), Some(state));
}

#[test]
fn file_store_bincode_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.bin");
    let mut store = FileStore::new(&path);
    let state = sample_state(5);
    store.save(&state).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
    assert_eq!(store.load(), Some(state));
}

#[test]
fn file_store_clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    let mut store = FileStore::new(&path);
    store.clear().unwrap();
    store.save(&sample_state(6)).unwrap();
    assert!(path.exists());
    store.clear().unwrap();
    assert!(!path.exists());
    store.clear().unwrap();
    assert!(store.load().is_none());
}

#[test]
fn file_store_ignores_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    std::fs::write(&path, b"garbage").unwrap();
    let mut store = FileStore::new(&path);
    assert!(store.load().is_none());
}

#[test]
fn codec_for_path() {
    assert_eq!(Codec::for_path(Path::new("a/b.bin")), Codec::Bincode);
    assert_eq!(Codec::for_path(Path::new("a/b.json")), Codec::Json);
    assert_eq!(Codec::for_path(Path::new("noext")), Codec::Json);
}
