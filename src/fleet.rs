//! Random fleet layouts.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::{Board, GRID};
use crate::common::BoardError;
use crate::config::{FLEET, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::placement::check_against;
use crate::ship::{footprint, Footprint, Orientation, Ship, ShipKind};

/// Samples a uniformly random orientation and anchor for `kind` until one
/// clears `occupied`, giving up after `max_attempts` samples.
pub fn random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    kind: ShipKind,
    occupied: Footprint,
    max_attempts: usize,
) -> Result<Ship, BoardError> {
    for _ in 0..max_attempts {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let row = rng.random_range(0..GRID);
        let col = rng.random_range(0..GRID);
        let Ok(candidate) = footprint(row, col, kind.length(), orientation) else {
            continue;
        };
        if check_against(candidate, occupied).is_ok() {
            return Ok(Ship::new(kind, orientation, row, col));
        }
    }
    Err(BoardError::UnableToPlaceShip {
        ship: kind,
        attempts: max_attempts,
    })
}

/// One attempt at a full fleet, longest ship first.
pub fn try_random_layout<R: Rng + ?Sized>(
    rng: &mut R,
    max_attempts: usize,
) -> Result<Vec<Ship>, BoardError> {
    let mut ships = Vec::with_capacity(NUM_SHIPS);
    let mut occupied = Footprint::new();
    for kind in FLEET {
        let ship = random_placement(rng, kind, occupied, max_attempts)?;
        occupied |= ship.footprint()?;
        ships.push(ship);
    }
    Ok(ships)
}

pub fn try_generate_board<R: Rng + ?Sized>(
    rng: &mut R,
    max_attempts: usize,
) -> Result<Board, BoardError> {
    let ships = try_random_layout(rng, max_attempts)?;
    Board::with_ships(&ships)
}

/// Board with the full fleet placed at random. A layout that runs out of
/// attempts is thrown away and generation starts over.
pub fn generate_board<R: Rng + ?Sized>(rng: &mut R) -> Board {
    let mut restarts = 0usize;
    loop {
        match try_generate_board(rng, MAX_PLACEMENT_ATTEMPTS) {
            Ok(board) => {
                if restarts > 0 {
                    log::debug!("fleet generated after {} restarts", restarts);
                }
                return board;
            }
            Err(err) => {
                restarts += 1;
                log::debug!("restarting fleet generation: {}", err);
            }
        }
    }
}
