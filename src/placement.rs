//! Placement legality and the manual fleet setup workspace.
//!
//! [`check`] is the only place that decides whether a ship may go somewhere;
//! manual setup, random generation and [`Board::place_ship`] all defer to it.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::{FLEET, MAX_PLACEMENT_ATTEMPTS, NUM_SHIPS};
use crate::fleet;
use crate::ship::{footprint, Footprint, Orientation, Ship, ShipKind};

/// Whether a ship of `length` fits at (`row`, `col`) without leaving the
/// board or touching any of `existing`.
pub fn is_valid(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
    existing: &[Ship],
) -> bool {
    check(row, col, length, orientation, existing).is_ok()
}

/// Like [`is_valid`], but says which rule was broken.
pub fn check(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
    existing: &[Ship],
) -> Result<(), BoardError> {
    let candidate = footprint(row, col, length, orientation)?;
    let mut occupied = Footprint::new();
    for ship in existing {
        occupied |= ship.footprint()?;
    }
    check_against(candidate, occupied)
}

pub(crate) fn check_against(candidate: Footprint, occupied: Footprint) -> Result<(), BoardError> {
    if candidate.intersects(&occupied) {
        return Err(BoardError::ShipOverlaps);
    }
    Ok(())
}

/// Ships placed so far during manual setup.
///
/// Each fleet ship appears at most once; a placed ship must be removed before
/// it can be placed again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct FleetSetup {
    placed: Vec<Ship>,
}

impl FleetSetup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placed(&self) -> &[Ship] {
        &self.placed
    }

    /// Fleet ships not yet placed, longest first.
    pub fn remaining(&self) -> impl Iterator<Item = ShipKind> + '_ {
        FLEET
            .iter()
            .copied()
            .filter(move |kind| !self.is_placed(*kind))
    }

    pub fn is_placed(&self, kind: ShipKind) -> bool {
        self.placed.iter().any(|s| s.kind() == kind)
    }

    /// Every fleet ship placed, each exactly once.
    pub fn is_complete(&self) -> bool {
        self.placed.len() == NUM_SHIPS && FLEET.iter().all(|&kind| self.is_placed(kind))
    }

    /// Placed ship covering (`row`, `col`), if any.
    pub fn ship_at(&self, row: usize, col: usize) -> Option<ShipKind> {
        self.placed
            .iter()
            .find(|s| s.contains(row, col))
            .map(Ship::kind)
    }

    pub fn place(
        &mut self,
        kind: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if self.is_placed(kind) {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        check(row, col, kind.length(), orientation, &self.placed)?;
        self.placed.push(Ship::new(kind, orientation, row, col));
        log::debug!("placed {} at ({}, {}) {:?}", kind, row, col, orientation);
        Ok(())
    }

    /// Take a ship back off the board so it can be repositioned.
    pub fn remove(&mut self, kind: ShipKind) -> Result<Ship, BoardError> {
        let idx = self
            .placed
            .iter()
            .position(|s| s.kind() == kind)
            .ok_or(BoardError::ShipNotPlaced(kind))?;
        Ok(self.placed.remove(idx))
    }

    pub fn clear(&mut self) {
        self.placed.clear();
    }

    /// Replace every placement with a random layout. On failure the current
    /// placements are kept.
    pub fn auto_place<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        self.placed = fleet::try_random_layout(rng, MAX_PLACEMENT_ATTEMPTS)?;
        Ok(())
    }

    /// Re-check every placement against the rules [`Self::place`] enforces.
    /// A restored workspace is not trusted until this passes.
    pub fn check_layout(&self) -> Result<(), BoardError> {
        let mut occupied = Footprint::new();
        for (i, ship) in self.placed.iter().enumerate() {
            if self.placed[..i].iter().any(|s| s.kind() == ship.kind()) {
                return Err(BoardError::ShipAlreadyPlaced(ship.kind()));
            }
            let cells = ship.footprint()?;
            check_against(cells, occupied)?;
            occupied |= cells;
        }
        Ok(())
    }

    /// Board for the finished layout, or `FleetIncomplete`.
    pub fn to_board(&self) -> Result<Board, BoardError> {
        self.check_layout()?;
        if !self.is_complete() {
            return Err(BoardError::FleetIncomplete {
                placed: FLEET.iter().filter(|&&kind| self.is_placed(kind)).count(),
                expected: NUM_SHIPS,
            });
        }
        Board::with_ships(&self.placed)
    }
}
