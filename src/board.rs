//! The 10×10 grid owned by one side, and shot resolution against it.

use crate::common::BoardError;
use crate::config::{BOARD_SIZE, TOTAL_SHIP_CELLS};
use crate::placement;
use crate::ship::{Footprint, Ship, ShipKind};

/// Grid edge length as an index type.
pub const GRID: usize = BOARD_SIZE as usize;

/// One square of a board.
///
/// `is_hit` and `is_miss` are mutually exclusive, and `is_miss` is only ever
/// set on water.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Cell {
    pub has_ship: bool,
    pub is_hit: bool,
    pub is_miss: bool,
    #[cfg_attr(feature = "std", serde(default))]
    pub ship_id: Option<ShipKind>,
}

impl Cell {
    /// True once a shot has landed here.
    #[inline]
    pub fn is_tried(&self) -> bool {
        self.is_hit || self.is_miss
    }

    fn is_consistent(&self) -> bool {
        !(self.is_hit && self.is_miss)
            && !(self.is_miss && self.has_ship)
            && !(self.is_hit && !self.has_ship)
            && (self.ship_id.is_none() || self.has_ship)
    }
}

/// Result of a shot at one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ShotOutcome {
    /// The cell had already been shot; nothing changed.
    pub already_tried: bool,
    pub hit: bool,
    /// Ship struck by this shot, when the board knows its id.
    pub ship: Option<ShipKind>,
    /// The struck ship has no intact segment left.
    pub sunk: bool,
}

impl ShotOutcome {
    const ALREADY_TRIED: ShotOutcome = ShotOutcome {
        already_tried: true,
        hit: false,
        ship: None,
        sunk: false,
    };
}

/// Row-major 10×10 matrix of cells. Ship layout is fixed once placed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct Board {
    cells: [[Cell; GRID]; GRID],
}

impl Board {
    /// Open water, nothing placed.
    pub fn new() -> Self {
        Board {
            cells: [[Cell::default(); GRID]; GRID],
        }
    }

    /// Board holding exactly `ships`, each checked against those before it.
    pub fn with_ships(ships: &[Ship]) -> Result<Self, BoardError> {
        let mut board = Board::new();
        for ship in ships {
            board.place_ship(ship)?;
        }
        Ok(board)
    }

    /// Commit a ship after validating it against the ships already here.
    pub fn place_ship(&mut self, ship: &Ship) -> Result<(), BoardError> {
        let footprint = ship.footprint()?;
        placement::check_against(footprint, self.occupancy())?;
        for (row, col) in footprint.iter_set_bits() {
            let cell = &mut self.cells[row][col];
            cell.has_ship = true;
            cell.ship_id = Some(ship.kind());
        }
        Ok(())
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Every cell with its coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| ((r, c), cell))
        })
    }

    /// Cells holding a ship segment.
    pub fn occupancy(&self) -> Footprint {
        let mut mask = Footprint::new();
        for ((row, col), cell) in self.iter() {
            if cell.has_ship {
                // in range by construction
                let _ = mask.set(row, col);
            }
        }
        mask
    }

    pub fn ship_cell_count(&self) -> usize {
        self.occupancy().count_ones()
    }

    /// Number of cells already shot at.
    pub fn shots_taken(&self) -> usize {
        self.iter().filter(|(_, cell)| cell.is_tried()).count()
    }

    /// In range and not yet shot at.
    pub fn is_untried(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|cell| !cell.is_tried())
    }

    /// Coordinates of every cell not yet shot at, row-major.
    pub fn untried_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.iter()
            .filter(|(_, cell)| !cell.is_tried())
            .map(|(pos, _)| pos)
    }

    /// Resolve a shot at (`row`, `col`).
    ///
    /// A cell that was already hit or missed is left untouched and reported
    /// with `already_tried`. Otherwise exactly this cell is marked.
    pub fn apply_shot(&mut self, row: usize, col: usize) -> Result<ShotOutcome, BoardError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(BoardError::InvalidIndex { row, col })?;
        if cell.is_tried() {
            return Ok(ShotOutcome::ALREADY_TRIED);
        }
        if !cell.has_ship {
            cell.is_miss = true;
            log::trace!("shot at ({}, {}) missed", row, col);
            return Ok(ShotOutcome {
                already_tried: false,
                hit: false,
                ship: None,
                sunk: false,
            });
        }
        cell.is_hit = true;
        let ship = cell.ship_id;
        let sunk = ship.is_some_and(|id| {
            self.iter()
                .filter(|(_, c)| c.ship_id == Some(id))
                .all(|(_, c)| c.is_hit)
        });
        log::trace!("shot at ({}, {}) hit {:?}, sunk: {}", row, col, ship, sunk);
        Ok(ShotOutcome {
            already_tried: false,
            hit: true,
            ship,
            sunk,
        })
    }

    /// True iff every ship segment has been hit.
    pub fn is_defeated(&self) -> bool {
        self.iter().all(|(_, cell)| !cell.has_ship || cell.is_hit)
    }

    /// Cell invariants hold everywhere and the full fleet is present.
    pub fn is_consistent(&self) -> bool {
        self.iter().all(|(_, cell)| cell.is_consistent())
            && self.ship_cell_count() == TOTAL_SHIP_CELLS
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
