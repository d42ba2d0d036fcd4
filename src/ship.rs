//! Ship kinds, orientations and placed ships.

use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::BoardError;
use crate::config::BOARD_SIZE;

/// Set of cells on a standard board.
pub type Footprint = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Orientation {
    /// Extends along the anchor's row, towards higher columns.
    Horizontal,
    /// Extends along the anchor's column, towards higher rows.
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Cell of segment `i` for a ship anchored at (`row`, `col`).
    #[inline]
    fn segment(self, row: usize, col: usize, i: usize) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (row, col + i),
            Orientation::Vertical => (row + i, col),
        }
    }
}

/// The four ship classes of the fleet. The variant name doubles as the ship id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Destroyer,
}

impl ShipKind {
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Destroyer => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Case-insensitive lookup by id.
    pub fn from_name(name: &str) -> Option<Self> {
        crate::config::FLEET
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cells covered by a ship of `length` anchored at (`row`, `col`), or
/// `ShipOutOfBounds` if any of them leaves the board.
pub fn footprint(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
) -> Result<Footprint, BoardError> {
    let n = BOARD_SIZE as usize;
    let fits = match orientation {
        Orientation::Horizontal => row < n && col + length <= n,
        Orientation::Vertical => col < n && row + length <= n,
    };
    if !fits || length == 0 {
        return Err(BoardError::ShipOutOfBounds);
    }
    let cells = (0..length).map(|i| orientation.segment(row, col, i));
    Ok(Footprint::from_cells(cells)?)
}

/// A ship anchored on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Ship {
    #[cfg_attr(feature = "std", serde(rename = "id"))]
    kind: ShipKind,
    orientation: Orientation,
    anchor_row: usize,
    anchor_col: usize,
}

impl Ship {
    /// Describes a placement. Legality is checked by the placement validator,
    /// not here.
    pub const fn new(kind: ShipKind, orientation: Orientation, row: usize, col: usize) -> Self {
        Ship {
            kind,
            orientation,
            anchor_row: row,
            anchor_col: col,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn length(&self) -> usize {
        self.kind.length()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Anchor (row, col): the segment with the lowest row and column.
    pub fn origin(&self) -> (usize, usize) {
        (self.anchor_row, self.anchor_col)
    }

    /// Covered cells, anchor first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let Ship {
            orientation,
            anchor_row,
            anchor_col,
            ..
        } = *self;
        (0..self.length()).map(move |i| orientation.segment(anchor_row, anchor_col, i))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells().any(|cell| cell == (row, col))
    }

    pub fn footprint(&self) -> Result<Footprint, BoardError> {
        footprint(
            self.anchor_row,
            self.anchor_col,
            self.length(),
            self.orientation,
        )
    }
}
