//! Errors shared by the board, placement and fleet modules.

use crate::bitboard::BitBoardError;
use crate::ship::ShipKind;

/// Errors returned by board and placement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Underlying bitboard error.
    #[error("bitboard error: {0}")]
    BitBoard(#[from] BitBoardError),
    /// Row or column outside `0..BOARD_SIZE`.
    #[error("cell ({row}, {col}) is outside the board")]
    InvalidIndex { row: usize, col: usize },
    /// The ship is already on the board; remove it before moving it.
    #[error("{0} is already placed")]
    ShipAlreadyPlaced(ShipKind),
    /// The ship is not on the board.
    #[error("{0} has not been placed")]
    ShipNotPlaced(ShipKind),
    /// Placement overlaps another ship.
    #[error("ship placement overlaps another ship")]
    ShipOverlaps,
    /// Placement leaves the board.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Random placement ran out of attempts.
    #[error("unable to place {ship} after {attempts} attempts")]
    UnableToPlaceShip { ship: ShipKind, attempts: usize },
    /// Not every ship of the fleet has been placed.
    #[error("fleet is incomplete: {placed} of {expected} ships placed")]
    FleetIncomplete { placed: usize, expected: usize },
}
