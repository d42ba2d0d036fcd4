use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 4;

/// The canonical fleet, longest first. Generation places ships in this order.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Destroyer,
];

/// Total number of ship segments on a fully set up board.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 2;

/// Random samples tried per ship before a layout attempt is abandoned.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Delay between the player's shot and the AI's reply.
pub const AI_THINK_DELAY_MS: u64 = 200;

/// Period of the elapsed-time counter.
pub const TICK_INTERVAL_MS: u64 = 1000;
