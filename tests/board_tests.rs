use broadside::{
    Board, BoardError, Orientation, Ship, ShipKind, ShotOutcome, TOTAL_SHIP_CELLS,
};

fn fixed_fleet() -> Vec<Ship> {
    vec![
        Ship::new(ShipKind::Carrier, Orientation::Horizontal, 0, 0),
        Ship::new(ShipKind::Battleship, Orientation::Vertical, 2, 9),
        Ship::new(ShipKind::Cruiser, Orientation::Horizontal, 5, 2),
        Ship::new(ShipKind::Destroyer, Orientation::Vertical, 8, 0),
    ]
}

#[test]
fn test_with_ships_marks_cells() {
    let board = Board::with_ships(&fixed_fleet()).unwrap();
    assert_eq!(board.ship_cell_count(), TOTAL_SHIP_CELLS);
    assert_eq!(board.occupancy().count_ones(), TOTAL_SHIP_CELLS);
    let cell = board.cell(3, 9).unwrap();
    assert!(cell.has_ship);
    assert_eq!(cell.ship_id, Some(ShipKind::Battleship));
    assert!(!board.cell(1, 1).unwrap().has_ship);
    assert!(board.is_consistent());
}

#[test]
fn test_place_rejects_overlap() {
    let mut board = Board::with_ships(&fixed_fleet()[..1]).unwrap();
    let err = board
        .place_ship(&Ship::new(ShipKind::Destroyer, Orientation::Vertical, 0, 4))
        .unwrap_err();
    assert_eq!(err, BoardError::ShipOverlaps);
    assert_eq!(board.ship_cell_count(), 5);
}

#[test]
fn test_miss_then_repeat_is_noop() {
    let mut board = Board::with_ships(&fixed_fleet()).unwrap();
    let outcome = board.apply_shot(4, 4).unwrap();
    assert!(!outcome.hit);
    assert!(!outcome.already_tried);
    assert!(board.cell(4, 4).unwrap().is_miss);

    let before = board.clone();
    let again = board.apply_shot(4, 4).unwrap();
    assert!(again.already_tried);
    assert_eq!(board, before);
}

#[test]
fn test_hit_and_sink_destroyer() {
    let mut board = Board::with_ships(&fixed_fleet()).unwrap();
    let first = board.apply_shot(8, 0).unwrap();
    assert_eq!(
        first,
        ShotOutcome {
            already_tried: false,
            hit: true,
            ship: Some(ShipKind::Destroyer),
            sunk: false,
        }
    );
    let second = board.apply_shot(9, 0).unwrap();
    assert!(second.hit);
    assert!(second.sunk);
    assert!(!board.is_defeated());
}

#[test]
fn test_out_of_range_shot() {
    let mut board = Board::with_ships(&fixed_fleet()).unwrap();
    assert_eq!(
        board.apply_shot(10, 3).unwrap_err(),
        BoardError::InvalidIndex { row: 10, col: 3 }
    );
    assert_eq!(board.shots_taken(), 0);
}

#[test]
fn test_defeated_after_all_ship_cells_hit() {
    let fleet = fixed_fleet();
    let mut board = Board::with_ships(&fleet).unwrap();
    assert!(!board.is_defeated());
    let cells: Vec<_> = fleet.iter().flat_map(|s| s.cells()).collect();
    for (i, &(r, c)) in cells.iter().enumerate() {
        assert!(!board.is_defeated(), "defeated early after {} hits", i);
        board.apply_shot(r, c).unwrap();
    }
    assert!(board.is_defeated());
    assert_eq!(board.shots_taken(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_untried_cells() {
    let mut board = Board::new();
    assert_eq!(board.untried_cells().count(), 100);
    board.apply_shot(0, 0).unwrap();
    assert_eq!(board.untried_cells().count(), 99);
    assert!(!board.is_untried(0, 0));
    assert!(!board.is_untried(0, 10));
}

#[test]
fn test_empty_board_is_not_consistent_fleet() {
    assert!(!Board::new().is_consistent());
}
