use broadside::{footprint, BoardError, Orientation, Ship, ShipKind, FLEET};

#[test]
fn test_fleet_lengths() {
    let lengths: Vec<_> = FLEET.iter().map(|k| k.length()).collect();
    assert_eq!(lengths, vec![5, 4, 3, 2]);
}

#[test]
fn test_from_name() {
    assert_eq!(ShipKind::from_name("carrier"), Some(ShipKind::Carrier));
    assert_eq!(ShipKind::from_name("Destroyer"), Some(ShipKind::Destroyer));
    assert_eq!(ShipKind::from_name("Submarine"), None);
}

#[test]
fn test_cells_horizontal_and_vertical() {
    let h = Ship::new(ShipKind::Cruiser, Orientation::Horizontal, 2, 1);
    assert_eq!(h.cells().collect::<Vec<_>>(), vec![(2, 1), (2, 2), (2, 3)]);

    let v = Ship::new(ShipKind::Battleship, Orientation::Vertical, 0, 0);
    assert_eq!(
        v.cells().collect::<Vec<_>>(),
        vec![(0, 0), (1, 0), (2, 0), (3, 0)]
    );
    assert!(v.contains(3, 0));
    assert!(!v.contains(4, 0));
}

#[test]
fn test_footprint_bounds() {
    let fp = footprint(0, 5, 5, Orientation::Horizontal).unwrap();
    assert_eq!(fp.count_ones(), 5);
    assert!(fp.contains(0, 9));

    assert_eq!(
        footprint(0, 6, 5, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert_eq!(
        footprint(8, 0, 3, Orientation::Vertical).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
    assert_eq!(
        footprint(10, 0, 2, Orientation::Horizontal).unwrap_err(),
        BoardError::ShipOutOfBounds
    );
}

#[test]
fn test_orientation_toggle() {
    assert_eq!(Orientation::Horizontal.toggled(), Orientation::Vertical);
    assert_eq!(Orientation::Vertical.toggled(), Orientation::Horizontal);
}
