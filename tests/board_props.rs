use std::collections::HashSet;

use broadside::{
    generate_board, try_random_layout, Board, BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS,
    TOTAL_SHIP_CELLS,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn shot_board(seed: u64) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = generate_board(&mut rng);
    let shots = rng.random_range(0..60);
    for _ in 0..shots {
        let r = rng.random_range(0..BOARD_SIZE as usize);
        let c = rng.random_range(0..BOARD_SIZE as usize);
        board.apply_shot(r, c).unwrap();
    }
    board
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_board_has_canonical_fleet(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = generate_board(&mut rng);
        prop_assert_eq!(board.ship_cell_count(), TOTAL_SHIP_CELLS);
        for kind in FLEET {
            let count = board.iter().filter(|(_, c)| c.ship_id == Some(kind)).count();
            prop_assert_eq!(count, kind.length());
        }
        prop_assert!(board.is_consistent());
    }

    #[test]
    fn random_layout_ships_are_disjoint_and_in_bounds(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let ships = try_random_layout(&mut rng, MAX_PLACEMENT_ATTEMPTS).unwrap();
        let mut seen = HashSet::new();
        for ship in &ships {
            for (r, c) in ship.cells() {
                prop_assert!(r < BOARD_SIZE as usize && c < BOARD_SIZE as usize);
                prop_assert!(seen.insert((r, c)), "cell ({}, {}) shared", r, c);
            }
        }
        prop_assert_eq!(seen.len(), TOTAL_SHIP_CELLS);
        let lengths: Vec<_> = ships.iter().map(|s| s.length()).collect();
        prop_assert_eq!(lengths, vec![5, 4, 3, 2]);
    }

    #[test]
    fn hit_and_miss_never_both_set(seed in any::<u64>()) {
        let board = shot_board(seed);
        for (_, cell) in board.iter() {
            prop_assert!(!(cell.is_hit && cell.is_miss));
            prop_assert!(!cell.is_miss || !cell.has_ship);
        }
    }

    #[test]
    fn shot_is_idempotent(
        seed in any::<u64>(),
        row in 0..BOARD_SIZE as usize,
        col in 0..BOARD_SIZE as usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = generate_board(&mut rng);
        let before = board.clone();
        let first = board.apply_shot(row, col).unwrap();
        prop_assert!(!first.already_tried);
        prop_assert_eq!(first.hit, before.cell(row, col).unwrap().has_ship);
        let once = board.clone();
        prop_assert_ne!(&once, &before);

        let second = board.apply_shot(row, col).unwrap();
        prop_assert!(second.already_tried);
        prop_assert_eq!(&board, &once);
    }

    #[test]
    fn defeated_iff_every_ship_cell_hit(seed in any::<u64>()) {
        let board = shot_board(seed);
        let all_hit = board.iter().all(|(_, c)| !c.has_ship || c.is_hit);
        prop_assert_eq!(board.is_defeated(), all_hit);
    }
}
