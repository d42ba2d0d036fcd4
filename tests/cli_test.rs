#[cfg(feature = "std")]
mod cli_tests {
    use std::process::Command;

    use broadside::cli::{self, Input};
    use broadside::{Board, Game, Mode, Orientation, ShipKind, Side};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse_coord() {
        assert_eq!(cli::parse_coord("A1"), Ok((0, 0)));
        assert_eq!(cli::parse_coord("j10"), Ok((9, 9)));
        assert_eq!(cli::parse_coord("C7"), Ok((6, 2)));
        assert!(cli::parse_coord("K1").is_err());
        assert!(cli::parse_coord("A0").is_err());
        assert!(cli::parse_coord("A11").is_err());
        assert!(cli::parse_coord("").is_err());
        assert!(cli::parse_coord("1A").is_err());
        assert_eq!(cli::coord_to_string(6, 2), "C7");
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(
            cli::parse_input("place carrier B2 v"),
            Ok(Input::Place {
                ship: ShipKind::Carrier,
                row: 1,
                col: 1,
                orientation: Orientation::Vertical,
            })
        );
        assert_eq!(
            cli::parse_input("place Destroyer A1"),
            Ok(Input::Place {
                ship: ShipKind::Destroyer,
                row: 0,
                col: 0,
                orientation: Orientation::Horizontal,
            })
        );
        assert_eq!(cli::parse_input("fire E5"), Ok(Input::Fire(4, 4)));
        assert_eq!(cli::parse_input("  e5 "), Ok(Input::Fire(4, 4)));
        assert_eq!(cli::parse_input(""), Ok(Input::Status));
        assert_eq!(cli::parse_input("new easy"), Ok(Input::New(Some(Mode::FreePlay))));
        assert_eq!(cli::parse_input("new"), Ok(Input::New(None)));
        assert_eq!(cli::parse_input("remove cruiser"), Ok(Input::Remove(ShipKind::Cruiser)));
        assert_eq!(cli::parse_input("quit"), Ok(Input::Quit));
        assert!(cli::parse_input("place submarine A1").is_err());
        assert!(cli::parse_input("fire A1 B2").is_err());
        assert!(cli::parse_input("new hard").is_err());
    }

    #[test]
    fn test_render_hides_intact_ships() {
        let board = Board::with_ships(&[broadside::Ship::new(
            ShipKind::Destroyer,
            Orientation::Horizontal,
            0,
            0,
        )])
        .unwrap();
        assert!(cli::render_board(&board, true).contains('S'));
        assert!(!cli::render_board(&board, false).contains('S'));
    }

    #[test]
    fn test_newly_tried() {
        let mut rng = SmallRng::seed_from_u64(9);
        let game = Game::new(Mode::FreePlay, &mut rng);
        let before = game.state().player_board().clone();
        let mut after = before.clone();
        after.apply_shot(3, 4).unwrap();
        assert_eq!(cli::newly_tried(&before, &after), Some((3, 4)));
        assert_eq!(cli::newly_tried(&after, &after), None);
    }

    #[test]
    fn test_headless_games_finish() {
        let mut rng = SmallRng::seed_from_u64(12345);
        for mode in [Mode::Standard, Mode::FreePlay] {
            let result = cli::run_headless_game(mode, &mut rng).unwrap();
            assert!(result.player_shots <= 100);
            assert!(result.ai_shots <= 100);
            if mode == Mode::FreePlay {
                assert_eq!(result.winner, Side::Player);
                assert_eq!(result.ai_shots, 0);
            }
        }
    }

    #[test]
    fn test_reproducible_headless_game() {
        let a = cli::run_headless_game(Mode::Standard, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = cli::run_headless_game(Mode::Standard, &mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn simulate_binary_smoke() {
        let output = Command::new(env!("CARGO_BIN_EXE_broadside"))
            .args(["simulate", "--seed", "1", "--games", "2"])
            .output()
            .expect("failed to run broadside binary");
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
        let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
        assert_eq!(v["games"], 2);
        assert_eq!(v["results"].as_array().map(Vec::len), Some(2));
        assert!(v["results"][0]["winner"].is_string());
    }
}
