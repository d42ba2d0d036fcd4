#![cfg(feature = "std")]
//! Plain-text front end helpers: coordinates, command parsing, board dumps
//! and headless games.

use std::fmt::Write as _;
use std::string::String;

use rand::Rng;

use crate::ai;
use crate::board::{Board, GRID};
use crate::config::BOARD_SIZE;
use crate::game::{format_elapsed, Game, GameState, Mode, Phase, Side};
use crate::placement::FleetSetup;
use crate::ship::{Orientation, ShipKind};

pub const HELP: &str = "\
Commands:
  place <ship> <cell> <h|v>   place a ship during setup (e.g. place carrier A1 h)
  remove <ship>               take a placed ship back
  clear                       remove every placed ship
  auto                        place the whole fleet at random
  done                        finish setup
  fire <cell> | <cell>        shoot at the opponent board (e.g. fire B7)
  new [normal|easy]           abandon this game and start another
  status                      show the boards again
  quit                        leave (the game is saved)";

/// `A1`-style name of (`row`, `col`).
pub fn coord_to_string(row: usize, col: usize) -> String {
    let letter = (b'A' + col as u8) as char;
    format!("{}{}", letter, row + 1)
}

/// Parse an `A1`-style cell (column letter, 1-based row).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let mut chars = input.trim().chars();
    let col_ch = chars
        .next()
        .ok_or("Empty coordinate")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= GRID {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-{}", row_str, BOARD_SIZE))?;
    if row == 0 || row > GRID {
        return Err(format!("Row {} out of bounds - must be 1-{}", row, BOARD_SIZE));
    }
    Ok((row - 1, col))
}

fn parse_orientation(input: &str) -> Result<Orientation, String> {
    match input.to_ascii_lowercase().as_str() {
        "h" | "horizontal" => Ok(Orientation::Horizontal),
        "v" | "vertical" => Ok(Orientation::Vertical),
        other => Err(format!("Invalid orientation '{}' - use h or v", other)),
    }
}

fn parse_ship(input: Option<&str>) -> Result<ShipKind, String> {
    let name = input.ok_or("Missing ship name")?;
    ShipKind::from_name(name).ok_or_else(|| format!("Unknown ship '{}'", name))
}

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Place {
        ship: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    },
    Remove(ShipKind),
    Clear,
    Auto,
    Done,
    Fire(usize, usize),
    New(Option<Mode>),
    Status,
    Help,
    Quit,
}

pub fn parse_input(line: &str) -> Result<Input, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Input::Status);
    };
    let input = match head.to_ascii_lowercase().as_str() {
        "place" => {
            let ship = parse_ship(parts.next())?;
            let (row, col) = parse_coord(parts.next().ok_or("Missing cell")?)?;
            let orientation = parts
                .next()
                .map(parse_orientation)
                .transpose()?
                .unwrap_or(Orientation::Horizontal);
            Input::Place {
                ship,
                row,
                col,
                orientation,
            }
        }
        "remove" => Input::Remove(parse_ship(parts.next())?),
        "clear" => Input::Clear,
        "auto" => Input::Auto,
        "done" => Input::Done,
        "fire" => {
            let (row, col) = parse_coord(parts.next().ok_or("Missing cell")?)?;
            Input::Fire(row, col)
        }
        "new" => Input::New(
            parts
                .next()
                .map(|m| m.parse::<Mode>().map_err(|e| e.to_string()))
                .transpose()?,
        ),
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => {
            let (row, col) = parse_coord(head)?;
            Input::Fire(row, col)
        }
    };
    if let Some(extra) = parts.next() {
        return Err(format!("Unexpected '{}'", extra));
    }
    Ok(input)
}

fn render_grid(out: &mut String, symbol: impl Fn(usize, usize) -> char) {
    out.push_str("    ");
    for c in 0..GRID {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for r in 0..GRID {
        let _ = write!(out, "  {:2}", r + 1);
        for c in 0..GRID {
            let _ = write!(out, " {}", symbol(r, c));
        }
        out.push('\n');
    }
}

/// Text dump of a board. Intact ships are shown only with `reveal`.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    render_grid(&mut out, |r, c| match board.cell(r, c) {
        Some(cell) if cell.is_hit => 'X',
        Some(cell) if cell.is_miss => 'o',
        Some(cell) if reveal && cell.has_ship => 'S',
        _ => '.',
    });
    out
}

/// Text dump of the placements made so far during setup.
pub fn render_setup(setup: &FleetSetup) -> String {
    let mut out = String::new();
    render_grid(&mut out, |r, c| match setup.ship_at(r, c) {
        Some(kind) => kind.name().chars().next().unwrap_or('S'),
        None => '.',
    });
    let remaining: Vec<String> = setup
        .remaining()
        .map(|kind| format!("{} ({})", kind, kind.length()))
        .collect();
    if remaining.is_empty() {
        out.push_str("All ships placed - type 'done' to start.\n");
    } else {
        let _ = writeln!(out, "To place: {}", remaining.join(", "));
    }
    out
}

/// Everything a player needs to see for `state`.
pub fn render_state(state: &GameState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mode: {}   Time: {}",
        state.mode(),
        format_elapsed(state.elapsed_seconds())
    );
    match state.phase() {
        Phase::Setup => {
            out.push_str("Place your ships\n");
            out.push_str(&render_setup(state.setup()));
            return out;
        }
        Phase::GameOver => {
            if let Some(winner) = state.winner() {
                let _ = writeln!(out, "Game Over! {} won!", winner);
            }
        }
        Phase::PlayerTurn | Phase::AiTurn => {
            let _ = writeln!(out, "Current turn: {}", state.turn());
        }
    }
    if state.mode() == Mode::Standard {
        out.push_str("Your board\n");
        out.push_str(&render_board(state.player_board(), true));
    }
    out.push_str("Opponent board\n");
    out.push_str(&render_board(state.ai_board(), state.is_game_over()));
    out
}

/// First cell tried in `after` that was untried in `before`.
pub fn newly_tried(before: &Board, after: &Board) -> Option<(usize, usize)> {
    after
        .iter()
        .find(|&((r, c), cell)| cell.is_tried() && before.is_untried(r, c))
        .map(|(pos, _)| pos)
}

/// Summary of one headless game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct HeadlessResult {
    pub winner: Side,
    pub player_shots: usize,
    pub ai_shots: usize,
}

/// Play a whole game without timers: a random shooter on the player's side
/// against the AI. Standard games are set up with a random layout.
pub fn run_headless_game<R: Rng + ?Sized>(
    mode: Mode,
    rng: &mut R,
) -> anyhow::Result<HeadlessResult> {
    let mut game = Game::new(mode, rng);
    if game.phase() == Phase::Setup {
        game.auto_place(rng)?;
        game.complete_setup()?;
    }
    loop {
        match game.phase() {
            Phase::PlayerTurn => {
                let (row, col) = ai::hunt(game.state().ai_board(), rng)
                    .ok_or_else(|| anyhow::anyhow!("no untried cell left on the AI board"))?;
                game.player_shot(row, col)?;
            }
            Phase::AiTurn => {
                game.ai_shot(rng)?;
            }
            Phase::GameOver => break,
            Phase::Setup => anyhow::bail!("setup did not complete"),
        }
    }
    let state = game.state();
    Ok(HeadlessResult {
        winner: state
            .winner()
            .ok_or_else(|| anyhow::anyhow!("finished game has no winner"))?,
        player_shots: state.ai_board().shots_taken(),
        ai_shots: state.player_board().shots_taken(),
    })
}
