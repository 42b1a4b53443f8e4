use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::compute_feedback;
use crate::game_logic::{ClickOutcome, EngineConfig, GameEngine, GameStatus, Session};
use crate::game_state::Square;

use super::TerminalDisplay;

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// Runs an interactive terminal game.
///
/// Squares are clicked by name, two clicks make a move, illegal moves are
/// silently dropped and `z` takes back the last move.
pub fn run_interactive_terminal(config: EngineConfig) {
    let mut session = Session::new(GameEngine::with_config(config));
    let mut display = TerminalDisplay::new();
    let mut message = String::new();

    loop {
        clear_screen();
        if let Err(e) = draw_interface(&mut display, &session, &message) {
            eprintln!("Failed to draw board: {e}");
            break;
        }
        message.clear();

        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {e}");
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {e}");
                break;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            continue;
        };

        match command {
            "c" => match parts.get(1).map(|s| s.parse::<Square>()) {
                Some(Ok(square)) => message = describe_click(session.click(square)),
                Some(Err(e)) => message = format!("Invalid square: {e}"),
                None => message = "Usage: c <square>".to_string(),
            },
            "m" => match parts.get(1).and_then(|s| parse_move(s)) {
                Some((from, to)) => {
                    message = match session.try_move(from, to) {
                        Ok(mv) => format!("Played {mv}"),
                        Err(e) => e.to_string(),
                    }
                }
                None => message = "Usage: m <from><to> (e.g. m e2e4)".to_string(),
            },
            "z" => {
                message = match session.undo() {
                    Some(mv) => format!("Took back {mv}"),
                    None => "Nothing to undo".to_string(),
                }
            }
            "load" => {
                let fen = input.trim_start().trim_start_matches("load").trim();
                match GameEngine::from_fen_with_config(fen, config) {
                    Ok(engine) => {
                        session.reset(engine);
                        message = "Position loaded from FEN".to_string();
                    }
                    Err(e) => message = format!("Invalid FEN: {e}"),
                }
            }
            "r" => {
                session.reset(GameEngine::with_config(config));
                message = "Reset to initial position".to_string();
            }
            "p" => {}
            "q" => break,
            _ => message = "Unknown command".to_string(),
        }
    }
}

/// Draws the complete interface: help text, board, status line.
fn draw_interface(
    display: &mut TerminalDisplay,
    session: &Session,
    message: &str,
) -> Result<(), super::DisplayError> {
    println!("♟️  Chess");
    println!();
    println!("Commands: c <square> | m <e2e4> | z (undo) | load <fen> | r (reset) | p | q (quit)");
    println!();

    display.show(session.engine().board(), &compute_feedback(session))?;

    println!();
    println!("{}", status_line(session));
    if let Some(last) = session.engine().move_log().last() {
        println!("Last move: {last}");
    }
    if !message.is_empty() {
        println!("{message}");
    }
    Ok(())
}

fn status_line(session: &Session) -> String {
    let engine = session.engine();
    match engine.status() {
        GameStatus::Checkmate { loser } => format!("Checkmate, {} wins", !loser),
        GameStatus::Stalemate => "Stalemate".to_string(),
        GameStatus::Ongoing if engine.in_check() => {
            format!("{} to move (check)", engine.side_to_move())
        }
        GameStatus::Ongoing => format!("{} to move", engine.side_to_move()),
    }
}

fn describe_click(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Selected(square) => format!("Selected {square}"),
        ClickOutcome::Deselected => "Selection cleared".to_string(),
        ClickOutcome::Moved(mv) => format!("Played {mv}"),
        ClickOutcome::Ignored(_) => String::new(),
    }
}

/// Parse "e2e4" into its two squares.
fn parse_move(s: &str) -> Option<(Square, Square)> {
    if !s.is_ascii() || s.len() != 4 {
        return None;
    }
    let (from, to) = s.split_at(2);
    Some((from.parse().ok()?, to.parse().ok()?))
}
