use chess_board_engine::game_logic::EngineConfig;
use chess_board_engine::mock::{self, TerminalLogger};

fn main() {
    if let Err(e) = TerminalLogger::init_from_env() {
        eprintln!("Failed to install logger: {e}");
    }

    let config = EngineConfig::from_env();
    log::info!("starting with {config:?}");
    mock::run_interactive_terminal(config);
}
