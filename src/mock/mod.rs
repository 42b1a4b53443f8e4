//! Host-side terminal front end: display, scripted input and logging.

mod display;
mod logger;
mod script;
mod terminal;

pub use display::{DisplayError, TerminalDisplay};
pub use logger::{LOG_ENV, TerminalLogger};
pub use script::{ParseError, ScriptStep, ScriptedPlayer, StepOutcome};
pub use terminal::run_interactive_terminal;
