//! Chess rules: move generation, check detection, legality and game status.

pub mod attacks;
mod config;
mod engine;
pub mod movegen;
mod moves;
mod session;

pub use attacks::{CheckDetection, UnknownCheckDetection};
pub use config::{CHECK_DETECTION_ENV, EngineConfig};
pub use engine::{GameEngine, GameStatus};
pub use moves::Move;
pub use session::{ClickOutcome, IllegalMove, Session};
