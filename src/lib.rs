pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod mock;

/// Trait for displaying the board and its feedback to the player.
///
/// Abstracts over the concrete front end (the terminal renderer in
/// [`mock`], or any graphical one), so the rules engine never performs I/O
/// itself.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the board with the given feedback highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants
    /// to front-end specific output (terminal colors, etc.).
    fn show(
        &mut self,
        board: &game_state::Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
