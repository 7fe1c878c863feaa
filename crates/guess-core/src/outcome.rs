//! Result of a single guess.

/// What a guess tells the player about the target.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Exact hit. The game is over.
    Correct,
    /// Within `CLOSE_THRESHOLD` of the target, but not equal.
    Close,
    /// Anything else.
    Far,
}

impl GuessOutcome {
    /// True once the game has been won.
    pub fn is_final(self) -> bool {
        matches!(self, GuessOutcome::Correct)
    }
}
