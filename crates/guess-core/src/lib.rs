//! guess-core
//!
//! Pure game logic for the number guessing server:
//! - the fixed target range and "close" threshold
//! - `Game`, which owns one private target number
//! - `GuessOutcome`, the result of evaluating a single guess

pub mod error;
pub mod game;
pub mod outcome;

pub use error::GameError;
pub use game::{Game, CLOSE_THRESHOLD, TARGET_MAX, TARGET_MIN};
pub use outcome::GuessOutcome;
