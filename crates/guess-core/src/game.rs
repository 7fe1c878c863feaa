//! One round of the guessing game.
//!
//! A `Game` owns a target drawn uniformly from `TARGET_MIN..=TARGET_MAX`.
//! The target never changes after construction and is only exposed to
//! the evaluation logic here (and to tests).

use rand::Rng;

use crate::error::GameError;
use crate::outcome::GuessOutcome;

/// Lowest possible target (inclusive).
pub const TARGET_MIN: i64 = 1;

/// Highest possible target (inclusive).
pub const TARGET_MAX: i64 = 30;

/// A guess strictly closer than this (and not equal) is reported as `Close`.
pub const CLOSE_THRESHOLD: i64 = 5;

/// A single player's game.
#[derive(Debug)]
pub struct Game {
    target: i64,
}

impl Game {
    /// Draw a new target from the thread-local RNG.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Draw a new target from the given RNG.
    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Game {
            target: rng.gen_range(TARGET_MIN..=TARGET_MAX),
        }
    }

    /// Build a game around a known target.
    pub fn with_target(target: i64) -> Result<Self, GameError> {
        if !(TARGET_MIN..=TARGET_MAX).contains(&target) {
            return Err(GameError::TargetOutOfRange {
                target,
                min: TARGET_MIN,
                max: TARGET_MAX,
            });
        }
        Ok(Game { target })
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    /// Evaluate a guess against the target.
    ///
    /// The exact-match check runs first so a hit is never reported as
    /// `Close`. Distance uses `abs_diff` so extreme guesses cannot overflow.
    pub fn evaluate(&self, guess: i64) -> GuessOutcome {
        if guess == self.target {
            GuessOutcome::Correct
        } else if self.target.abs_diff(guess) < CLOSE_THRESHOLD as u64 {
            GuessOutcome::Close
        } else {
            GuessOutcome::Far
        }
    }
}
