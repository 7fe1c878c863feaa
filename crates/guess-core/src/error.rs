//! Error types for the core game rules.
//!
//! Evaluating a guess is infallible; the only thing that can go wrong
//! is building a `Game` around a target outside the fixed range.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("target {target} is outside {min}..={max}")]
    TargetOutOfRange { target: i64, min: i64, max: i64 },
}
