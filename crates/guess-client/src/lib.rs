//! guess-client
//!
//! Scripted clients for the number guessing server:
//! - [`player::PlayerClient`]: greets, starts a game, sends guesses
//! - [`admin::list_players`]: greets as an observer and reads the listing

pub mod network;
pub mod player;
pub mod admin;

pub use admin::list_players;
pub use player::PlayerClient;
