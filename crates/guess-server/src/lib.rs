//! guess-server
//!
//! Multi-client async TCP server for the number guessing game.
//!
//! Two endpoints are served: players guess a private number on one,
//! observers list the currently active players on the other.

pub mod config;
pub mod types;
pub mod registry;
pub mod connection;
pub mod session;
pub mod server;

pub use config::Config;
pub use registry::{Registration, Registry, RegistryEntry};
pub use server::Server;
pub use session::{Session, SessionError};
pub use types::{ConnectionId, Role};
