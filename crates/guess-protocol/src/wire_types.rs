//! Literals and constants of the text protocol.

/// Every line on the wire ends with this.
pub const TERMINATOR: &str = "\r\n";

/// Longest accepted line, terminator included.
pub const MAX_LINE_LEN: usize = 1024;

// Client → server
pub const HELLO: &str = "Hello";
pub const GAME: &str = "Game";
pub const WHO: &str = "Who";
pub const GUESS_PREFIX: &str = "My Guess is: ";

// Server → client
pub const GREETINGS: &str = "Greetings";
pub const ADMIN_GREETINGS: &str = "Admin-Greetings";
pub const READY: &str = "Ready";
pub const CLOSE: &str = "Close";
pub const FAR: &str = "Far";
pub const CORRECT: &str = "Correct";
