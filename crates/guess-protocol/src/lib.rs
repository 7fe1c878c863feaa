//! guess-protocol
//!
//! Wire-level encoding/decoding for the guessing game.
//!
//! Every message is a single ASCII line terminated by `\r\n`:
//!
//! - [`wire_types`] : literals, terminator and size limits
//! - [`message`]    : the closed set of protocol messages
//! - [`line_codec`] : splitting a byte stream into lines
//! - [`listing`]    : `<ip> <port>` lines sent to observers

pub mod wire_types;
pub mod message;
pub mod line_codec;
pub mod listing;

pub use line_codec::{decode_eof, decode_frame, take_line, ProtocolError};
pub use listing::ListingEntry;
pub use message::{decode_line, encode, Message};
