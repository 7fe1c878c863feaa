//! The closed set of protocol messages.
//!
//! ```text
//! Player                      Server
//! ------                      ------
//! Hello               →
//!                     ←       Greetings
//! Game                →
//!                     ←       Ready
//! My Guess is: N      →
//!                     ←       Close | Far | Correct
//!
//! Observer                    Server
//! --------                    ------
//! Hello               →
//!                     ←       Admin-Greetings
//! Who                 →
//!                     ←       <ip> <port>   (one per player, then close)
//! ```

use guess_core::GuessOutcome;

use crate::line_codec::ProtocolError;
use crate::wire_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Hello,
    Who,
    Game,
    AdminGreetings,
    Greetings,
    Ready,
    Close,
    Far,
    Correct,
    Guess(i64),
}

impl Message {
    /// Text of the message without the terminator.
    pub fn to_line(&self) -> String {
        match self {
            Message::Hello => HELLO.to_string(),
            Message::Who => WHO.to_string(),
            Message::Game => GAME.to_string(),
            Message::AdminGreetings => ADMIN_GREETINGS.to_string(),
            Message::Greetings => GREETINGS.to_string(),
            Message::Ready => READY.to_string(),
            Message::Close => CLOSE.to_string(),
            Message::Far => FAR.to_string(),
            Message::Correct => CORRECT.to_string(),
            Message::Guess(n) => format!("{}{}", GUESS_PREFIX, n),
        }
    }

    /// The guess result this reply carries, if it is one.
    pub fn as_outcome(&self) -> Option<GuessOutcome> {
        match self {
            Message::Correct => Some(GuessOutcome::Correct),
            Message::Close => Some(GuessOutcome::Close),
            Message::Far => Some(GuessOutcome::Far),
            _ => None,
        }
    }
}

impl From<GuessOutcome> for Message {
    fn from(outcome: GuessOutcome) -> Self {
        match outcome {
            GuessOutcome::Correct => Message::Correct,
            GuessOutcome::Close => Message::Close,
            GuessOutcome::Far => Message::Far,
        }
    }
}

/// Encode a message, terminator included.
///
/// The encoded bytes are appended to `out`.
pub fn encode(msg: &Message, out: &mut Vec<u8>) {
    out.extend_from_slice(msg.to_line().as_bytes());
    out.extend_from_slice(TERMINATOR.as_bytes());
}

/// Decode one line (terminator already stripped).
///
/// Matching is exact and case-sensitive; no surrounding whitespace is
/// tolerated.
pub fn decode_line(line: &str) -> Result<Message, ProtocolError> {
    let msg = match line {
        HELLO => Message::Hello,
        WHO => Message::Who,
        GAME => Message::Game,
        ADMIN_GREETINGS => Message::AdminGreetings,
        GREETINGS => Message::Greetings,
        READY => Message::Ready,
        CLOSE => Message::Close,
        FAR => Message::Far,
        CORRECT => Message::Correct,
        _ => match line.strip_prefix(GUESS_PREFIX) {
            Some(number) => Message::Guess(parse_guess(number)?),
            None => return Err(ProtocolError::UnknownMessage(line.to_string())),
        },
    };
    Ok(msg)
}

fn parse_guess(s: &str) -> Result<i64, ProtocolError> {
    // `i64::from_str` accepts a leading '+', which we keep; it rejects
    // whitespace, which we also keep.
    s.parse::<i64>()
        .map_err(|_| ProtocolError::InvalidGuess(s.to_string()))
}
