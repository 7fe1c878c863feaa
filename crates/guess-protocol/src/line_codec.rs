//! Line framing over a byte buffer.
//!
//! The stream is read into a `BytesMut`; these helpers cut complete
//! `\r\n`-terminated lines off the front of it. They never touch a
//! socket, so the same code serves the server sessions and the clients.
//!
//! A frame ends at the first `\n`, which must be preceded by `\r`.

use bytes::BytesMut;
use thiserror::Error;

use crate::message::{decode_line, Message};
use crate::wire_types::MAX_LINE_LEN;

/// Errors that can arise when decoding a line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Peer closed the connection between messages.
    #[error("connection closed")]
    ConnectionClosed,
    /// Peer closed the connection in the middle of a line.
    #[error("connection closed mid-line")]
    UnexpectedEof,
    /// Line exceeded `MAX_LINE_LEN` without a terminator.
    #[error("line longer than {} bytes", MAX_LINE_LEN)]
    LineTooLong,
    /// Line ended with a bare `\n`.
    #[error("line not terminated by CRLF")]
    MissingCarriageReturn,
    /// Line contained non-ASCII bytes.
    #[error("line is not ASCII text")]
    InvalidEncoding,
    /// Not one of the known literals.
    #[error("unknown message: {0:?}")]
    UnknownMessage(String),
    /// `My Guess is: ` followed by something that is not an integer.
    #[error("invalid guess: {0:?}")]
    InvalidGuess(String),
}

/// Cut the next complete line off `buf`, terminator stripped.
///
/// Returns `Ok(None)` when more bytes are needed.
pub fn take_line(buf: &mut BytesMut) -> Result<Option<String>, ProtocolError> {
    let newline_pos = match buf.iter().position(|&b| b == b'\n') {
        Some(pos) => pos,
        None if buf.len() >= MAX_LINE_LEN => return Err(ProtocolError::LineTooLong),
        None => return Ok(None),
    };

    if newline_pos + 1 > MAX_LINE_LEN {
        return Err(ProtocolError::LineTooLong);
    }

    let frame = buf.split_to(newline_pos + 1);
    if newline_pos == 0 || frame[newline_pos - 1] != b'\r' {
        return Err(ProtocolError::MissingCarriageReturn);
    }

    let body = &frame[..newline_pos - 1];
    if !body.is_ascii() {
        return Err(ProtocolError::InvalidEncoding);
    }

    // ASCII is always valid UTF-8.
    Ok(Some(String::from_utf8_lossy(body).into_owned()))
}

/// Decode the next complete message from `buf`, if there is one.
pub fn decode_frame(buf: &mut BytesMut) -> Result<Option<Message>, ProtocolError> {
    match take_line(buf)? {
        Some(line) => decode_line(&line).map(Some),
        None => Ok(None),
    }
}

/// Error to report when the peer hit EOF with `buf` still pending.
pub fn decode_eof(buf: &BytesMut) -> ProtocolError {
    if buf.is_empty() {
        ProtocolError::ConnectionClosed
    } else {
        ProtocolError::UnexpectedEof
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waits_for_terminator() {
        let mut buf = BytesMut::from(&b"Hel"[..]);
        assert_eq!(decode_frame(&mut buf), Ok(None));
        buf.extend_from_slice(b"lo\r");
        assert_eq!(decode_frame(&mut buf), Ok(None));
        buf.extend_from_slice(b"\n");
        assert_eq!(decode_frame(&mut buf), Ok(Some(Message::Hello)));
        assert!(buf.is_empty());
    }

    #[test]
    fn leaves_following_bytes_in_place() {
        let mut buf = BytesMut::from(&b"Hello\r\nGame\r\nWh"[..]);
        assert_eq!(decode_frame(&mut buf), Ok(Some(Message::Hello)));
        assert_eq!(decode_frame(&mut buf), Ok(Some(Message::Game)));
        assert_eq!(decode_frame(&mut buf), Ok(None));
        assert_eq!(&buf[..], b"Wh");
    }

    #[test]
    fn bare_newline_is_rejected() {
        let mut buf = BytesMut::from(&b"Hello\n"[..]);
        assert_eq!(decode_frame(&mut buf), Err(ProtocolError::MissingCarriageReturn));

        let mut buf = BytesMut::from(&b"\n"[..]);
        assert_eq!(take_line(&mut buf), Err(ProtocolError::MissingCarriageReturn));
    }

    #[test]
    fn empty_line_is_unknown() {
        let mut buf = BytesMut::from(&b"\r\n"[..]);
        assert_eq!(
            decode_frame(&mut buf),
            Err(ProtocolError::UnknownMessage(String::new()))
        );
    }

    #[test]
    fn overlong_lines_are_rejected() {
        let mut buf = BytesMut::from(&vec![b'a'; MAX_LINE_LEN][..]);
        assert_eq!(take_line(&mut buf), Err(ProtocolError::LineTooLong));

        let mut long = vec![b'a'; MAX_LINE_LEN];
        long.extend_from_slice(b"\r\n");
        let mut buf = BytesMut::from(&long[..]);
        assert_eq!(take_line(&mut buf), Err(ProtocolError::LineTooLong));
    }

    #[test]
    fn non_ascii_is_rejected() {
        let mut buf = BytesMut::from("Héllo\r\n".as_bytes());
        assert_eq!(take_line(&mut buf), Err(ProtocolError::InvalidEncoding));
    }

    #[test]
    fn eof_classification() {
        assert_eq!(decode_eof(&BytesMut::new()), ProtocolError::ConnectionClosed);
        assert_eq!(
            decode_eof(&BytesMut::from(&b"Hel"[..])),
            ProtocolError::UnexpectedEof
        );
    }
}
