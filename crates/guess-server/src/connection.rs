//! Line-oriented wrapper around one client stream.
//!
//! Reads are buffered in a `BytesMut` and cut into messages with
//! `guess_protocol::decode_frame`; writes always go out terminated.
//! Generic over the stream so sessions can be driven over in-memory
//! pipes in tests.

use std::time::Duration;

use bytes::BytesMut;
use guess_protocol::wire_types::MAX_LINE_LEN;
use guess_protocol::{decode_eof, decode_frame, encode, Message};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::session::SessionError;

pub struct LineConnection<S> {
    stream: S,
    read_buf: BytesMut,
    read_timeout: Option<Duration>,
}

impl<S> LineConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, read_timeout: Option<Duration>) -> Self {
        LineConnection {
            stream,
            read_buf: BytesMut::with_capacity(MAX_LINE_LEN),
            read_timeout,
        }
    }

    /// Wait for the next complete message.
    pub async fn recv(&mut self) -> Result<Message, SessionError> {
        loop {
            if let Some(msg) = decode_frame(&mut self.read_buf)? {
                return Ok(msg);
            }

            let n = match self.read_timeout {
                Some(limit) => timeout(limit, self.stream.read_buf(&mut self.read_buf))
                    .await
                    .map_err(|_| SessionError::Timeout(limit))??,
                None => self.stream.read_buf(&mut self.read_buf).await?,
            };

            if n == 0 {
                return Err(decode_eof(&self.read_buf).into());
            }
        }
    }

    /// Receive a message and require it to be `expected`.
    pub async fn expect(&mut self, expected: Message) -> Result<(), SessionError> {
        let got = self.recv().await?;
        if got == expected {
            Ok(())
        } else {
            Err(SessionError::Unexpected { expected, got })
        }
    }

    pub async fn send(&mut self, msg: &Message) -> Result<(), SessionError> {
        let mut out = Vec::with_capacity(32);
        encode(msg, &mut out);
        self.send_bytes(&out).await
    }

    /// Write pre-encoded bytes, which must already be terminated.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// Close our side of the stream. Errors are ignored: the peer may
    /// already be gone.
    pub async fn close(&mut self) {
        let _ = self.stream.shutdown().await;
    }
}
