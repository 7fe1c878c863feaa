//! Per-connection protocol sessions.
//!
//! One session runs per accepted connection, as its own task. The
//! dispatcher picks the variant from the endpoint the connection came
//! in on; both variants share the same `run` entry point.
//!
//! A session never answers a protocol violation: it logs it, drops its
//! registry membership (if any) and closes the connection.

mod observer;
mod player;

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use guess_protocol::{Message, ProtocolError};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};

pub use observer::{ObserverPhase, ObserverSession};
pub use player::{PlayerPhase, PlayerSession};

use crate::registry::Registry;
use crate::types::{ConnectionId, Role};

/// Why a session ended early.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("expected {expected:?}, got {got:?}")]
    Unexpected { expected: Message, got: Message },

    #[error("expected a guess, got {0:?}")]
    NotAGuess(Message),

    #[error("no message within {0:?}")]
    Timeout(Duration),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl SessionError {
    /// True for a peer that simply went away between messages.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, SessionError::Protocol(ProtocolError::ConnectionClosed))
    }

    /// True when the peer sent something the dialogue does not allow,
    /// as opposed to going away or timing out.
    pub fn is_violation(&self) -> bool {
        match self {
            SessionError::Unexpected { .. } | SessionError::NotAGuess(_) => true,
            SessionError::Protocol(e) => !matches!(
                e,
                ProtocolError::ConnectionClosed | ProtocolError::UnexpectedEof
            ),
            SessionError::Timeout(_) | SessionError::Io(_) => false,
        }
    }
}

pub enum Session<S> {
    Player(PlayerSession<S>),
    Observer(ObserverSession<S>),
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        role: Role,
        id: ConnectionId,
        stream: S,
        peer: SocketAddr,
        registry: Registry,
        read_timeout: Option<Duration>,
    ) -> Self {
        match role {
            Role::Player => Session::Player(PlayerSession::new(id, stream, peer, registry, read_timeout)),
            Role::Observer => Session::Observer(ObserverSession::new(id, stream, registry, read_timeout)),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Session::Player(_) => Role::Player,
            Session::Observer(_) => Role::Observer,
        }
    }

    pub fn id(&self) -> ConnectionId {
        match self {
            Session::Player(s) => s.id(),
            Session::Observer(s) => s.id(),
        }
    }

    /// Drive the dialogue to completion and close the connection.
    pub async fn run(self) -> Result<(), SessionError> {
        match self {
            Session::Player(s) => s.run().await,
            Session::Observer(s) => s.run().await,
        }
    }
}
