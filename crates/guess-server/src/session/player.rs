//! Player dialogue.
//!
//! ```text
//! AwaitingHello --Hello/Greetings--> AwaitingGame --Game/Ready--> Guessing
//! Guessing --guess/Close|Far--> Guessing
//! Guessing --guess/Correct--> Done
//! any state --anything else / read failure--> Done (no reply)
//! ```
//!
//! The player is listed in the registry exactly while it is `Guessing`.
//! Membership is held by a `Registration`, so it is released on every
//! path out of the session, including task cancellation.

use std::net::SocketAddr;
use std::time::Duration;

use guess_core::Game;
use guess_protocol::Message;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info, trace};

use crate::connection::LineConnection;
use crate::registry::{Registration, Registry};
use crate::session::SessionError;
use crate::types::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    AwaitingHello,
    AwaitingGame,
    Guessing,
    Done,
}

pub struct PlayerSession<S> {
    id: ConnectionId,
    peer: SocketAddr,
    conn: LineConnection<S>,
    registry: Registry,
    game: Game,
    phase: PlayerPhase,
    guesses: u32,
}

impl<S> PlayerSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// New session with a freshly drawn target.
    pub fn new(
        id: ConnectionId,
        stream: S,
        peer: SocketAddr,
        registry: Registry,
        read_timeout: Option<Duration>,
    ) -> Self {
        Self::with_game(id, stream, peer, registry, read_timeout, Game::random())
    }

    pub fn with_game(
        id: ConnectionId,
        stream: S,
        peer: SocketAddr,
        registry: Registry,
        read_timeout: Option<Duration>,
        game: Game,
    ) -> Self {
        trace!(%id, target = game.target(), "drew target");
        PlayerSession {
            id,
            peer,
            conn: LineConnection::new(stream, read_timeout),
            registry,
            game,
            phase: PlayerPhase::AwaitingHello,
            guesses: 0,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn run(mut self) -> Result<(), SessionError> {
        let mut registration = None;
        let result = self.drive(&mut registration).await;

        drop(registration);
        self.phase = PlayerPhase::Done;
        self.conn.close().await;

        match &result {
            Ok(()) => info!(id = %self.id, guesses = self.guesses, "player guessed the number"),
            Err(e) => debug!(id = %self.id, error = %e, "player session aborted"),
        }
        result
    }

    async fn drive(&mut self, registration: &mut Option<Registration>) -> Result<(), SessionError> {
        loop {
            match self.phase {
                PlayerPhase::AwaitingHello => {
                    self.conn.expect(Message::Hello).await?;
                    self.conn.send(&Message::Greetings).await?;
                    self.phase = PlayerPhase::AwaitingGame;
                }
                PlayerPhase::AwaitingGame => {
                    self.conn.expect(Message::Game).await?;
                    // Listed before `Ready` goes out, so a client that has
                    // seen `Ready` is always visible to observers.
                    *registration = Some(self.registry.register(self.id, self.peer));
                    self.conn.send(&Message::Ready).await?;
                    self.phase = PlayerPhase::Guessing;
                    debug!(id = %self.id, peer = %self.peer, "game started");
                }
                PlayerPhase::Guessing => {
                    let guess = match self.conn.recv().await? {
                        Message::Guess(n) => n,
                        other => return Err(SessionError::NotAGuess(other)),
                    };
                    self.guesses += 1;

                    let outcome = self.game.evaluate(guess);
                    debug!(id = %self.id, guess, ?outcome, "guess");

                    if outcome.is_final() {
                        // Unlisted before `Correct` goes out, so a client that
                        // has seen `Correct` is never visible to observers.
                        registration.take();
                        self.phase = PlayerPhase::Done;
                    }
                    self.conn.send(&Message::from(outcome)).await?;
                }
                PlayerPhase::Done => return Ok(()),
            }
        }
    }
}
