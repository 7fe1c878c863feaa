//! Observer dialogue.
//!
//! ```text
//! AwaitingHello --Hello/Admin-Greetings--> AwaitingWho --Who--> Listing --> Done
//! ```
//!
//! `Listing` writes one `<ip> <port>` line per active player, taken
//! from a registry snapshot, and then closes the connection. The close
//! is the end-of-listing marker.

use std::time::Duration;

use guess_protocol::{ListingEntry, Message};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::connection::LineConnection;
use crate::registry::Registry;
use crate::session::SessionError;
use crate::types::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserverPhase {
    AwaitingHello,
    AwaitingWho,
    Listing,
    Done,
}

pub struct ObserverSession<S> {
    id: ConnectionId,
    conn: LineConnection<S>,
    registry: Registry,
    phase: ObserverPhase,
}

impl<S> ObserverSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        id: ConnectionId,
        stream: S,
        registry: Registry,
        read_timeout: Option<Duration>,
    ) -> Self {
        ObserverSession {
            id,
            conn: LineConnection::new(stream, read_timeout),
            registry,
            phase: ObserverPhase::AwaitingHello,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub async fn run(mut self) -> Result<(), SessionError> {
        let result = self.drive().await;
        self.phase = ObserverPhase::Done;
        self.conn.close().await;

        if let Err(e) = &result {
            debug!(id = %self.id, error = %e, "observer session aborted");
        }
        result
    }

    async fn drive(&mut self) -> Result<(), SessionError> {
        loop {
            match self.phase {
                ObserverPhase::AwaitingHello => {
                    self.conn.expect(Message::Hello).await?;
                    self.conn.send(&Message::AdminGreetings).await?;
                    self.phase = ObserverPhase::AwaitingWho;
                }
                ObserverPhase::AwaitingWho => {
                    self.conn.expect(Message::Who).await?;
                    self.phase = ObserverPhase::Listing;
                }
                ObserverPhase::Listing => {
                    // Lock is released once the snapshot is taken.
                    let players = self.registry.snapshot();

                    let mut out = Vec::with_capacity(players.len() * 24);
                    for entry in &players {
                        ListingEntry::from(entry.addr).encode(&mut out);
                    }
                    if !out.is_empty() {
                        self.conn.send_bytes(&out).await?;
                    }

                    info!(id = %self.id, players = players.len(), "listed active players");
                    self.phase = ObserverPhase::Done;
                }
                ObserverPhase::Done => return Ok(()),
            }
        }
    }
}
