// crates/guess-client/src/player.rs

use anyhow::{anyhow, Result};
use guess_core::GuessOutcome;
use guess_protocol::Message;

use crate::network::ServerConnection;

/// A player that has completed the greeting and started a game.
pub struct PlayerClient {
    conn: ServerConnection,
    finished: bool,
}

impl PlayerClient {
    /// Connect, send `Hello` and `Game`, and wait for `Ready`.
    pub async fn start(addr: &str) -> Result<Self> {
        let mut conn = ServerConnection::connect(addr).await?;
        conn.handshake(&Message::Hello, Message::Greetings).await?;
        conn.handshake(&Message::Game, Message::Ready).await?;
        Ok(Self {
            conn,
            finished: false,
        })
    }

    pub async fn guess(&mut self, n: i64) -> Result<GuessOutcome> {
        if self.finished {
            return Err(anyhow!("game is already over"));
        }

        self.conn.send(&Message::Guess(n)).await?;
        let reply = self.conn.read_message().await?;
        let outcome = reply
            .as_outcome()
            .ok_or_else(|| anyhow!("server answered a guess with {:?}", reply))?;

        self.finished = outcome.is_final();
        Ok(outcome)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}
