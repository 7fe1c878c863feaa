// crates/guess-client/src/admin.rs

use anyhow::Result;
use guess_protocol::{ListingEntry, Message};

use crate::network::ServerConnection;

/// Ask the observer endpoint for every player currently guessing.
///
/// The server closes the connection after the last entry.
pub async fn list_players(addr: &str) -> Result<Vec<ListingEntry>> {
    let mut conn = ServerConnection::connect(addr).await?;
    conn.handshake(&Message::Hello, Message::AdminGreetings).await?;
    conn.send(&Message::Who).await?;

    let mut players = Vec::new();
    while let Some(line) = conn.read_line().await? {
        players.push(ListingEntry::parse(&line)?);
    }
    Ok(players)
}
