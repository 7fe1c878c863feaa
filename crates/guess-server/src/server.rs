//! TCP listeners and top-level server wiring.
//!
//! This module:
//! - Binds the player and observer endpoints.
//! - Waits on both at once and accepts from whichever is ready.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns one session task per connection and goes straight back to
//!   accepting.
//!
//! The per-connection dialogue lives in the `session` module.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::registry::Registry;
use crate::session::Session;
use crate::types::{next_connection_id, Role};

/// Pause after a failed `accept` before trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(10);

pub struct Server {
    player_listener: TcpListener,
    observer_listener: TcpListener,
    registry: Registry,
    read_timeout: Option<Duration>,
}

impl Server {
    /// Bind both endpoints described by `config`.
    pub async fn bind(config: &Config) -> io::Result<Self> {
        let player_listener = TcpListener::bind(config.player_addr_string()).await?;
        let observer_listener = TcpListener::bind(config.observer_addr_string()).await?;

        info!(
            players = %player_listener.local_addr()?,
            observers = %observer_listener.local_addr()?,
            "listening"
        );

        Ok(Server {
            player_listener,
            observer_listener,
            registry: Registry::new(),
            read_timeout: config.read_timeout,
        })
    }

    pub fn player_addr(&self) -> io::Result<SocketAddr> {
        self.player_listener.local_addr()
    }

    pub fn observer_addr(&self) -> io::Result<SocketAddr> {
        self.observer_listener.local_addr()
    }

    /// Handle to the shared registry of active players.
    pub fn registry(&self) -> Registry {
        self.registry.clone()
    }

    /// Accept connections forever.
    pub async fn run(self) {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Accept connections until `shutdown` resolves, then close both
    /// listeners. Sessions already running are left to finish on their own.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            // Branch order is randomized, so a busy endpoint cannot
            // starve the other one.
            let (role, accepted) = tokio::select! {
                _ = &mut shutdown => break,
                res = self.player_listener.accept() => (Role::Player, res),
                res = self.observer_listener.accept() => (Role::Observer, res),
            };

            self.on_accept(role, accepted).await;
        }

        info!("shutting down, closing listeners");
        self.registry.clear();
    }

    /// Handle one `accept` result. A failure is confined to this attempt:
    /// it is logged, followed by a short pause, and the caller keeps
    /// accepting on both endpoints.
    async fn on_accept(&self, role: Role, accepted: io::Result<(TcpStream, SocketAddr)>) {
        match accepted {
            Ok((stream, peer)) => self.dispatch(role, stream, peer),
            Err(e) => {
                warn!(%role, error = %e, "accept failed");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }

    fn dispatch(&self, role: Role, stream: TcpStream, peer: SocketAddr) {
        let session = Session::new(
            role,
            next_connection_id(),
            stream,
            peer,
            self.registry.clone(),
            self.read_timeout,
        );
        let (id, role) = (session.id(), session.role());
        info!(%id, %role, %peer, "accepted connection");

        tokio::spawn(async move {
            if let Err(e) = session.run().await {
                if e.is_disconnect() {
                    debug!(%id, %role, "client disconnected");
                } else if e.is_violation() {
                    warn!(%id, %role, error = %e, "protocol violation, connection closed");
                } else {
                    info!(%id, %role, error = %e, "session ended early");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ConnectionId;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn failed_player_accept_does_not_stop_observers() {
        let server = Server::bind(&Config::ephemeral()).await.unwrap();
        let listed = SocketAddr::from(([127, 0, 0, 1], 41000));
        server.registry().insert(ConnectionId(500), listed);

        server
            .on_accept(
                Role::Player,
                Err(io::Error::from(io::ErrorKind::ConnectionAborted)),
            )
            .await;

        let mut observer = TcpStream::connect(server.observer_addr().unwrap()).await.unwrap();
        let accepted = server.observer_listener.accept().await;
        server.on_accept(Role::Observer, accepted).await;

        observer.write_all(b"Hello\r\nWho\r\n").await.unwrap();
        let mut reply = String::new();
        observer.read_to_string(&mut reply).await.unwrap();
        assert_eq!(reply, "Admin-Greetings\r\n127.0.0.1 41000\r\n");
    }

    #[tokio::test]
    async fn accept_loop_survives_injected_failure() {
        let server = Server::bind(&Config::ephemeral()).await.unwrap();
        let player_addr = server.player_addr().unwrap();
        let observer_addr = server.observer_addr().unwrap();

        server
            .on_accept(
                Role::Observer,
                Err(io::Error::from(io::ErrorKind::ConnectionAborted)),
            )
            .await;
        tokio::spawn(server.run());

        let mut player = TcpStream::connect(player_addr).await.unwrap();
        player.write_all(b"Hello\r\n").await.unwrap();
        let mut greeting = [0u8; 11];
        player.read_exact(&mut greeting).await.unwrap();
        assert_eq!(&greeting, b"Greetings\r\n");

        let mut observer = TcpStream::connect(observer_addr).await.unwrap();
        observer.write_all(b"Hello\r\nWho\r\n").await.unwrap();
        let mut reply = String::new();
        observer.read_to_string(&mut reply).await.unwrap();
        assert_eq!(reply, "Admin-Greetings\r\n");
    }
}
