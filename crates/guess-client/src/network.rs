// crates/guess-client/src/network.rs

use anyhow::{bail, Result};
use bytes::BytesMut;
use guess_protocol::{decode_eof, encode, take_line, decode_line, Message, ProtocolError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info};

pub struct ServerConnection {
    stream: TcpStream,
    read_buffer: BytesMut,
}

impl ServerConnection {
    pub async fn connect(addr: &str) -> Result<Self> {
        info!("Connecting to {}...", addr);
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        Ok(Self {
            stream,
            read_buffer: BytesMut::with_capacity(1024),
        })
    }

    pub async fn send(&mut self, msg: &Message) -> Result<()> {
        let mut out = Vec::with_capacity(32);
        encode(msg, &mut out);
        self.stream.write_all(&out).await?;
        self.stream.flush().await?;
        debug!("Sent message: {:?}", msg);
        Ok(())
    }

    /// Next raw line, or `None` if the server closed between lines.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            if let Some(line) = take_line(&mut self.read_buffer)? {
                return Ok(Some(line));
            }

            let n = self.stream.read_buf(&mut self.read_buffer).await?;
            if n == 0 {
                return match decode_eof(&self.read_buffer) {
                    ProtocolError::ConnectionClosed => Ok(None),
                    e => Err(e.into()),
                };
            }
        }
    }

    /// Next protocol message; a closed connection is an error here.
    pub async fn read_message(&mut self) -> Result<Message> {
        match self.read_line().await? {
            Some(line) => {
                let msg = decode_line(&line)?;
                debug!("Received from server: {:?}", msg);
                Ok(msg)
            }
            None => bail!("server closed the connection"),
        }
    }

    /// Send `msg` and require `expected` back.
    pub async fn handshake(&mut self, msg: &Message, expected: Message) -> Result<()> {
        self.send(msg).await?;
        let reply = self.read_message().await?;
        if reply != expected {
            bail!("expected {:?}, server sent {:?}", expected, reply);
        }
        Ok(())
    }
}
