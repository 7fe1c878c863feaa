//! Observer listing lines.
//!
//! Each active player is reported as `<ip> <port>\r\n`. IPv6 addresses
//! are written without brackets. The end of the listing is signalled by
//! the server closing the connection, not by a message.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::line_codec::ProtocolError;
use crate::wire_types::TERMINATOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingEntry {
    pub ip: IpAddr,
    pub port: u16,
}

impl ListingEntry {
    /// Encode the entry, terminator included, appending to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.to_string().as_bytes());
        out.extend_from_slice(TERMINATOR.as_bytes());
    }

    /// Parse a line (terminator already stripped).
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let unknown = || ProtocolError::UnknownMessage(line.to_string());

        let (ip, port) = line.split_once(' ').ok_or_else(unknown)?;
        let ip = ip.parse::<IpAddr>().map_err(|_| unknown())?;
        let port = port.parse::<u16>().map_err(|_| unknown())?;
        Ok(ListingEntry { ip, port })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

impl From<SocketAddr> for ListingEntry {
    fn from(addr: SocketAddr) -> Self {
        ListingEntry {
            ip: addr.ip(),
            port: addr.port(),
        }
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ip, self.port)
    }
}
