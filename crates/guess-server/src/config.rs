//! Configuration for the game server.
//!
//! Defaults can be overridden via environment variables:
//!
//! - `GUESS_BIND_ADDR`         (default: "127.0.0.1")
//! - `GUESS_PLAYER_PORT`       (default: "4000")
//! - `GUESS_OBSERVER_PORT`     (default: "4001")
//! - `GUESS_READ_TIMEOUT_SECS` (default: "0", meaning no timeout)

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
pub const DEFAULT_PLAYER_PORT: u16 = 4000;
pub const DEFAULT_OBSERVER_PORT: u16 = 4001;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key}={value:?} is invalid: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("player and observer endpoints both use port {0}")]
    PortClash(u16),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface both endpoints bind to.
    pub bind_addr: String,

    /// TCP port for players.
    pub player_port: u16,

    /// TCP port for observers.
    pub observer_port: u16,

    /// Per-read limit for session dialogue. `None` waits forever.
    pub read_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            player_port: DEFAULT_PLAYER_PORT,
            observer_port: DEFAULT_OBSERVER_PORT,
            read_timeout: None,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env`, reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("GUESS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let player_port = read_or_default(&lookup, "GUESS_PLAYER_PORT", DEFAULT_PLAYER_PORT)?;
        let observer_port = read_or_default(&lookup, "GUESS_OBSERVER_PORT", DEFAULT_OBSERVER_PORT)?;
        let timeout_secs = read_or_default(&lookup, "GUESS_READ_TIMEOUT_SECS", 0u64)?;

        // Port 0 lets the OS pick, so two zeros never clash.
        if player_port == observer_port && player_port != 0 {
            return Err(ConfigError::PortClash(player_port));
        }

        Ok(Config {
            bind_addr,
            player_port,
            observer_port,
            read_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
        })
    }

    /// Config bound to loopback on OS-assigned ports.
    pub fn ephemeral() -> Self {
        Config {
            player_port: 0,
            observer_port: 0,
            ..Config::default()
        }
    }

    pub fn player_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.player_port)
    }

    pub fn observer_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.observer_port)
    }
}

fn read_or_default<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.player_addr_string(), "127.0.0.1:4000");
        assert_eq!(config.observer_addr_string(), "127.0.0.1:4001");
        assert_eq!(config.read_timeout, None);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("GUESS_BIND_ADDR", "0.0.0.0"),
            ("GUESS_PLAYER_PORT", "5000"),
            ("GUESS_OBSERVER_PORT", "5001"),
            ("GUESS_READ_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.player_addr_string(), "0.0.0.0:5000");
        assert_eq!(config.observer_port, 5001);
        assert_eq!(config.read_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_port_is_reported() {
        let err = Config::from_lookup(lookup_from(&[("GUESS_PLAYER_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "GUESS_PLAYER_PORT", .. }));
    }

    #[test]
    fn same_port_twice_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("GUESS_PLAYER_PORT", "4500"),
            ("GUESS_OBSERVER_PORT", "4500"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::PortClash(4500)));

        let config = Config::from_lookup(lookup_from(&[
            ("GUESS_PLAYER_PORT", "0"),
            ("GUESS_OBSERVER_PORT", "0"),
        ]))
        .unwrap();
        assert_eq!(config.player_port, 0);
    }
}
