//! Registry of players currently in the guessing phase.
//!
//! Player sessions insert themselves when their game starts and remove
//! themselves when it ends; observer sessions take snapshots. Every
//! access goes through one mutex. The lock is never held across an
//! `.await`: observers copy the entries out and write them afterwards.

use std::net::SocketAddr;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::types::ConnectionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub id: ConnectionId,
    pub addr: SocketAddr,
}

/// Shared, insertion-ordered set of active player connections.
///
/// Cloning is cheap and yields a handle to the same registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Arc<Mutex<Vec<RegistryEntry>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Returns `false` (and changes nothing) if `id` is
    /// already present.
    pub fn insert(&self, id: ConnectionId, addr: SocketAddr) -> bool {
        let mut entries = self.entries.lock();
        if entries.iter().any(|e| e.id == id) {
            return false;
        }
        entries.push(RegistryEntry { id, addr });
        true
    }

    /// Remove the entry for `id`. Removing an absent entry is a no-op
    /// and returns `false`.
    pub fn remove(&self, id: ConnectionId) -> bool {
        let mut entries = self.entries.lock();
        match entries.iter().position(|e| e.id == id) {
            Some(pos) => {
                entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Insert `id` and return a guard that removes it again when dropped.
    pub fn register(&self, id: ConnectionId, addr: SocketAddr) -> Registration {
        if !self.insert(id, addr) {
            debug!(%id, "connection already registered");
        }
        Registration {
            registry: self.clone(),
            id,
        }
    }

    /// Copy of the current entries, in insertion order.
    pub fn snapshot(&self) -> Vec<RegistryEntry> {
        self.entries.lock().clone()
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.entries.lock().iter().any(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Drop every entry. Used when the server shuts down.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// Scoped membership in a `Registry`.
///
/// The entry is removed when the guard is dropped, whichever way the
/// owning session ends (normal return, error, or task cancellation).
#[derive(Debug)]
pub struct Registration {
    registry: Registry,
    id: ConnectionId,
}

impl Registration {
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        if self.registry.remove(self.id) {
            debug!(id = %self.id, "removed from registry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn insert_keeps_order_and_rejects_duplicates() {
        let registry = Registry::new();
        assert!(registry.insert(ConnectionId(1), addr(1001)));
        assert!(registry.insert(ConnectionId(2), addr(1002)));
        assert!(!registry.insert(ConnectionId(1), addr(1001)));

        let ids: Vec<_> = registry.snapshot().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![ConnectionId(1), ConnectionId(2)]);
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = Registry::new();
        registry.insert(ConnectionId(7), addr(7));
        assert!(registry.remove(ConnectionId(7)));
        assert!(!registry.remove(ConnectionId(7)));
        assert!(!registry.remove(ConnectionId(8)));
        assert!(registry.is_empty());
    }

    #[test]
    fn registration_cleans_up_on_drop() {
        let registry = Registry::new();
        {
            let guard = registry.register(ConnectionId(3), addr(3));
            assert_eq!(guard.id(), ConnectionId(3));
            assert!(registry.contains(ConnectionId(3)));
        }
        assert!(!registry.contains(ConnectionId(3)));
    }

    #[test]
    fn guard_after_explicit_remove_is_harmless() {
        let registry = Registry::new();
        let guard = registry.register(ConnectionId(4), addr(4));
        registry.insert(ConnectionId(5), addr(5));
        registry.remove(ConnectionId(4));
        drop(guard);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(ConnectionId(5)));
    }

    #[test]
    fn snapshot_is_detached() {
        let registry = Registry::new();
        registry.insert(ConnectionId(1), addr(1));
        let snapshot = registry.snapshot();
        registry.insert(ConnectionId(2), addr(2));
        registry.remove(ConnectionId(1));
        assert_eq!(snapshot, vec![RegistryEntry { id: ConnectionId(1), addr: addr(1) }]);
    }

    #[test]
    fn concurrent_register_and_snapshot() {
        let registry = Registry::new();
        let writers: Vec<_> = (0..8u64)
            .map(|t| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for i in 0..200u64 {
                        let id = ConnectionId(t * 1_000 + i);
                        let _guard = registry.register(id, addr(i as u16));
                        assert!(registry.contains(id));
                    }
                })
            })
            .collect();
        let reader = {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    assert!(registry.snapshot().len() <= 8);
                }
            })
        };

        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();
        assert!(registry.is_empty());
    }
}
