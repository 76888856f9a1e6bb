//! In-flight correlation id tracking
//!
//! Each call registers its id for the duration of its round trip. Because
//! HTTP pairs a response with its request by connection, a repeated id does
//! not misroute anything, but it means the daemon's echo no longer proves
//! which call it answers. Repeats can only happen with the timestamp or
//! random id strategies; the registry makes them visible instead of
//! preventing them.
//!
//! # Lifecycle
//!
//! 1. **Register**: `register(id)` returns a guard and notes whether the id
//!    was already in flight
//! 2. **Round trip**: the guard is held while the request is outstanding
//! 3. **Release**: dropping the guard removes the id

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of ids currently on the wire for one client handle
#[derive(Clone, Default)]
pub struct InFlightRegistry {
    /// Map of id to number of outstanding calls using it
    pending: Arc<Mutex<HashMap<String, usize>>>,
    /// Total number of registrations that found their id already in flight
    collisions: Arc<AtomicU64>,
}

impl InFlightRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id for the duration of the returned guard
    pub fn register(&self, id: &str) -> InFlightGuard {
        let collided = {
            let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
            let count = pending.entry(id.to_string()).or_insert(0);
            *count += 1;
            *count > 1
        };

        if collided {
            self.collisions.fetch_add(1, Ordering::Relaxed);
        }

        InFlightGuard {
            registry: self.clone(),
            id: id.to_string(),
            collided,
        }
    }

    /// Number of distinct ids currently in flight
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of collisions observed since the registry was created
    pub fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    fn release(&self, id: &str) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = pending.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                pending.remove(id);
            }
        }
    }
}

/// Keeps an id registered until dropped
pub struct InFlightGuard {
    registry: InFlightRegistry,
    id: String,
    collided: bool,
}

impl InFlightGuard {
    /// Whether another call was already using this id when it was registered
    pub fn collided(&self) -> bool {
        self.collided
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.release(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_release() {
        let registry = InFlightRegistry::new();

        let guard = registry.register("1");
        assert!(!guard.collided());
        assert_eq!(registry.pending_count(), 1);

        drop(guard);
        assert_eq!(registry.pending_count(), 0);
        assert_eq!(registry.collisions(), 0);
    }

    #[test]
    fn test_distinct_ids_do_not_collide() {
        let registry = InFlightRegistry::new();
        let a = registry.register("1");
        let b = registry.register("2");

        assert!(!a.collided());
        assert!(!b.collided());
        assert_eq!(registry.pending_count(), 2);
    }

    #[test]
    fn test_duplicate_id_is_detected() {
        let registry = InFlightRegistry::new();

        let first = registry.register("1700000000");
        let second = registry.register("1700000000");

        assert!(!first.collided());
        assert!(second.collided());
        assert_eq!(registry.collisions(), 1);
        assert_eq!(registry.pending_count(), 1);

        drop(first);
        assert_eq!(registry.pending_count(), 1);
        drop(second);
        assert_eq!(registry.pending_count(), 0);
    }

    #[test]
    fn test_sequential_reuse_is_not_a_collision() {
        let registry = InFlightRegistry::new();

        drop(registry.register("1700000000"));
        let again = registry.register("1700000000");

        assert!(!again.collided());
        assert_eq!(registry.collisions(), 0);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = InFlightRegistry::new();
        let clone = registry.clone();

        let _a = registry.register("x");
        let b = clone.register("x");

        assert!(b.collided());
        assert_eq!(registry.collisions(), 1);
    }
}
