use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::errors::{BarError, Result};

static GLOBAL_LOCK: OnceLock<ActivityLock> = OnceLock::new();

/// Guards the "one active bar at a time" rule.
///
/// This is not a mutex: a second acquire fails immediately with
/// [`BarError::AlreadyActive`] instead of waiting. Bars use
/// [`ActivityLock::global`] unless started with an explicit lock, which
/// lets tests run independent displays side by side.
#[derive(Debug, Clone, Default)]
pub struct ActivityLock {
    active: Arc<AtomicBool>,
}

impl ActivityLock {
    /// Create a lock independent from the process-wide one
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide lock shared by every bar started without an explicit lock
    pub fn global() -> ActivityLock {
        GLOBAL_LOCK.get_or_init(ActivityLock::new).clone()
    }

    /// Mark the lock as held, failing if it already is
    pub fn try_acquire(&self) -> Result<ActivityToken> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| BarError::AlreadyActive)?;
        debug!("activity lock acquired");
        Ok(ActivityToken {
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

/// Proof that an [`ActivityLock`] is held. Releases the lock on drop.
#[derive(Debug)]
pub struct ActivityToken {
    active: Arc<AtomicBool>,
}

impl Drop for ActivityToken {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        debug!("activity lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_fails() {
        let lock = ActivityLock::new();
        let token = lock.try_acquire().unwrap();
        assert!(lock.is_active());
        assert!(matches!(lock.try_acquire(), Err(BarError::AlreadyActive)));

        drop(token);
        assert!(!lock.is_active());
        assert!(lock.try_acquire().is_ok());
    }

    #[test]
    fn test_independent_locks() {
        let first = ActivityLock::new();
        let second = ActivityLock::new();
        let _a = first.try_acquire().unwrap();
        let _b = second.try_acquire().unwrap();
        assert!(first.is_active());
        assert!(second.is_active());
    }

    #[test]
    fn test_clones_share_state() {
        let lock = ActivityLock::new();
        let clone = lock.clone();
        let _token = lock.try_acquire().unwrap();
        assert!(clone.is_active());
    }
}
