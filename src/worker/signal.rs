//! Counting wake signal
//!
//! Posts are remembered: a `post` that happens while nobody is waiting
//! is consumed by the next `wait`.

use parking_lot::{Condvar, Mutex};

/// Counting semaphore starting at zero permits
#[derive(Default)]
pub struct Signal {
    permits: Mutex<usize>,
    condvar: Condvar,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one permit and wake a waiter
    pub fn post(&self) {
        let mut permits = self.permits.lock();
        *permits += 1;
        self.condvar.notify_one();
    }

    /// Block until a permit is available, then take it
    pub fn wait(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.condvar.wait(&mut permits);
        }
        *permits -= 1;
    }

    /// Take a permit if one is available without blocking
    #[cfg(test)]
    fn try_wait(&self) -> bool {
        let mut permits = self.permits.lock();
        if *permits == 0 {
            return false;
        }
        *permits -= 1;
        true
    }

    /// Permits posted but not yet consumed
    #[cfg(test)]
    fn pending(&self) -> usize {
        *self.permits.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_posts_are_counted() {
        let signal = Signal::new();
        signal.post();
        signal.post();
        assert_eq!(signal.pending(), 2);

        signal.wait();
        assert!(signal.try_wait());
        assert!(!signal.try_wait());
        assert_eq!(signal.pending(), 0);
    }

    #[test]
    fn test_wait_blocks_until_post() {
        let signal = Arc::new(Signal::new());
        let waiter = {
            let signal = Arc::clone(&signal);
            thread::spawn(move || {
                for _ in 0..3 {
                    signal.wait();
                }
            })
        };

        for _ in 0..3 {
            signal.post();
        }
        waiter.join().unwrap();
        assert_eq!(signal.pending(), 0);
    }
}
