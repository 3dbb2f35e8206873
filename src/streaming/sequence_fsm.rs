//! Finite State Machine for Command Sequences
//!
//! Counts the two-byte command sequence `0xA5 0x5A` in the shared
//! memory window. State survives between drains, so a sequence whose
//! bytes land in two different interrupt cycles is still counted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::shared_mem::SharedMem;

/// First byte of the command sequence
pub const SEQ_START: u8 = 0xA5;
/// Second byte of the command sequence
pub const SEQ_END: u8 = 0x5A;

/// Scanner state between bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerState {
    /// No marker byte pending
    #[default]
    Seeking,
    /// Last byte was `0x5A`
    Saw5A,
    /// Last byte was `0xA5`
    SawA5,
}

impl MarkerState {
    /// Advance FSM by one byte - O(1)
    ///
    /// Returns `true` when `byte` completes a command sequence.
    pub fn advance(&mut self, byte: u8) -> bool {
        let (next, completed) = match (*self, byte) {
            (MarkerState::SawA5, SEQ_END) => (MarkerState::Saw5A, true),
            (_, SEQ_END) => (MarkerState::Saw5A, false),
            (_, SEQ_START) => (MarkerState::SawA5, false),
            _ => (MarkerState::Seeking, false),
        };
        *self = next;
        completed
    }
}

/// Drains the shared memory and keeps a running sequence count
pub struct SequenceScanner {
    /// Window this scanner drains
    shmem: Arc<SharedMem>,
    /// Carried across drains; only the worker locks it
    state: Mutex<MarkerState>,
    /// Sequences found so far, never reset
    counter: AtomicU64,
    /// Total bytes scanned
    bytes_scanned: AtomicU64,
}

impl SequenceScanner {
    /// Create a scanner bound to one shared memory window
    pub fn new(shmem: Arc<SharedMem>) -> Self {
        Self {
            shmem,
            state: Mutex::new(MarkerState::default()),
            counter: AtomicU64::new(0),
            bytes_scanned: AtomicU64::new(0),
        }
    }

    /// Consume one full window of bytes.
    ///
    /// # Panics
    ///
    /// Panics if the window is not full. The interrupt side only
    /// signals after writing a complete batch.
    pub fn drain(&self) {
        assert!(
            self.shmem.is_full(),
            "drain requires a full shared memory window"
        );

        let mut state = self.state.lock();
        for _ in 0..self.shmem.capacity() {
            if state.advance(self.shmem.get()) {
                self.counter.fetch_add(1, Ordering::Release);
            }
        }

        self.bytes_scanned
            .fetch_add(self.shmem.capacity() as u64, Ordering::Relaxed);
    }

    /// Number of command sequences found so far
    pub fn count(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    /// State carried into the next drain
    pub fn state(&self) -> MarkerState {
        *self.state.lock()
    }

    /// Get total bytes scanned
    pub fn bytes_scanned(&self) -> u64 {
        self.bytes_scanned.load(Ordering::Relaxed)
    }

    /// Window this scanner drains
    pub fn shared_mem(&self) -> &Arc<SharedMem> {
        &self.shmem
    }
}
