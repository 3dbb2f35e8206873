//! Background task draining the shared memory
//!
//! Sleeps on a counting signal. Each signal either drains one full
//! window through the scanner or, once a stop was requested, ends the
//! loop. A drain in progress always runs to completion.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;

use super::signal::Signal;
use crate::streaming::SequenceScanner;
use crate::telemetry;

/// Worker loop state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    /// Blocked on the signal
    Waiting,
    /// Draining one window
    Processing,
    /// Loop has exited
    Stopped,
}

pub struct BackgroundTask {
    scanner: Arc<SequenceScanner>,
    signal: Signal,
    is_stopped: AtomicBool,
    state: Mutex<WorkerState>,
    /// Completed drains
    cycles: AtomicU64,
    /// Emit a telemetry event per drain
    log_cycles: bool,
}

impl BackgroundTask {
    pub fn new(scanner: Arc<SequenceScanner>) -> Self {
        Self::with_cycle_logging(scanner, true)
    }

    pub fn with_cycle_logging(scanner: Arc<SequenceScanner>, log_cycles: bool) -> Self {
        Self {
            scanner,
            signal: Signal::new(),
            is_stopped: AtomicBool::new(false),
            state: Mutex::new(WorkerState::Waiting),
            cycles: AtomicU64::new(0),
            log_cycles,
        }
    }

    /// Run the loop on the calling thread until `stop` is observed
    pub fn run(&self) {
        info!("Background task waiting for data");

        loop {
            self.set_state(WorkerState::Waiting);
            self.signal.wait();

            if self.is_stopped.load(Ordering::Acquire) {
                break;
            }

            self.set_state(WorkerState::Processing);
            self.scanner.drain();
            let cycle = self.cycles.fetch_add(1, Ordering::AcqRel) + 1;

            debug!(
                "Drain cycle {} complete, {} sequences so far",
                cycle,
                self.scanner.count()
            );
            if self.log_cycles {
                telemetry::cycle_completed(cycle, self.scanner.count()).emit();
            }
        }

        self.set_state(WorkerState::Stopped);
        telemetry::worker_stopped(self.cycles(), self.scanner.count()).emit();
    }

    /// Data is available in the shared memory
    pub fn notify(&self) {
        self.signal.post();
    }

    /// Ask the loop to exit at its next wake-up
    pub fn stop(&self) {
        self.is_stopped.store(true, Ordering::Release);
        self.signal.post();
    }

    pub fn state(&self) -> WorkerState {
        *self.state.lock()
    }

    /// Number of drains finished so far
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Acquire)
    }

    pub fn scanner(&self) -> &Arc<SequenceScanner> {
        &self.scanner
    }

    fn set_state(&self, state: WorkerState) {
        *self.state.lock() = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::SharedMem;
    use std::thread;

    fn task() -> Arc<BackgroundTask> {
        let mem = Arc::new(SharedMem::new());
        let scanner = Arc::new(SequenceScanner::new(mem));
        Arc::new(BackgroundTask::new(scanner))
    }

    fn fill(task: &BackgroundTask, bytes: &[u8]) {
        let mem = task.scanner().shared_mem();
        for &b in bytes {
            mem.put(b);
        }
    }

    #[test]
    fn test_stop_before_any_data() {
        let task = task();
        task.stop();
        // Runs inline: the queued stop permit ends the loop immediately
        task.run();
        assert_eq!(task.state(), WorkerState::Stopped);
        assert_eq!(task.cycles(), 0);
    }

    #[test]
    fn test_pending_stop_wins_over_data() {
        let task = task();
        let mut batch = [0u8; 16];
        batch[14] = 0xA5;
        batch[15] = 0x5A;
        fill(&task, &batch);

        task.notify();
        task.stop();
        task.run();

        // The flag is checked on every wake-up, so no drain happens
        assert_eq!(task.cycles(), 0);
        assert_eq!(task.scanner().count(), 0);
        assert!(task.scanner().shared_mem().is_full());
    }

    #[test]
    fn test_notify_is_not_lost() {
        let task = task();
        fill(&task, &[0xA5; 16]);
        // Posted before the loop ever waits
        task.notify();

        let worker = {
            let task = Arc::clone(&task);
            thread::spawn(move || task.run())
        };
        while task.cycles() < 1 {
            thread::yield_now();
        }

        task.stop();
        worker.join().unwrap();
        assert_eq!(task.cycles(), 1);
        assert_eq!(task.scanner().state(), crate::streaming::MarkerState::SawA5);
    }

    #[test]
    fn test_threaded_loop() {
        let task = task();
        let worker = {
            let task = Arc::clone(&task);
            thread::spawn(move || task.run())
        };

        for cycle in 1..=3u64 {
            fill(&task, &[0xA5, 0x5A, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
            task.notify();
            while task.cycles() < cycle {
                thread::yield_now();
            }
        }

        task.stop();
        worker.join().unwrap();
        assert_eq!(task.scanner().count(), 3);
        assert_eq!(task.state(), WorkerState::Stopped);
    }
}
