//! Application wrapper around the background task
//!
//! Owns the worker thread and gives the interrupt side its
//! start/stop/signal surface.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{info, warn};

use super::background_task::BackgroundTask;
use crate::config::{default_worker_name, ConfigError, PipelineConfig};
use crate::error::AppError;
use crate::streaming::{SequenceScanner, SharedMem};
use crate::telemetry;

pub struct Application {
    task: Arc<BackgroundTask>,
    worker_name: String,
    handle: Option<JoinHandle<()>>,
    stopped: bool,
}

impl Application {
    pub fn new(task: Arc<BackgroundTask>) -> Self {
        Self::with_worker_name(task, &default_worker_name())
    }

    pub fn with_worker_name(task: Arc<BackgroundTask>, worker_name: &str) -> Self {
        Self {
            task,
            worker_name: worker_name.to_string(),
            handle: None,
            stopped: false,
        }
    }

    /// Wire shared memory, scanner and task from configuration
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let shmem = Arc::new(SharedMem::with_capacity(config.capacity));
        let scanner = Arc::new(SequenceScanner::new(shmem));
        let task = Arc::new(BackgroundTask::with_cycle_logging(
            scanner,
            config.log_cycles,
        ));
        Ok(Self::with_worker_name(task, &config.worker_name))
    }

    /// Run the background task on its own thread
    pub fn start(&mut self) -> Result<(), AppError> {
        if self.handle.is_some() {
            return Err(AppError::AlreadyRunning);
        }
        if self.stopped {
            return Err(AppError::Stopped);
        }

        let task = Arc::clone(&self.task);
        let handle = thread::Builder::new()
            .name(self.worker_name.clone())
            .spawn(move || task.run())
            .map_err(AppError::Spawn)?;

        self.handle = Some(handle);
        telemetry::worker_started(&self.worker_name).emit();
        Ok(())
    }

    /// Stop the background task and wait for the thread to finish
    pub fn stop(&mut self) -> Result<(), AppError> {
        let handle = self.handle.take().ok_or(AppError::NotRunning)?;

        self.task.stop();
        self.stopped = true;

        handle.join().map_err(|payload| {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            AppError::WorkerPanicked(msg)
        })?;

        info!("Worker '{}' stopped", self.worker_name);
        Ok(())
    }

    /// Signal the background task that data is available
    pub fn data_available(&self) {
        self.task.notify();
    }

    /// Simulated interrupt: write one full batch, then signal the worker
    pub fn raise_interrupt(&self, batch: &[u8]) -> Result<(), AppError> {
        let shmem = self.shared_mem();

        if batch.len() != shmem.capacity() {
            let err = AppError::BatchSize {
                expected: shmem.capacity(),
                actual: batch.len(),
            };
            telemetry::interrupt_rejected(&err.to_string()).emit();
            return Err(err);
        }
        if !shmem.is_empty() {
            telemetry::interrupt_rejected("previous batch not drained").emit();
            return Err(AppError::Busy);
        }

        for &byte in batch {
            shmem.try_put(byte)?;
        }
        self.data_available();
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn task(&self) -> &Arc<BackgroundTask> {
        &self.task
    }

    pub fn scanner(&self) -> &Arc<SequenceScanner> {
        self.task.scanner()
    }

    pub fn shared_mem(&self) -> &Arc<SharedMem> {
        self.task.scanner().shared_mem()
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        if self.handle.is_some() {
            if let Err(e) = self.stop() {
                warn!("Worker '{}' did not stop cleanly: {}", self.worker_name, e);
            }
        }
    }
}
