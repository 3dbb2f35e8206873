//! Telemetry Module for the marker pipeline
//!
//! Emits structured pipeline events as JSON through the `log` facade,
//! so whichever logger the host installs can collect them.

use log::{info, warn};
use serde::Serialize;

/// Pipeline event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineEventType {
    /// Worker thread spawned
    WorkerStarted,
    /// One shared memory window drained
    CycleCompleted,
    /// Worker loop exited
    WorkerStopped,
    /// Interrupt batch refused before reaching shared memory
    InterruptRejected,
}

/// Pipeline event for logging
#[derive(Debug, Clone, Serialize)]
pub struct PipelineEvent {
    /// Event type
    pub event_type: PipelineEventType,
    /// Worker thread name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<String>,
    /// Drain cycle number (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle: Option<u64>,
    /// Running sequence count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_count: Option<u64>,
    /// Reason for action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PipelineEvent {
    /// Create a new pipeline event
    pub fn new(event_type: PipelineEventType) -> Self {
        Self {
            event_type,
            worker: None,
            cycle: None,
            sequence_count: None,
            reason: None,
        }
    }

    /// Set worker name
    pub fn with_worker(mut self, name: &str) -> Self {
        self.worker = Some(name.to_string());
        self
    }

    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = Some(cycle);
        self
    }

    pub fn with_sequence_count(mut self, count: u64) -> Self {
        self.sequence_count = Some(count);
        self
    }

    /// Set reason
    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    /// Log the event
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => match self.event_type {
                PipelineEventType::InterruptRejected => {
                    warn!("[MARKER-PIPELINE] {}", json);
                }
                _ => {
                    info!("[MARKER-PIPELINE] {}", json);
                }
            },
            Err(e) => {
                warn!("Failed to serialize pipeline event: {}", e);
            }
        }
    }
}

pub fn worker_started(worker: &str) -> PipelineEvent {
    PipelineEvent::new(PipelineEventType::WorkerStarted).with_worker(worker)
}

pub fn cycle_completed(cycle: u64, sequence_count: u64) -> PipelineEvent {
    PipelineEvent::new(PipelineEventType::CycleCompleted)
        .with_cycle(cycle)
        .with_sequence_count(sequence_count)
}

pub fn worker_stopped(cycles: u64, sequence_count: u64) -> PipelineEvent {
    PipelineEvent::new(PipelineEventType::WorkerStopped)
        .with_cycle(cycles)
        .with_sequence_count(sequence_count)
}

/// Create an interrupt rejected event
pub fn interrupt_rejected(reason: &str) -> PipelineEvent {
    PipelineEvent::new(PipelineEventType::InterruptRejected).with_reason(reason)
}
