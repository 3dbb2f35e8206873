//! Worker module: the consumer side of the pipeline
//!
//! - Counting wake signal (no lost wake-ups)
//! - Background task loop driving the scanner
//! - Application wrapper owning the worker thread

pub mod signal;
pub mod background_task;
pub mod application;

pub use signal::Signal;
pub use background_task::{BackgroundTask, WorkerState};
pub use application::Application;
