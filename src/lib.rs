//! Command sequence counter for an interrupt-fed shared memory window
//!
//! An interrupt-like producer fills a fixed-size shared memory buffer
//! and signals a background worker. The worker drains the buffer and
//! counts occurrences of the command sequence `0xA5 0x5A`, including
//! sequences whose two bytes arrive in different interrupt cycles.
//!
//! ```no_run
//! use marker_pipeline::{Application, PipelineConfig};
//!
//! let mut app = Application::from_config(&PipelineConfig::default())?;
//! app.start()?;
//!
//! let mut batch = [0u8; 16];
//! batch[14] = 0xA5;
//! batch[15] = 0x5A;
//! app.raise_interrupt(&batch)?;
//!
//! app.stop()?;
//! println!("sequences: {}", app.scanner().count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod streaming;
pub mod telemetry;
pub mod worker;

pub use config::{ConfigError, PipelineConfig};
pub use error::{AppError, BufferError};
pub use streaming::{MarkerState, SequenceScanner, SharedMem, SHARED_MEM_SIZE};
pub use worker::{Application, BackgroundTask, Signal, WorkerState};
