//! Streaming module for the interrupt-fed data path
//!
//! This module provides the primitives the worker drains:
//! - Fixed-size shared memory window (circular buffer)
//! - Command sequence FSM whose state spans interrupt cycles

pub mod shared_mem;
pub mod sequence_fsm;

pub use shared_mem::{SharedMem, SHARED_MEM_SIZE};
pub use sequence_fsm::{MarkerState, SequenceScanner, SEQ_END, SEQ_START};
