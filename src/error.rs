//! Error types for the pipeline
//!
//! Precondition violations on the hot path (`put` on a full window,
//! `get` on an empty one, `drain` before a full batch) panic. The types
//! here cover the recoverable surfaces around them.

/// Shared memory access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Write attempted while every slot holds unread data
    Full { capacity: usize },
    /// Read attempted with no unread data
    Empty,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::Full { capacity } => {
                write!(f, "Shared memory full ({} bytes)", capacity)
            }
            BufferError::Empty => write!(f, "Shared memory empty"),
        }
    }
}

impl std::error::Error for BufferError {}

/// Application lifecycle errors
#[derive(Debug)]
pub enum AppError {
    /// `start` called while the worker thread is alive
    AlreadyRunning,
    /// `stop` called without a running worker thread
    NotRunning,
    /// `start` called after the worker was stopped; the stop flag is final
    Stopped,
    /// Shared memory still holds a batch the worker has not drained
    Busy,
    /// The OS refused to spawn the worker thread
    Spawn(std::io::Error),
    /// The worker thread panicked, usually a violated drain precondition
    WorkerPanicked(String),
    /// Interrupt batch does not match the shared memory size
    BatchSize { expected: usize, actual: usize },
    /// Shared memory rejected the batch
    Buffer(BufferError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::AlreadyRunning => write!(f, "Worker already running"),
            AppError::NotRunning => write!(f, "Worker not running"),
            AppError::Stopped => write!(f, "Worker already stopped"),
            AppError::Busy => write!(f, "Shared memory holds an undrained batch"),
            AppError::Spawn(e) => write!(f, "Failed to spawn worker: {}", e),
            AppError::WorkerPanicked(msg) => write!(f, "Worker panicked: {}", msg),
            AppError::BatchSize { expected, actual } => write!(
                f,
                "Interrupt batch must be {} bytes, got {}",
                expected, actual
            ),
            AppError::Buffer(e) => write!(f, "Buffer error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Spawn(e) => Some(e),
            AppError::Buffer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BufferError> for AppError {
    fn from(e: BufferError) -> Self {
        AppError::Buffer(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_error_display() {
        let err = BufferError::Full { capacity: 16 };
        assert_eq!(err.to_string(), "Shared memory full (16 bytes)");
        assert_eq!(BufferError::Empty.to_string(), "Shared memory empty");
    }

    #[test]
    fn test_app_error_from_buffer() {
        let err: AppError = BufferError::Empty.into();
        assert!(matches!(err, AppError::Buffer(BufferError::Empty)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_batch_size_display() {
        let err = AppError::BatchSize {
            expected: 16,
            actual: 3,
        };
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains("3"));
    }
}
