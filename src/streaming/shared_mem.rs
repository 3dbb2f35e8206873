//! Shared Memory Window
//!
//! Fixed-size circular byte buffer standing in for the hardware region
//! an interrupt fills and the background worker drains.
//! - Pre-allocated once, never grows
//! - One lock around slots, cursors and fill count
//! - Never blocks: callers check `is_full`/`is_empty` first

use parking_lot::Mutex;

use crate::error::BufferError;

/// Size of the shared memory window in bytes
pub const SHARED_MEM_SIZE: usize = 16;

/// Slots and cursors, only touched with the lock held
struct Window {
    /// Pre-allocated fixed-size storage
    slots: Box<[u8]>,
    /// Next slot to read (wraps around)
    read_index: usize,
    /// Next slot to write (wraps around)
    write_index: usize,
    /// Unread bytes currently stored
    count: usize,
}

impl Window {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn put(&mut self, byte: u8) -> Result<(), BufferError> {
        if self.count == self.capacity() {
            return Err(BufferError::Full {
                capacity: self.capacity(),
            });
        }

        self.slots[self.write_index] = byte;
        self.write_index = (self.write_index + 1) % self.capacity();
        self.count += 1;
        Ok(())
    }

    fn get(&mut self) -> Result<u8, BufferError> {
        if self.count == 0 {
            return Err(BufferError::Empty);
        }

        let byte = self.slots[self.read_index];
        self.read_index = (self.read_index + 1) % self.capacity();
        self.count -= 1;
        Ok(byte)
    }
}

/// Thread-safe fixed-capacity FIFO of bytes
pub struct SharedMem {
    window: Mutex<Window>,
    /// Buffer capacity (fixed, no growth)
    capacity: usize,
}

impl SharedMem {
    /// Create a window of `SHARED_MEM_SIZE` bytes
    pub fn new() -> Self {
        Self::with_capacity(SHARED_MEM_SIZE)
    }

    /// Create with fixed capacity - NO dynamic growth
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "shared memory capacity must be non-zero");
        Self {
            window: Mutex::new(Window {
                slots: vec![0u8; capacity].into_boxed_slice(),
                read_index: 0,
                write_index: 0,
                count: 0,
            }),
            capacity,
        }
    }

    /// Write one byte.
    ///
    /// # Panics
    ///
    /// Panics if the window is full. The producer must confirm space
    /// before writing.
    pub fn put(&self, byte: u8) {
        if let Err(e) = self.try_put(byte) {
            panic!("put on shared memory: {}", e);
        }
    }

    /// Read the oldest unread byte.
    ///
    /// # Panics
    ///
    /// Panics if the window is empty.
    pub fn get(&self) -> u8 {
        match self.try_get() {
            Ok(byte) => byte,
            Err(e) => panic!("get on shared memory: {}", e),
        }
    }

    /// Write one byte, reporting a full window instead of panicking
    pub fn try_put(&self, byte: u8) -> Result<(), BufferError> {
        self.window.lock().put(byte)
    }

    /// Read one byte, reporting an empty window instead of panicking
    pub fn try_get(&self) -> Result<u8, BufferError> {
        self.window.lock().get()
    }

    pub fn is_empty(&self) -> bool {
        self.window.lock().count == 0
    }

    pub fn is_full(&self) -> bool {
        self.window.lock().count == self.capacity
    }

    /// Number of unread bytes
    pub fn len(&self) -> usize {
        self.window.lock().count
    }

    /// Get buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SharedMem {
    fn default() -> Self {
        Self::new()
    }
}
