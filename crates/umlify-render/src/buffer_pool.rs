//! Reusable byte buffers for the compact encoder
//!
//! Encoding allocates two scratch buffers per call (the tab-stripped document
//! and the compressed stream). The pool hands out cleared buffers and takes
//! them back on drop, so repeated encodes from many threads reuse capacity.

use std::ops::{Deref, DerefMut};
use std::sync::Mutex;

/// Default number of idle buffers kept around.
pub const DEFAULT_MAX_IDLE: usize = 8;

/// Thread-safe pool of byte buffers
pub struct BufferPool {
    idle: Mutex<Vec<Vec<u8>>>,
    max_idle: usize,
}

impl BufferPool {
    /// Create a pool retaining at most `max_idle` buffers between uses
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Take an empty buffer, reusing an idle one when available
    pub fn acquire(&self) -> PooledBuffer<'_> {
        let buf = self
            .idle
            .lock()
            .ok()
            .and_then(|mut idle| idle.pop())
            .unwrap_or_default();
        PooledBuffer { buf, pool: self }
    }

    /// Number of buffers currently waiting for reuse
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    fn release(&self, mut buf: Vec<u8>) {
        buf.clear();
        // A poisoned pool just stops recycling.
        if let Ok(mut idle) = self.idle.lock() {
            if idle.len() < self.max_idle {
                idle.push(buf);
            }
        }
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

/// Buffer on loan from a [`BufferPool`], returned when dropped
pub struct PooledBuffer<'a> {
    buf: Vec<u8>,
    pool: &'a BufferPool,
}

impl Deref for PooledBuffer<'_> {
    type Target = Vec<u8>;

    fn deref(&self) -> &Vec<u8> {
        &self.buf
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut Vec<u8> {
        &mut self.buf
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}
