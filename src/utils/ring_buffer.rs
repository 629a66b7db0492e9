use alloc::boxed::Box;

/// The last `capacity` samples of a stream, oldest first
///
/// Streaming operators use it to know which sample leaves the window when a
/// new one arrives.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Backing storage
    data: Box<[T]>,
    /// Slot the next sample is written to, which is the oldest once full
    cursor: usize,
    /// Number of samples held
    len: usize,
}

impl<T: Default + Copy> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be > 0");
        Self {
            data: vec![T::default(); capacity].into_boxed_slice(),
            cursor: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.data.len()
    }

    /// Appends a sample, returning the one that fell out of the window
    pub fn push(&mut self, value: T) -> Option<T> {
        let evicted = core::mem::replace(&mut self.data[self.cursor], value);
        self.cursor = (self.cursor + 1) % self.data.len();
        if self.is_full() {
            Some(evicted)
        } else {
            self.len += 1;
            None
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.len = 0;
    }

    /// Iterates from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let cap = self.data.len();
        let start = (self.cursor + cap - self.len) % cap;
        (0..self.len).map(move |i| &self.data[(start + i) % cap])
    }
}
