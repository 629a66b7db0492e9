use alloc::boxed::Box;

/// A double-ended queue over a fixed, heap-allocated slab
///
/// Sized once for the window it serves, so pushes and pops never reallocate.
/// Pushing into a full deque drops the front entry.
#[derive(Debug, Clone)]
pub struct Deque<T> {
    /// Backing storage
    buf: Box<[T]>,
    /// Slot of the front entry
    head: usize,
    /// Number of live entries
    len: usize,
}

impl<T> Deque<T>
where
    T: Default + Copy,
{
    /// Creates an empty deque holding at most `capacity` entries
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of entries, must be positive
    ///
    /// # Returns
    ///
    /// * `Self` - The empty deque
    #[inline]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "deque capacity must be > 0");
        Self {
            buf: vec![T::default(); capacity].into_boxed_slice(),
            head: 0,
            len: 0,
        }
    }

    #[cfg(test)]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    #[inline]
    fn slot(&self, offset: usize) -> usize {
        (self.head + offset) % self.buf.len()
    }

    /// Appends an entry at the back
    ///
    /// # Arguments
    ///
    /// * `value` - The entry to append
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The front entry dropped to make room, if the deque was full
    #[inline]
    pub fn push_back(&mut self, value: T) -> Option<T> {
        let dropped = if self.is_full() {
            let front = self.buf[self.head];
            self.head = self.slot(1);
            self.len -= 1;
            Some(front)
        } else {
            None
        };

        let tail = self.slot(self.len);
        self.buf[tail] = value;
        self.len += 1;
        dropped
    }

    /// Removes and returns the back entry
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        Some(self.buf[self.slot(self.len)])
    }

    /// Removes and returns the front entry
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.buf[self.head];
        self.head = self.slot(1);
        self.len -= 1;
        Some(value)
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        (!self.is_empty()).then(|| &self.buf[self.head])
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        (!self.is_empty()).then(|| &self.buf[self.slot(self.len - 1)])
    }

    /// Iterates from front to back
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        (0..self.len).map(move |i| &self.buf[self.slot(i)])
    }

    /// Drops every entry
    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }
}
