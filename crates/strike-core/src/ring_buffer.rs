use crate::error::{Result, StrikeError};

/// Fixed-capacity circular container.
///
/// Two construction modes exist: [`RingBuffer::new`] starts empty and fills
/// as values are pushed, while [`RingBuffer::saturated`] starts full of
/// caller-supplied values so the slots can be reused in place via
/// [`RingBuffer::push_for_mutation`] without further allocation.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
    capacity: usize,
    /// Slot written by the next push. Equals `slots.len()` until full.
    head: usize,
    pushed: u64,
    presaturated: bool,
}

impl<T> RingBuffer<T> {
    /// Create an empty buffer holding at most `capacity` values.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            pushed: 0,
            presaturated: false,
        }
    }

    /// Create a buffer that is already full, one slot per seed value.
    /// The capacity equals `seed.len()`.
    ///
    /// # Panics
    /// Panics if `seed` is empty.
    pub fn saturated(seed: Vec<T>) -> Self {
        assert!(
            !seed.is_empty(),
            "pre-saturated ring buffer needs at least one seed value"
        );
        let capacity = seed.len();
        Self {
            slots: seed,
            capacity,
            head: 0,
            pushed: 0,
            presaturated: true,
        }
    }

    /// Create a full buffer of `capacity` deep copies of `value`.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn saturated_with(capacity: usize, value: &T) -> Self
    where
        T: Clone,
    {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self::saturated(vec![value.clone(); capacity])
    }

    /// Overwrite the oldest slot with `value`.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            self.slots.push(value);
        } else {
            self.slots[self.head] = value;
        }
        self.advance();
    }

    /// Advance the buffer and hand out the slot that now holds the newest
    /// element, still carrying the value it held as the oldest one.
    ///
    /// While an empty-mode buffer is still filling, a default value is
    /// appended instead.
    pub fn push_for_mutation(&mut self) -> &mut T
    where
        T: Default,
    {
        if self.slots.len() < self.capacity {
            self.slots.push(T::default());
        }
        let index = self.head;
        self.advance();
        &mut self.slots[index]
    }

    fn advance(&mut self) {
        self.head = (self.head + 1) % self.capacity;
        if self.slots.len() < self.capacity {
            self.head = self.slots.len();
        }
        self.pushed += 1;
    }

    /// The value `offset` places behind the most recently pushed one.
    pub fn get_from_newest(&self, offset: usize) -> Result<&T> {
        let live = self.live_count();
        if offset >= live {
            return Err(StrikeError::OffsetOutOfRange { offset, live });
        }
        self.get_from_oldest(live - 1 - offset)
    }

    /// The value `offset` places after the least recently pushed one.
    pub fn get_from_oldest(&self, offset: usize) -> Result<&T> {
        let live = self.live_count();
        if offset >= live {
            return Err(StrikeError::OffsetOutOfRange { offset, live });
        }
        let start = self.head % live;
        Ok(&self.slots[(start + offset) % live])
    }

    /// Number of values currently held, never more than the capacity.
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of pushes since construction.
    pub fn total_push_count(&self) -> u64 {
        self.pushed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_saturated(&self) -> bool {
        self.presaturated || self.pushed >= self.capacity as u64
    }

    /// Backing storage in raw slot order, not rotated to oldest-first.
    pub fn snapshot_window(&self) -> &[T] {
        &self.slots
    }

    /// Live values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let live = self.live_count();
        let start = if live == 0 { 0 } else { self.head % live };
        (0..live).map(move |i| &self.slots[(start + i) % live])
    }
}
