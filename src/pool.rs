/// Default number of slots, enough for the two candidate arrays per level of
/// a reasonably deep recursion.
pub const DEFAULT_SLOTS: usize = 16;

/// A small pool of scratch buffers, saving an allocation for every
/// temporary array the layout pass needs.
///
/// Buffers handed out by [`ScratchPool::allocate`] are at least as long as
/// requested but their contents are whatever the previous user left behind.
#[derive(Debug)]
pub struct ScratchPool<T = f64> {
    slots: Vec<Option<Vec<T>>>,
    /// Number of occupied slots
    count: usize,
}

impl<T: Copy + Default> ScratchPool<T> {
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_SLOTS)
    }

    /// Create a pool holding at most `slots` buffers.
    pub fn with_slots(slots: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(slots).collect(),
            count: 0,
        }
    }

    /// Number of slots (pooled or empty).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of buffers currently held.
    pub fn pooled(&self) -> usize {
        self.count
    }

    /// Take a buffer with room for at least `min_size` values.
    ///
    /// Reuses the first pooled buffer that is long enough, otherwise
    /// allocates one of exactly `min_size`. A zero-sized request never
    /// touches the pool.
    pub fn allocate(&mut self, min_size: usize) -> Vec<T> {
        if min_size > 0 {
            for slot in self.slots.iter_mut() {
                if slot.as_ref().is_some_and(|buf| buf.len() >= min_size) {
                    self.count -= 1;
                    if let Some(buf) = slot.take() {
                        return buf;
                    }
                }
            }
        }

        vec![T::default(); min_size]
    }

    /// Return a buffer to the pool.
    ///
    /// When the pool is full the buffer replaces the first strictly smaller
    /// pooled buffer, or is dropped if there is none. Never fails.
    pub fn free(&mut self, buf: Vec<T>) {
        if self.count == self.slots.len() {
            let len = buf.len();
            match self
                .slots
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|pooled| pooled.len() < len))
            {
                Some(slot) => {
                    if let Some(evicted) = slot.replace(buf) {
                        tracing::trace!("scratch pool full, evicted buffer of {} for {}", evicted.len(), len);
                    }
                }
                None => tracing::trace!("scratch pool full, dropping buffer of {}", len),
            }
            return;
        }

        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some(buf);
            self.count += 1;
        }
    }
}

impl<T: Copy + Default> Default for ScratchPool<T> {
    fn default() -> Self {
        Self::new()
    }
}
