//! Fixed-capacity recycling container for pooled entities.

/// Contract every pooled entity fulfills so its pool can recycle it.
pub(crate) trait Pooled {
    /// Reports whether the slot currently participates in the simulation.
    fn is_active(&self) -> bool;

    /// Returns the slot to the inactive state, resetting reuse-sensitive
    /// fields. Must be idempotent.
    fn deactivate(&mut self);
}

/// Fixed-capacity pool over a single entity kind.
///
/// Slots are pre-allocated at construction and never grow, bounding the
/// worst-case entity count per kind. The pool is the sole authority for
/// allocation and recycling; iteration always runs in ascending slot order,
/// which doubles as the deterministic tie-break order for targeting.
#[derive(Debug)]
pub(crate) struct ObjectPool<T> {
    slots: Vec<T>,
}

impl<T: Pooled> ObjectPool<T> {
    /// Pre-allocates `capacity` slots using the provided initializer, which
    /// receives the slot index so entities can record their identifier.
    pub(crate) fn with_capacity(capacity: usize, mut init: impl FnMut(u32) -> T) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        for index in 0..capacity {
            slots.push(init(index as u32));
        }
        Self { slots }
    }

    /// Hands out the lowest-index inactive slot, or `None` on exhaustion.
    ///
    /// Exhaustion is an expected, recoverable outcome; the caller decides
    /// whether the requested spawn or shot is dropped. The returned slot is
    /// not yet active: the caller must explicitly activate it.
    pub(crate) fn acquire(&mut self) -> Option<&mut T> {
        self.slots.iter_mut().find(|slot| !slot.is_active())
    }

    /// Returns the slot at `index` to the inactive state.
    ///
    /// Releasing an already-inactive slot is a no-op, not an error.
    pub(crate) fn release(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.deactivate();
        }
    }

    /// Borrows the slot at `index`, active or not.
    #[must_use]
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index)
    }

    /// Mutably borrows the slot at `index`, active or not.
    #[must_use]
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index)
    }

    /// Iterates every active slot in ascending slot order.
    pub(crate) fn iter_active(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    /// Mutably iterates every slot in ascending slot order.
    ///
    /// Callers filter on activity themselves so they can react to slots
    /// deactivating mid-iteration (path completion, lifespan expiry).
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::{ObjectPool, Pooled};

    #[derive(Debug)]
    struct Probe {
        index: u32,
        active: bool,
    }

    impl Pooled for Probe {
        fn is_active(&self) -> bool {
            self.active
        }

        fn deactivate(&mut self) {
            self.active = false;
        }
    }

    fn probe_pool(capacity: usize) -> ObjectPool<Probe> {
        ObjectPool::with_capacity(capacity, |index| Probe {
            index,
            active: false,
        })
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut pool = probe_pool(3);

        for _ in 0..3 {
            let slot = pool.acquire().expect("slot available");
            slot.active = true;
        }

        assert!(pool.acquire().is_none(), "fourth acquire must fail");
        assert_eq!(pool.slots.len(), 3, "exhaustion must not grow the pool");
    }

    #[test]
    fn releasing_a_slot_makes_it_acquirable_again() {
        let mut pool = probe_pool(2);
        for _ in 0..2 {
            pool.acquire().expect("slot available").active = true;
        }

        pool.release(1);
        let reacquired = pool.acquire().expect("released slot available");
        assert_eq!(reacquired.index, 1);
        reacquired.active = true;
        assert!(pool.acquire().is_none());
    }

    #[test]
    fn release_is_idempotent() {
        let mut pool = probe_pool(1);
        pool.acquire().expect("slot available").active = true;

        pool.release(0);
        pool.release(0);
        pool.release(7);

        assert!(pool.acquire().is_some());
    }

    #[test]
    fn acquire_prefers_the_lowest_index_slot() {
        let mut pool = probe_pool(3);
        for _ in 0..3 {
            pool.acquire().expect("slot available").active = true;
        }
        pool.release(2);
        pool.release(0);

        assert_eq!(pool.acquire().expect("slot available").index, 0);
    }

    #[test]
    fn active_iteration_runs_in_slot_order() {
        let mut pool = probe_pool(4);
        for _ in 0..4 {
            pool.acquire().expect("slot available").active = true;
        }
        pool.release(2);

        let indices: Vec<u32> = pool.iter_active().map(|slot| slot.index).collect();
        assert_eq!(indices, vec![0, 1, 3]);
    }
}
