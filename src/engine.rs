//! Reference-counted and idempotent engine slots.
//!
//! These hold the native factories behind `win::engine`, but are generic so
//! the counting rules can be checked without the native engines:
//!
//! - [`SharedEngine`] constructs on the 0→1 transition of its count and hands
//!   the engine back for destruction on the 1→0 transition.
//! - [`LazyEngine`] constructs on first initialize; repeated initialize is a
//!   no-op and uninitialize always releases.
//!
//! Neither type synchronizes; callers keep them on one thread.

use crate::error::G2dResult;

#[derive(Debug)]
pub struct SharedEngine<E> {
    count: u64,
    engine: Option<E>,
}

impl<E> Default for SharedEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SharedEngine<E> {
    pub const fn new() -> Self {
        Self {
            count: 0,
            engine: None,
        }
    }

    /// Take a reference, constructing the engine with `make` if this is the
    /// first one. A failed construction leaves the count unchanged.
    pub fn acquire<F>(&mut self, make: F) -> G2dResult<&E>
    where
        F: FnOnce() -> G2dResult<E>,
    {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => make()?,
        };
        self.count += 1;
        Ok(self.engine.insert(engine))
    }

    /// Drop a reference. Returns the engine on the 1→0 transition so the
    /// caller controls when it is destroyed. Releasing at zero does nothing.
    pub fn release(&mut self) -> Option<E> {
        match self.count {
            0 => None,
            1 => {
                self.count = 0;
                self.engine.take()
            }
            _ => {
                self.count -= 1;
                None
            }
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn get(&self) -> Option<&E> {
        self.engine.as_ref()
    }
}

#[derive(Debug)]
pub struct LazyEngine<E> {
    engine: Option<E>,
}

impl<E> Default for LazyEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> LazyEngine<E> {
    pub const fn new() -> Self {
        Self { engine: None }
    }

    /// Construct the engine unless one is already present.
    pub fn initialize<F>(&mut self, make: F) -> G2dResult<&E>
    where
        F: FnOnce() -> G2dResult<E>,
    {
        let engine = match self.engine.take() {
            Some(engine) => engine,
            None => make()?,
        };
        Ok(self.engine.insert(engine))
    }

    /// Release the engine, if any, regardless of how often it was initialized.
    pub fn uninitialize(&mut self) -> Option<E> {
        self.engine.take()
    }

    pub fn get(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::G2dError;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Engine stand-in that counts constructions and destructions.
    struct Probe {
        dropped: Rc<Cell<u32>>,
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    struct Tracker {
        built: Rc<Cell<u32>>,
        dropped: Rc<Cell<u32>>,
    }

    impl Tracker {
        fn new() -> Self {
            Self {
                built: Rc::new(Cell::new(0)),
                dropped: Rc::new(Cell::new(0)),
            }
        }

        fn make(&self) -> impl FnOnce() -> G2dResult<Probe> + '_ {
            move || {
                self.built.set(self.built.get() + 1);
                Ok(Probe {
                    dropped: self.dropped.clone(),
                })
            }
        }
    }

    #[test]
    fn shared_constructs_once_and_destroys_once() {
        let tracker = Tracker::new();
        let mut slot = SharedEngine::new();

        for _ in 0..3 {
            slot.acquire(tracker.make()).unwrap();
        }
        assert_eq!(slot.count(), 3);
        assert_eq!(tracker.built.get(), 1);

        assert!(slot.release().is_none());
        assert!(slot.release().is_none());
        assert_eq!(tracker.dropped.get(), 0);

        drop(slot.release());
        assert_eq!(slot.count(), 0);
        assert_eq!(tracker.dropped.get(), 1);
        assert!(slot.get().is_none());
    }

    #[test]
    fn shared_interleaved_calls_balance_to_zero() {
        let tracker = Tracker::new();
        let mut slot = SharedEngine::new();

        // acquire, acquire, release, acquire, release, release
        slot.acquire(tracker.make()).unwrap();
        slot.acquire(tracker.make()).unwrap();
        drop(slot.release());
        slot.acquire(tracker.make()).unwrap();
        drop(slot.release());
        drop(slot.release());

        assert_eq!(slot.count(), 0);
        assert_eq!(tracker.built.get(), 1);
        assert_eq!(tracker.dropped.get(), 1);
    }

    #[test]
    fn shared_reconstructs_after_full_release() {
        let tracker = Tracker::new();
        let mut slot = SharedEngine::new();

        slot.acquire(tracker.make()).unwrap();
        drop(slot.release());
        slot.acquire(tracker.make()).unwrap();
        drop(slot.release());

        assert_eq!(tracker.built.get(), 2);
        assert_eq!(tracker.dropped.get(), 2);
    }

    #[test]
    fn shared_release_at_zero_is_noop() {
        let mut slot: SharedEngine<u8> = SharedEngine::new();
        assert!(slot.release().is_none());
        assert_eq!(slot.count(), 0);
    }

    #[test]
    fn shared_failed_construction_keeps_count_zero() {
        let mut slot: SharedEngine<u8> = SharedEngine::new();
        let result = slot.acquire(|| Err(G2dError::EngineInit("no device".into())));
        assert!(matches!(result, Err(G2dError::EngineInit(_))));
        assert_eq!(slot.count(), 0);

        assert_eq!(*slot.acquire(|| Ok(7)).unwrap(), 7);
        assert_eq!(slot.count(), 1);
    }

    #[test]
    fn lazy_is_idempotent() {
        let tracker = Tracker::new();
        let mut slot = LazyEngine::new();

        slot.initialize(tracker.make()).unwrap();
        slot.initialize(tracker.make()).unwrap();
        assert_eq!(tracker.built.get(), 1);
        assert!(slot.is_initialized());

        drop(slot.uninitialize());
        assert_eq!(tracker.dropped.get(), 1);
        assert!(!slot.is_initialized());
        assert!(slot.uninitialize().is_none());
    }

    #[test]
    fn lazy_single_uninit_releases_after_many_inits() {
        let tracker = Tracker::new();
        let mut slot = LazyEngine::new();

        for _ in 0..4 {
            slot.initialize(tracker.make()).unwrap();
        }
        drop(slot.uninitialize());
        assert_eq!(tracker.dropped.get(), 1);

        slot.initialize(tracker.make()).unwrap();
        assert_eq!(tracker.built.get(), 2);
    }
}
