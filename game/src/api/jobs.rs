//====================================================================

use std::sync::Arc;

use parking_lot::Mutex;

//====================================================================

enum Slot<T> {
    Pending,
    Ready(T),
    Taken,
}

/// Value produced by a background job. The producing side calls
/// [`JobPromise::set_value`], the frame loop polls [`JobPromise::take_value`].
pub struct JobPromise<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Clone for JobPromise<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> Default for JobPromise<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JobPromise<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::Pending)),
        }
    }

    /// Promise that is already fulfilled.
    pub fn resolved(value: T) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::Ready(value))),
        }
    }

    /// True until a value has been set. Contention counts as pending.
    pub fn is_pending(&self) -> bool {
        match self.slot.try_lock() {
            Some(slot) => matches!(*slot, Slot::Pending),
            None => true,
        }
    }

    /// Takes the value if it has arrived. Returns `Some` at most once.
    pub fn take_value(&self) -> Option<T> {
        let mut slot = self.slot.try_lock()?;

        match std::mem::replace(&mut *slot, Slot::Taken) {
            Slot::Ready(value) => Some(value),
            other => {
                *slot = other;
                None
            }
        }
    }

    pub fn set_value(&self, value: T) {
        let mut slot = self.slot.lock();

        if let Slot::Taken = *slot {
            log::warn!("Job promise resolved after its value was already taken");
        }

        *slot = Slot::Ready(value);
    }

    /// Blocks the current thread until the value arrives.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn wait(&self) -> T {
        loop {
            if let Some(value) = self.take_value() {
                return value;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
    }
}

//====================================================================


//====================================================================
