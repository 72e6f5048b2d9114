use std::sync::{Arc, PoisonError, RwLock};

/// A value that is replaced wholesale, never mutated in place.
///
/// Readers take an `Arc` snapshot and keep using it for as long as they like; a
/// publisher builds the replacement off to the side and swaps the pointer. The lock is
/// held only for the pointer copy, so readers never observe a half-built value.
pub struct Shared<T> {
    current: RwLock<Arc<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(value)),
        }
    }

    /// Current snapshot
    pub fn load(&self) -> Arc<T> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the value and return the previous snapshot
    pub fn publish(&self, value: T) -> Arc<T> {
        let next = Arc::new(value);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
