#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::{Mutex, MutexGuard};
#[cfg(not(feature = "parking-lot"))]
pub(crate) use std::sync::{Mutex, MutexGuard};

/// Locks `mutex`, ignoring poisoning.
///
/// The guarded state is two integers that are always written together, so a
/// panic in another holder cannot leave it half-updated.
#[inline]
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    #[cfg(feature = "parking-lot")]
    {
        mutex.lock()
    }
    #[cfg(not(feature = "parking-lot"))]
    {
        mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
