/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Flag
//!
//! The minimal spinlock building block: a boolean that can be set, cleared
//! and tested.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;

use crate::atomic::atomic_cell::Atomic;
use crate::atomic::order::LoadOrder;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;
use crate::atomic::order::StoreOrder;

/// A boolean flag with set, clear and test operations.
///
/// `test_and_set` is an exchange with `true`, `clear` a store of `false`,
/// and `test` a load. The flag has no storage or logic of its own beyond an
/// [`Atomic<bool>`].
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::{cpu_pause, Acquire, AtomicFlag, Release};
///
/// let lock = AtomicFlag::new();
///
/// // Acquire the lock
/// while lock.test_and_set_with(Acquire) {
///     cpu_pause();
/// }
///
/// // ... critical section ...
///
/// lock.clear_with(Release);
/// assert!(!lock.test());
/// ```
///
/// # Author
///
/// Haixing Hu
#[repr(transparent)]
pub struct AtomicFlag {
    inner: Atomic<bool>,
}

impl AtomicFlag {
    /// Creates a new, clear flag.
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: Atomic::new(false),
        }
    }

    /// Sets the flag with `SeqCst` ordering, returning whether it was
    /// already set.
    #[inline]
    pub fn test_and_set(&self) -> bool {
        self.test_and_set_with(SeqCst)
    }

    /// Sets the flag, returning whether it was already set.
    ///
    /// # Parameters
    ///
    /// * `order` - Any read-modify-write order; `Acquire` when taking a lock.
    ///
    /// # Returns
    ///
    /// The previous state of the flag.
    #[inline]
    pub fn test_and_set_with<O: RmwOrder>(&self, order: O) -> bool {
        self.inner.exchange_with(true, order)
    }

    /// Clears the flag with `SeqCst` ordering.
    #[inline]
    pub fn clear(&self) {
        self.clear_with(SeqCst);
    }

    /// Clears the flag.
    ///
    /// # Parameters
    ///
    /// * `order` - One of `Relaxed`, `Release` or `SeqCst`; `Release` when
    ///   releasing a lock.
    #[inline]
    pub fn clear_with<O: StoreOrder>(&self, order: O) {
        self.inner.store_with(false, order);
    }

    /// Returns whether the flag is set, with `SeqCst` ordering.
    #[inline]
    pub fn test(&self) -> bool {
        self.test_with(SeqCst)
    }

    /// Returns whether the flag is set.
    #[inline]
    pub fn test_with<O: LoadOrder>(&self, order: O) -> bool {
        self.inner.load_with(order)
    }
}

impl Default for AtomicFlag {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AtomicFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicFlag")
            .field("set", &self.inner.load_with(crate::atomic::order::Relaxed))
            .finish()
    }
}
