/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Cell
//!
//! Provides [`Atomic<T>`], the generic lock-free atomic cell, and the
//! operations every value type supports: load, store, exchange and
//! compare-exchange.
//!
//! # Author
//!
//! Haixing Hu

use std::cell::UnsafeCell;
use std::fmt;
use std::mem::align_of;
use std::mem::size_of;
use std::panic::RefUnwindSafe;

use crate::atomic::capability::is_lock_free_size;
use crate::atomic::error::AtomicError;
use crate::atomic::order::FailureOrder;
use crate::atomic::order::LoadOrder;
use crate::atomic::order::Relaxed;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;
use crate::atomic::order::StoreOrder;
use crate::atomic::pun::shared_integral_cast;
use crate::atomic::traits::AtomicValue;
use crate::atomic::word::cas_loop;
use crate::atomic::word::AtomicWord;

/// A lock-free atomic cell holding a value of type `T`.
///
/// The value is stored with the alignment of its word, so every operation
/// compiles to the hardware atomic of that width. A type whose size has no
/// lock-free word on the target does not implement
/// [`AtomicValue`](crate::atomic::AtomicValue) and cannot be used.
///
/// # Memory Ordering
///
/// Every operation exists in two forms:
///
/// - a default form (`load`, `store`, ...) that uses `SeqCst`;
/// - an explicit form (`load_with`, `store_with`, ...) taking an order tag.
///
/// The default forms call the explicit forms; there is no separate
/// implementation. Passing an order the operation does not accept, such as
/// `Release` to a load, is a compile-time error.
///
/// # Value Categories
///
/// All value types get load, store, exchange and compare-exchange.
/// Integers additionally get arithmetic and bitwise fetch-ops, raw pointers
/// get element-scaled arithmetic, and floats get CAS-based addition.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::{Atomic, Acquire, Relaxed, Release};
///
/// let value = Atomic::<u64>::new(10);
///
/// let mut expected = 10;
/// assert!(value.compare_exchange_strong(&mut expected, 20));
/// assert_eq!(value.load(), 20);
///
/// assert!(!value.compare_exchange_strong(&mut expected, 30));
/// assert_eq!(expected, 20);
///
/// value.store_with(5, Release);
/// assert_eq!(value.load_with(Acquire), 5);
/// assert_eq!(value.exchange_with(6, Relaxed), 5);
/// ```
///
/// A value without a lock-free word of its size does not compile:
///
/// ```compile_fail
/// use prism3_lockfree::Atomic;
///
/// let bytes = Atomic::<[u8; 3]>::new([1, 2, 3]);
/// bytes.store([4, 5, 6]);
/// ```
///
/// # Author
///
/// Haixing Hu
#[repr(C)]
pub struct Atomic<T: AtomicValue> {
    _align: [<T::Word as AtomicWord>::Align; 0],
    value: UnsafeCell<T>,
}

// SAFETY: the value is only accessed through atomic operations, and
// `AtomicValue` guarantees it may move between threads as plain bits.
unsafe impl<T: AtomicValue> Sync for Atomic<T> {}

// SAFETY: see `Sync`.
unsafe impl<T: AtomicValue> Send for Atomic<T> {}

impl<T: AtomicValue> RefUnwindSafe for Atomic<T> {}

impl<T: AtomicValue> Atomic<T> {
    /// Whether every cell of this type is lock-free. Always `true` for a type
    /// that compiles.
    pub const IS_ALWAYS_LOCK_FREE: bool = is_lock_free_size(size_of::<T>());

    /// Creates a new atomic cell.
    ///
    /// # Parameters
    ///
    /// * `value` - The initial value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_lockfree::Atomic;
    ///
    /// static COUNTER: Atomic<u32> = Atomic::new(0);
    /// assert_eq!(COUNTER.load(), 0);
    /// ```
    #[inline]
    pub const fn new(value: T) -> Self {
        const {
            assert!(
                size_of::<T>() == size_of::<T::Word>(),
                "an atomic value must have the size of its word"
            );
            assert!(
                align_of::<Self>() == size_of::<T>(),
                "an atomic cell must be aligned to its size"
            );
        };
        Self {
            _align: [],
            value: UnsafeCell::new(value),
        }
    }

    /// Views existing memory as an atomic cell.
    ///
    /// The alignment is checked at runtime, since foreign memory may only be
    /// aligned to `align_of::<T>()`, which can be smaller than the size of
    /// the word.
    ///
    /// # Parameters
    ///
    /// * `ptr` - Pointer to the value.
    ///
    /// # Returns
    ///
    /// The cell, or an [`AtomicError`] if `ptr` is null or misaligned.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads and writes for `'a`, and for that
    /// lifetime the value must only be accessed through atomic operations.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_lockfree::Atomic;
    ///
    /// let mut raw = 7u32;
    /// let cell = unsafe { Atomic::<u32>::from_ptr(&mut raw) }.unwrap();
    /// cell.fetch_add(1);
    /// assert_eq!(cell.load(), 8);
    /// ```
    #[inline]
    pub unsafe fn from_ptr<'a>(ptr: *mut T) -> Result<&'a Self, AtomicError> {
        if ptr.is_null() {
            return Err(AtomicError::Null);
        }
        let required = align_of::<Self>();
        let address = ptr as usize;
        if address % required != 0 {
            return Err(AtomicError::Misaligned { address, required });
        }
        // SAFETY: `Atomic<T>` has the size of `T`, the pointer is non-null
        // and aligned, and the caller guarantees validity and atomic access.
        Ok(unsafe { &*ptr.cast::<Self>() })
    }

    /// Returns a raw pointer to the value.
    ///
    /// Accessing the value through this pointer non-atomically while it is
    /// shared is a data race.
    #[inline]
    pub const fn as_ptr(&self) -> *mut T {
        self.value.get()
    }

    /// Returns a mutable reference to the value.
    ///
    /// The exclusive borrow proves no other thread can access the cell, so
    /// no atomic operation is needed.
    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }

    /// Consumes the cell and returns the value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }

    /// Returns whether operations on this cell are lock-free.
    ///
    /// Always `true`; the result never changes between calls.
    #[inline]
    pub const fn is_lock_free(&self) -> bool {
        Self::IS_ALWAYS_LOCK_FREE
    }

    /// Pointer to the word the hardware primitives operate on.
    #[inline(always)]
    pub(crate) fn word_ptr(&self) -> *mut T::Word {
        shared_integral_cast::<T::Word, T>(self.value.get())
    }

    /// Loads the current value with `SeqCst` ordering.
    ///
    /// # Returns
    ///
    /// The current value.
    #[inline]
    pub fn load(&self) -> T {
        self.load_with(SeqCst)
    }

    /// Loads the current value.
    ///
    /// # Parameters
    ///
    /// * `order` - One of `Relaxed`, `Acquire`, `SeqCst` or `ReadDepends`.
    ///
    /// # Returns
    ///
    /// The current value.
    #[inline]
    pub fn load_with<O: LoadOrder>(&self, _order: O) -> T {
        // SAFETY: the word pointer is valid and aligned for the lifetime of
        // `self`, and only stored words produced from `T` are ever read.
        unsafe { T::from_word(<T::Word as AtomicWord>::load::<O>(self.word_ptr())) }
    }

    /// Stores a value with `SeqCst` ordering.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value.
    #[inline]
    pub fn store(&self, value: T) {
        self.store_with(value, SeqCst);
    }

    /// Stores a value.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value.
    /// * `order` - One of `Relaxed`, `Release` or `SeqCst`.
    #[inline]
    pub fn store_with<O: StoreOrder>(&self, value: T, _order: O) {
        // SAFETY: see `load_with`.
        unsafe { <T::Word as AtomicWord>::store::<O>(self.word_ptr(), value.into_word()) }
    }

    /// Replaces the value with `SeqCst` ordering, returning the previous
    /// value.
    #[inline]
    pub fn exchange(&self, value: T) -> T {
        self.exchange_with(value, SeqCst)
    }

    /// Replaces the value, returning the previous value.
    ///
    /// # Parameters
    ///
    /// * `value` - The new value.
    /// * `order` - Any read-modify-write order.
    ///
    /// # Returns
    ///
    /// The value before the exchange.
    #[inline]
    pub fn exchange_with<O: RmwOrder>(&self, value: T, _order: O) -> T {
        // SAFETY: see `load_with`.
        unsafe { T::from_word(<T::Word as AtomicWord>::exchange::<O>(self.word_ptr(), value.into_word())) }
    }

    /// Weak compare-exchange with `SeqCst` ordering.
    ///
    /// See [`Atomic::compare_exchange_weak_with`].
    #[inline]
    pub fn compare_exchange_weak(&self, expected: &mut T, desired: T) -> bool {
        self.compare_exchange_weak_with(expected, desired, SeqCst, SeqCst)
    }

    /// Stores `desired` if the current value equals `*expected`.
    ///
    /// Values are compared by their bits, not by `PartialEq`. The weak form
    /// may fail even when the values are equal, so it belongs in a retry
    /// loop.
    ///
    /// # Parameters
    ///
    /// * `expected` - The expected value; overwritten with the observed
    ///   value on failure.
    /// * `desired` - The value to store on success.
    /// * `success` - The order of the read-modify-write on success.
    /// * `failure` - The order of the load on failure; never stronger than
    ///   `success` and never `Release` or `AcqRel`.
    ///
    /// # Returns
    ///
    /// `true` if `desired` was stored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_lockfree::{Atomic, AcqRel, Acquire};
    ///
    /// let value = Atomic::<i32>::new(1);
    /// let mut current = value.load();
    /// loop {
    ///     let desired = current * 10;
    ///     if value.compare_exchange_weak_with(&mut current, desired, AcqRel, Acquire) {
    ///         break;
    ///     }
    /// }
    /// assert_eq!(value.load(), 10);
    /// ```
    #[inline]
    pub fn compare_exchange_weak_with<S: RmwOrder, F: FailureOrder<S>>(
        &self,
        expected: &mut T,
        desired: T,
        _success: S,
        _failure: F,
    ) -> bool {
        // SAFETY: see `load_with`.
        let result = unsafe {
            <T::Word as AtomicWord>::compare_exchange_weak::<S, F>(
                self.word_ptr(),
                expected.into_word(),
                desired.into_word(),
            )
        };
        Self::settle(expected, result)
    }

    /// Strong compare-exchange with `SeqCst` ordering.
    ///
    /// See [`Atomic::compare_exchange_strong_with`].
    #[inline]
    pub fn compare_exchange_strong(&self, expected: &mut T, desired: T) -> bool {
        self.compare_exchange_strong_with(expected, desired, SeqCst, SeqCst)
    }

    /// Stores `desired` if the current value equals `*expected`.
    ///
    /// Values are compared by their bits, not by `PartialEq`. Unlike the weak
    /// form, this fails only if the values differ.
    ///
    /// # Parameters
    ///
    /// * `expected` - The expected value; overwritten with the observed
    ///   value on failure.
    /// * `desired` - The value to store on success.
    /// * `success` - The order of the read-modify-write on success.
    /// * `failure` - The order of the load on failure.
    ///
    /// # Returns
    ///
    /// `true` if `desired` was stored.
    #[inline]
    pub fn compare_exchange_strong_with<S: RmwOrder, F: FailureOrder<S>>(
        &self,
        expected: &mut T,
        desired: T,
        _success: S,
        _failure: F,
    ) -> bool {
        // SAFETY: see `load_with`.
        let result = unsafe {
            <T::Word as AtomicWord>::compare_exchange_strong::<S, F>(
                self.word_ptr(),
                expected.into_word(),
                desired.into_word(),
            )
        };
        Self::settle(expected, result)
    }

    #[inline(always)]
    fn settle(expected: &mut T, result: Result<T::Word, T::Word>) -> bool {
        match result {
            Ok(_) => true,
            Err(observed) => {
                // SAFETY: the observed word was stored from a `T`.
                *expected = unsafe { T::from_word(observed) };
                false
            }
        }
    }

    /// Updates the value with a function and `SeqCst` ordering, returning
    /// the previous value.
    ///
    /// See [`Atomic::fetch_update_with`].
    #[inline]
    pub fn fetch_update<F>(&self, f: F) -> T
    where
        F: FnMut(T) -> T,
    {
        self.fetch_update_with(f, SeqCst)
    }

    /// Updates the value with a function, returning the previous value.
    ///
    /// Internally uses a compare-exchange loop, so `f` may be called more
    /// than once when other threads modify the cell concurrently.
    ///
    /// # Parameters
    ///
    /// * `f` - Maps the current value to the new value.
    /// * `order` - The order of the successful read-modify-write.
    ///
    /// # Returns
    ///
    /// The value `f` was applied to.
    ///
    /// # Example
    ///
    /// ```rust
    /// use prism3_lockfree::{Atomic, AcqRel};
    ///
    /// let value = Atomic::<u32>::new(10);
    /// assert_eq!(value.fetch_update_with(|x| x * 2, AcqRel), 10);
    /// assert_eq!(value.load(), 20);
    /// ```
    #[inline]
    pub fn fetch_update_with<F, O>(&self, mut f: F, _order: O) -> T
    where
        F: FnMut(T) -> T,
        O: RmwOrder,
    {
        // SAFETY: see `load_with`; every word passed to `f` was stored from
        // a `T`.
        unsafe {
            T::from_word(cas_loop::<T::Word, O, _>(self.word_ptr(), |word| {
                f(T::from_word(word)).into_word()
            }))
        }
    }
}

impl<T: AtomicValue + Default> Default for Atomic<T> {
    #[inline]
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: AtomicValue> From<T> for Atomic<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: AtomicValue + fmt::Debug> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atomic")
            .field(&self.load_with(Relaxed))
            .finish()
    }
}

impl<T: AtomicValue + fmt::Display> fmt::Display for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.load(), f)
    }
}
