/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Pointers
//!
//! Pointer arithmetic for atomic cells holding `*mut P`.
//!
//! Offsets are element counts, as with `pointer::wrapping_add`: the delta is
//! multiplied by `size_of::<P>()` before the word-level add or subtract.
//! `P` is `Sized`, so the element size is always known.
//!
//! # Author
//!
//! Haixing Hu

use std::mem::size_of;

use crate::atomic::atomic_cell::Atomic;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;
use crate::atomic::traits::AtomicValue;
use crate::atomic::traits::PointerWord;
use crate::atomic::word::AtomicWord;

/// Converts an element count to a byte delta in the pointer word.
#[inline(always)]
fn byte_delta<P>(count: isize) -> PointerWord {
    count.wrapping_mul(size_of::<P>() as isize) as usize as PointerWord
}

/// Pointer operations for an atomic raw pointer.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::AtomicPtr;
///
/// let mut items = [10u64, 20, 30, 40];
/// let cursor = AtomicPtr::new(items.as_mut_ptr());
///
/// let first = cursor.fetch_add(2);
/// assert_eq!(first, items.as_mut_ptr());
/// assert_eq!(unsafe { *cursor.load() }, 30);
/// ```
///
/// # Author
///
/// Haixing Hu
impl<P> Atomic<*mut P> {
    /// Advances the pointer by `count` elements with `SeqCst` ordering,
    /// returning the previous pointer.
    #[inline]
    pub fn fetch_add(&self, count: isize) -> *mut P {
        self.fetch_add_with(count, SeqCst)
    }

    /// Advances the pointer by `count` elements, returning the previous
    /// pointer.
    ///
    /// The address arithmetic wraps; the result is only dereferenceable if
    /// it stays within the same allocation.
    ///
    /// # Parameters
    ///
    /// * `count` - The number of elements to advance by; may be negative.
    /// * `order` - Any read-modify-write order.
    ///
    /// # Returns
    ///
    /// The pointer before the operation.
    #[inline]
    pub fn fetch_add_with<O: RmwOrder>(&self, count: isize, _order: O) -> *mut P {
        // SAFETY: the word pointer is valid and aligned for the lifetime of
        // `self`, and any address is a valid raw pointer value.
        unsafe {
            <*mut P>::from_word(<PointerWord as AtomicWord>::fetch_add::<O>(
                self.word_ptr(),
                byte_delta::<P>(count),
            ))
        }
    }

    /// Moves the pointer back by `count` elements with `SeqCst` ordering,
    /// returning the previous pointer.
    #[inline]
    pub fn fetch_sub(&self, count: isize) -> *mut P {
        self.fetch_sub_with(count, SeqCst)
    }

    /// Moves the pointer back by `count` elements, returning the previous
    /// pointer.
    ///
    /// Uses the native subtract primitive on the byte delta.
    #[inline]
    pub fn fetch_sub_with<O: RmwOrder>(&self, count: isize, _order: O) -> *mut P {
        // SAFETY: see `fetch_add_with`.
        unsafe {
            <*mut P>::from_word(<PointerWord as AtomicWord>::fetch_sub::<O>(
                self.word_ptr(),
                byte_delta::<P>(count),
            ))
        }
    }

    /// Advances the pointer by `count` elements with `SeqCst` ordering,
    /// returning the new pointer.
    #[inline]
    pub fn add_fetch(&self, count: isize) -> *mut P {
        self.add_fetch_with(count, SeqCst)
    }

    /// Advances the pointer by `count` elements, returning the new pointer.
    #[inline]
    pub fn add_fetch_with<O: RmwOrder>(&self, count: isize, order: O) -> *mut P {
        self.fetch_add_with(count, order).wrapping_offset(count)
    }

    /// Moves the pointer back by `count` elements with `SeqCst` ordering,
    /// returning the new pointer.
    #[inline]
    pub fn sub_fetch(&self, count: isize) -> *mut P {
        self.sub_fetch_with(count, SeqCst)
    }

    /// Moves the pointer back by `count` elements, returning the new pointer.
    #[inline]
    pub fn sub_fetch_with<O: RmwOrder>(&self, count: isize, order: O) -> *mut P {
        self.fetch_sub_with(count, order)
            .wrapping_offset(count.wrapping_neg())
    }

    /// Advances the pointer by one element with `SeqCst` ordering, returning
    /// the previous pointer.
    #[inline]
    pub fn fetch_inc(&self) -> *mut P {
        self.fetch_add(1)
    }

    /// Moves the pointer back by one element with `SeqCst` ordering,
    /// returning the previous pointer.
    #[inline]
    pub fn fetch_dec(&self) -> *mut P {
        self.fetch_sub(1)
    }

    /// Advances the pointer by one element with `SeqCst` ordering, returning
    /// the new pointer.
    #[inline]
    pub fn inc_fetch(&self) -> *mut P {
        self.add_fetch(1)
    }

    /// Moves the pointer back by one element with `SeqCst` ordering,
    /// returning the new pointer.
    #[inline]
    pub fn dec_fetch(&self) -> *mut P {
        self.sub_fetch(1)
    }
}
