/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Boolean
//!
//! Logical operations for atomic cells holding `bool`.
//!
//! A `bool` rides on a `u8` word holding 0 or 1. Bitwise AND, OR and XOR
//! with another 0/1 word keep it 0 or 1, so the integer fetch-ops apply
//! directly.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::atomic_cell::Atomic;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;
use crate::atomic::word::AtomicWord;

macro_rules! impl_bool_fetch_op {
    ($fetch:ident, $fetch_with:ident, $primitive:ident, $doc_op:expr) => {
        #[doc = concat!("Atomically ", $doc_op, " with `SeqCst` ordering, returning the previous value.")]
        #[inline]
        pub fn $fetch(&self, value: bool) -> bool {
            self.$fetch_with(value, SeqCst)
        }

        #[doc = concat!("Atomically ", $doc_op, ", returning the previous value.")]
        ///
        /// # Parameters
        ///
        /// * `value` - The operand.
        /// * `order` - Any read-modify-write order.
        #[inline]
        pub fn $fetch_with<O: RmwOrder>(&self, value: bool, _order: O) -> bool {
            // SAFETY: the word pointer is valid and aligned for the lifetime
            // of `self`, and the result is 0 or 1.
            let previous = unsafe {
                <u8 as AtomicWord>::$primitive::<O>(self.word_ptr(), u8::from(value))
            };
            previous != 0
        }
    };
}

/// Logical operations for an atomic boolean.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::AtomicBool;
///
/// let flag = AtomicBool::new(false);
/// assert_eq!(flag.fetch_or(true), false);
/// assert_eq!(flag.fetch_not(), true);
/// assert_eq!(flag.load(), false);
/// ```
///
/// # Author
///
/// Haixing Hu
impl Atomic<bool> {
    impl_bool_fetch_op!(fetch_and, fetch_and_with, fetch_and, "performs logical AND with `value`");
    impl_bool_fetch_op!(fetch_or, fetch_or_with, fetch_or, "performs logical OR with `value`");
    impl_bool_fetch_op!(fetch_xor, fetch_xor_with, fetch_xor, "performs logical XOR with `value`");

    /// Atomically negates the value with `SeqCst` ordering, returning the
    /// previous value.
    #[inline]
    pub fn fetch_not(&self) -> bool {
        self.fetch_xor(true)
    }

    /// Atomically negates the value, returning the previous value.
    #[inline]
    pub fn fetch_not_with<O: RmwOrder>(&self, order: O) -> bool {
        self.fetch_xor_with(true, order)
    }
}
