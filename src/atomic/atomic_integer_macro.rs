/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Integer Macro
//!
//! Provides the macros that generate the integer operations of
//! [`Atomic<T>`](crate::atomic::Atomic) for each primitive integer type.
//!
//! # Author
//!
//! Haixing Hu

/// Generates one arithmetic or bitwise fetch-op family: the pre-op form
/// (`fetch_*`) and the post-op form (`*_fetch`), each with a `SeqCst`
/// default and an explicit-order variant.
///
/// # Parameters
///
/// * `$value_type` - The integer type
/// * `$word` - The word type it rides on
/// * `$fetch` / `$fetch_with` - Names of the pre-op methods
/// * `$op_fetch` / `$op_fetch_with` - Names of the post-op methods
/// * `$primitive` - The `AtomicWord` primitive
/// * `$apply` - Computes the post-op word from the previous word and the
///   operand
/// * `$doc_op` - Description of the operation for documentation
macro_rules! impl_integer_fetch_op {
    (
        $value_type:ty,
        $word:ty,
        $fetch:ident,
        $fetch_with:ident,
        $op_fetch:ident,
        $op_fetch_with:ident,
        $primitive:ident,
        $apply:expr,
        $doc_op:expr
    ) => {
        #[doc = concat!("Atomically ", $doc_op, " with `SeqCst` ordering, returning the previous value.")]
        #[inline]
        pub fn $fetch(&self, value: $value_type) -> $value_type {
            self.$fetch_with(value, SeqCst)
        }

        #[doc = concat!("Atomically ", $doc_op, ", returning the previous value.")]
        ///
        /// # Parameters
        ///
        /// * `value` - The operand.
        /// * `order` - Any read-modify-write order.
        ///
        /// # Returns
        ///
        /// The value before the operation.
        #[inline]
        pub fn $fetch_with<O: RmwOrder>(&self, value: $value_type, _order: O) -> $value_type {
            // SAFETY: the word pointer is valid and aligned for the lifetime
            // of `self`.
            let previous = unsafe {
                <$word as AtomicWord>::$primitive::<O>(self.word_ptr(), value as $word)
            };
            previous as $value_type
        }

        #[doc = concat!("Atomically ", $doc_op, " with `SeqCst` ordering, returning the new value.")]
        #[inline]
        pub fn $op_fetch(&self, value: $value_type) -> $value_type {
            self.$op_fetch_with(value, SeqCst)
        }

        #[doc = concat!("Atomically ", $doc_op, ", returning the new value.")]
        ///
        /// The new value is computed from the value the hardware operation
        /// observed, so it is exactly the value this operation stored.
        ///
        /// # Parameters
        ///
        /// * `value` - The operand.
        /// * `order` - Any read-modify-write order.
        ///
        /// # Returns
        ///
        /// The value after the operation.
        #[inline]
        pub fn $op_fetch_with<O: RmwOrder>(&self, value: $value_type, order: O) -> $value_type {
            let apply: fn($word, $word) -> $word = $apply;
            apply(self.$fetch_with(value, order) as $word, value as $word) as $value_type
        }
    };
}

/// Generates the integer operations of `Atomic<$value_type>`.
///
/// Arithmetic wraps around on overflow. Signed types share the word of the
/// unsigned type of the same width; two's-complement addition is the same
/// operation on both.
///
/// # Parameters
///
/// * `$value_type` - The integer type (e.g., `i32`)
/// * `$word` - The word type of the same width (e.g., `u32`)
/// * `$doc_type` - The type description for documentation (e.g., "32-bit
///   signed integer")
macro_rules! impl_atomic_integer {
    ($value_type:ty, $word:ty, $doc_type:expr) => {
        #[doc = concat!("Integer operations for an atomic ", $doc_type, ".")]
        ///
        /// # Example
        ///
        /// ```rust
        /// use prism3_lockfree::{Atomic, Relaxed};
        /// use std::sync::Arc;
        /// use std::thread;
        ///
        #[doc = concat!("let counter = Arc::new(Atomic::<", stringify!($value_type), ">::new(0));")]
        /// let mut handles = vec![];
        ///
        /// for _ in 0..10 {
        ///     let counter = counter.clone();
        ///     handles.push(thread::spawn(move || {
        ///         for _ in 0..10 {
        ///             counter.fetch_add_with(1, Relaxed);
        ///         }
        ///     }));
        /// }
        ///
        /// for handle in handles {
        ///     handle.join().unwrap();
        /// }
        ///
        /// assert_eq!(counter.load(), 100);
        /// ```
        impl Atomic<$value_type> {
            impl_integer_fetch_op!(
                $value_type,
                $word,
                fetch_add,
                fetch_add_with,
                add_fetch,
                add_fetch_with,
                fetch_add,
                |previous, value| previous.wrapping_add(value),
                "adds `value` (wrapping)"
            );

            impl_integer_fetch_op!(
                $value_type,
                $word,
                fetch_sub,
                fetch_sub_with,
                sub_fetch,
                sub_fetch_with,
                fetch_sub,
                |previous, value| previous.wrapping_sub(value),
                "subtracts `value` (wrapping)"
            );

            impl_integer_fetch_op!(
                $value_type,
                $word,
                fetch_and,
                fetch_and_with,
                and_fetch,
                and_fetch_with,
                fetch_and,
                |previous, value| previous & value,
                "performs bitwise AND with `value`"
            );

            impl_integer_fetch_op!(
                $value_type,
                $word,
                fetch_or,
                fetch_or_with,
                or_fetch,
                or_fetch_with,
                fetch_or,
                |previous, value| previous | value,
                "performs bitwise OR with `value`"
            );

            impl_integer_fetch_op!(
                $value_type,
                $word,
                fetch_xor,
                fetch_xor_with,
                xor_fetch,
                xor_fetch_with,
                fetch_xor,
                |previous, value| previous ^ value,
                "performs bitwise XOR with `value`"
            );

            /// Increments the value by one with `SeqCst` ordering, returning
            /// the previous value.
            #[inline]
            pub fn fetch_inc(&self) -> $value_type {
                self.fetch_add(1)
            }

            /// Decrements the value by one with `SeqCst` ordering, returning
            /// the previous value.
            #[inline]
            pub fn fetch_dec(&self) -> $value_type {
                self.fetch_sub(1)
            }

            /// Increments the value by one with `SeqCst` ordering, returning
            /// the new value.
            #[inline]
            pub fn inc_fetch(&self) -> $value_type {
                self.add_fetch(1)
            }

            /// Decrements the value by one with `SeqCst` ordering, returning
            /// the new value.
            #[inline]
            pub fn dec_fetch(&self) -> $value_type {
                self.sub_fetch(1)
            }

            /// Stores the maximum of the current value and `value` with
            /// `SeqCst` ordering, returning the previous value.
            #[inline]
            pub fn fetch_max(&self, value: $value_type) -> $value_type {
                self.fetch_max_with(value, SeqCst)
            }

            /// Stores the maximum of the current value and `value`, returning
            /// the previous value.
            ///
            /// There is no portable hardware primitive for this, so it is
            /// a compare-exchange loop.
            ///
            /// # Example
            ///
            /// ```rust
            /// use prism3_lockfree::{Atomic, AcqRel};
            ///
            #[doc = concat!("let high = Atomic::<", stringify!($value_type), ">::new(10);")]
            /// assert_eq!(high.fetch_max_with(20, AcqRel), 10);
            /// assert_eq!(high.fetch_max_with(15, AcqRel), 20);
            /// assert_eq!(high.load(), 20);
            /// ```
            #[inline]
            pub fn fetch_max_with<O: RmwOrder>(&self, value: $value_type, order: O) -> $value_type {
                self.fetch_update_with(|current| current.max(value), order)
            }

            /// Stores the minimum of the current value and `value` with
            /// `SeqCst` ordering, returning the previous value.
            #[inline]
            pub fn fetch_min(&self, value: $value_type) -> $value_type {
                self.fetch_min_with(value, SeqCst)
            }

            /// Stores the minimum of the current value and `value`, returning
            /// the previous value.
            #[inline]
            pub fn fetch_min_with<O: RmwOrder>(&self, value: $value_type, order: O) -> $value_type {
                self.fetch_update_with(|current| current.min(value), order)
            }
        }
    };
}
