/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Floats
//!
//! Arithmetic for atomic cells holding `f32` and `f64`.
//!
//! No hardware has floating-point fetch-ops on integer words, so every
//! operation here is a compare-exchange loop over the bit pattern. Note that
//! compare-exchange on a float cell compares bits: `-0.0` does not match
//! `0.0`, and a NaN matches the identical NaN.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::atomic_cell::Atomic;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;

/// Generates one floating-point fetch-op with its `SeqCst` default.
///
/// # Parameters
///
/// * `$float` - The float type
/// * `$fetch` / `$fetch_with` - Names of the methods
/// * `$op` - The arithmetic operator
/// * `$doc_op` - Description of the operation for documentation
macro_rules! impl_float_fetch_op {
    ($float:ty, $fetch:ident, $fetch_with:ident, $op:tt, $doc_op:expr) => {
        #[doc = concat!("Atomically ", $doc_op, " with `SeqCst` ordering, returning the previous value.")]
        #[inline]
        pub fn $fetch(&self, value: $float) -> $float {
            self.$fetch_with(value, SeqCst)
        }

        #[doc = concat!("Atomically ", $doc_op, ", returning the previous value.")]
        ///
        /// # Parameters
        ///
        /// * `value` - The operand.
        /// * `order` - The order of the successful read-modify-write.
        ///
        /// # Returns
        ///
        /// The value before the operation.
        #[inline]
        pub fn $fetch_with<O: RmwOrder>(&self, value: $float, order: O) -> $float {
            self.fetch_update_with(|current| current $op value, order)
        }
    };
}

/// Generates the arithmetic of `Atomic<$float>`.
macro_rules! impl_atomic_float {
    ($float:ty) => {
        /// Floating-point arithmetic for an atomic float.
        ///
        /// # Example
        ///
        /// ```rust
        /// use prism3_lockfree::Atomic;
        ///
        #[doc = concat!("let total = Atomic::<", stringify!($float), ">::new(1.5);")]
        /// assert_eq!(total.fetch_add(2.0), 1.5);
        /// assert_eq!(total.fetch_mul(2.0), 3.5);
        /// assert_eq!(total.load(), 7.0);
        /// ```
        impl Atomic<$float> {
            impl_float_fetch_op!($float, fetch_add, fetch_add_with, +, "adds `value`");
            impl_float_fetch_op!($float, fetch_sub, fetch_sub_with, -, "subtracts `value`");
            impl_float_fetch_op!($float, fetch_mul, fetch_mul_with, *, "multiplies by `value`");
            impl_float_fetch_op!($float, fetch_div, fetch_div_with, /, "divides by `value`");
        }
    };
}

#[cfg(target_has_atomic = "32")]
impl_atomic_float!(f32);
#[cfg(target_has_atomic = "64")]
impl_atomic_float!(f64);
