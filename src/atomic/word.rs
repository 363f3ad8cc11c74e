/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Fixed-Width Words
//!
//! The dispatch layer between typed atomic operations and the primitive
//! layers.
//!
//! A word is one of `u8`, `u16`, `u32`, `u64` or `u128`. For every width the
//! current target supports, exactly one `impl_atomic_word!` expansion names
//! where its load/store primitives come from and where its read-modify-write
//! primitives come from:
//!
//! - `Compiler`: the compiler's portable builtins (`core::sync::atomic`);
//! - `Arch`: hand-written instruction sequences for the current
//!   architecture, used when the compiler has no lowering (128-bit) or its
//!   lowering differs from the barrier convention used here (ARM loads and
//!   stores).
//!
//! A width neither source provides has no `AtomicWord` implementation, so
//! using it fails to compile.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt::Debug;

use bytemuck::Pod;
use cfg_if::cfg_if;

#[allow(unused_imports)]
use crate::atomic::arch::Arch;
#[allow(unused_imports)]
use crate::atomic::compiler::Compiler;
use crate::atomic::order::FailureOrder;
use crate::atomic::order::LoadOrder;
use crate::atomic::order::Relaxed;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::StoreOrder;

mod sealed {
    pub trait Sealed {}
}

/// Load and store primitives of one width, provided by a primitive layer.
pub(crate) trait LoadStore<W> {
    /// # Safety
    ///
    /// `src` must be valid for reads and writes and aligned to the size of
    /// `W`, and only accessed atomically while shared.
    unsafe fn load<O: LoadOrder>(src: *mut W) -> W;

    /// # Safety
    ///
    /// Same as [`LoadStore::load`].
    unsafe fn store<O: StoreOrder>(dst: *mut W, value: W);
}

/// Read-modify-write primitives of one width, provided by a primitive layer.
///
/// All `fetch_*` primitives return the value observed before the operation.
pub(crate) trait ReadModifyWrite<W> {
    unsafe fn exchange<O: RmwOrder>(dst: *mut W, value: W) -> W;

    unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
        dst: *mut W,
        current: W,
        new: W,
    ) -> Result<W, W>;

    unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
        dst: *mut W,
        current: W,
        new: W,
    ) -> Result<W, W>;

    unsafe fn fetch_add<O: RmwOrder>(dst: *mut W, value: W) -> W;

    unsafe fn fetch_sub<O: RmwOrder>(dst: *mut W, value: W) -> W;

    unsafe fn fetch_and<O: RmwOrder>(dst: *mut W, value: W) -> W;

    unsafe fn fetch_or<O: RmwOrder>(dst: *mut W, value: W) -> W;

    unsafe fn fetch_xor<O: RmwOrder>(dst: *mut W, value: W) -> W;
}

macro_rules! define_align {
    ($(#[$meta:meta])* $name:ident, $bytes:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        #[repr(align($bytes))]
        pub struct $name;
    };
}

define_align!(
    /// Zero-sized alignment marker for 1-byte words.
    Align1,
    1
);
define_align!(
    /// Zero-sized alignment marker for 2-byte words.
    Align2,
    2
);
define_align!(
    /// Zero-sized alignment marker for 4-byte words.
    Align4,
    4
);
define_align!(
    /// Zero-sized alignment marker for 8-byte words.
    Align8,
    8
);
define_align!(
    /// Zero-sized alignment marker for 16-byte words.
    Align16,
    16
);

/// A fixed-width unsigned integer the current target can operate on
/// atomically without locks.
///
/// This trait is sealed. It is implemented for `u8`, `u16`, `u32`, `u64` and
/// `u128` as far as the target supports them, and it is the operand type of
/// every primitive. Values of other types reach it through
/// [`AtomicValue`](crate::atomic::AtomicValue).
///
/// # Safety of the primitives
///
/// Every primitive takes a raw pointer that must be valid for reads and
/// writes, aligned to the size of the word, and accessed only through these
/// primitives while it is shared between threads.
///
/// # Author
///
/// Haixing Hu
#[diagnostic::on_unimplemented(
    message = "atomic operations on `{Self}` are not implemented for this target",
    label = "neither the compiler builtins nor the architecture layer provide this width",
    note = "lock-free atomics are only available for the widths listed in `prism3_lockfree::atomic::capability`"
)]
pub trait AtomicWord: sealed::Sealed + Pod + Eq + Debug + Send + Sync + 'static {
    /// Zero-sized marker whose alignment equals the size of the word.
    type Align: Copy + Debug + Send + Sync + 'static;

    /// Width of the word in bits.
    const BITS: u32;

    /// The word with value one.
    const ONE: Self;

    /// Wrapping addition.
    fn wrapping_add(self, rhs: Self) -> Self;

    /// Wrapping subtraction.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Wrapping (two's-complement) negation.
    fn wrapping_neg(self) -> Self;

    /// Bitwise and.
    fn bit_and(self, rhs: Self) -> Self;

    /// Bitwise or.
    fn bit_or(self, rhs: Self) -> Self;

    /// Bitwise exclusive or.
    fn bit_xor(self, rhs: Self) -> Self;

    /// Atomically loads the word at `src`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn load<O: LoadOrder>(src: *mut Self) -> Self;

    /// Atomically stores `value` at `dst`.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn store<O: StoreOrder>(dst: *mut Self, value: Self);

    /// Atomically replaces the word at `dst`, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn exchange<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;

    /// Replaces the word at `dst` with `new` if it equals `current`.
    ///
    /// May fail spuriously. Returns `Ok(previous)` on success and
    /// `Err(observed)` on failure.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
        dst: *mut Self,
        current: Self,
        new: Self,
    ) -> Result<Self, Self>;

    /// Replaces the word at `dst` with `new` if it equals `current`.
    ///
    /// Never fails spuriously. Returns `Ok(previous)` on success and
    /// `Err(observed)` on failure.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
        dst: *mut Self,
        current: Self,
        new: Self,
    ) -> Result<Self, Self>;

    /// Atomic wrapping add, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn fetch_add<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;

    /// Atomic wrapping subtract, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn fetch_sub<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;

    /// Atomic bitwise and, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn fetch_and<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;

    /// Atomic bitwise or, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn fetch_or<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;

    /// Atomic bitwise exclusive or, returning the previous word.
    ///
    /// # Safety
    ///
    /// See the trait documentation.
    unsafe fn fetch_xor<O: RmwOrder>(dst: *mut Self, value: Self) -> Self;
}

/// Implements `AtomicWord` for a width, selecting the source of its
/// load/store primitives and of its read-modify-write primitives.
///
/// # Parameters
///
/// * `$word` - The word type (e.g., `u32`)
/// * `$align` - The alignment marker whose alignment equals the word size
/// * `$load_store` - The layer providing `LoadStore<$word>`
/// * `$rmw` - The layer providing `ReadModifyWrite<$word>`
macro_rules! impl_atomic_word {
    ($word:ty, $align:ty, $load_store:ty, $rmw:ty) => {
        impl sealed::Sealed for $word {}

        impl AtomicWord for $word {
            type Align = $align;

            const BITS: u32 = <$word>::BITS;
            const ONE: Self = 1;

            #[inline(always)]
            fn wrapping_add(self, rhs: Self) -> Self {
                <$word>::wrapping_add(self, rhs)
            }

            #[inline(always)]
            fn wrapping_sub(self, rhs: Self) -> Self {
                <$word>::wrapping_sub(self, rhs)
            }

            #[inline(always)]
            fn wrapping_neg(self) -> Self {
                <$word>::wrapping_neg(self)
            }

            #[inline(always)]
            fn bit_and(self, rhs: Self) -> Self {
                self & rhs
            }

            #[inline(always)]
            fn bit_or(self, rhs: Self) -> Self {
                self | rhs
            }

            #[inline(always)]
            fn bit_xor(self, rhs: Self) -> Self {
                self ^ rhs
            }

            #[inline(always)]
            unsafe fn load<O: LoadOrder>(src: *mut Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$load_store as LoadStore<$word>>::load::<O>(src) }
            }

            #[inline(always)]
            unsafe fn store<O: StoreOrder>(dst: *mut Self, value: Self) {
                // SAFETY: forwarded caller contract.
                unsafe { <$load_store as LoadStore<$word>>::store::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn exchange<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::exchange::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut Self,
                current: Self,
                new: Self,
            ) -> Result<Self, Self> {
                // SAFETY: forwarded caller contract.
                unsafe {
                    <$rmw as ReadModifyWrite<$word>>::compare_exchange_weak::<S, F>(
                        dst, current, new,
                    )
                }
            }

            #[inline(always)]
            unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut Self,
                current: Self,
                new: Self,
            ) -> Result<Self, Self> {
                // SAFETY: forwarded caller contract.
                unsafe {
                    <$rmw as ReadModifyWrite<$word>>::compare_exchange_strong::<S, F>(
                        dst, current, new,
                    )
                }
            }

            #[inline(always)]
            unsafe fn fetch_add<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::fetch_add::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn fetch_sub<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::fetch_sub::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn fetch_and<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::fetch_and::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn fetch_or<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::fetch_or::<O>(dst, value) }
            }

            #[inline(always)]
            unsafe fn fetch_xor<O: RmwOrder>(dst: *mut Self, value: Self) -> Self {
                // SAFETY: forwarded caller contract.
                unsafe { <$rmw as ReadModifyWrite<$word>>::fetch_xor::<O>(dst, value) }
            }
        }
    };
}

cfg_if! {
    if #[cfg(target_arch = "aarch64")] {
        impl_atomic_word!(u8, Align1, Arch, Arch);
        impl_atomic_word!(u16, Align2, Arch, Arch);
        impl_atomic_word!(u32, Align4, Arch, Arch);
        impl_atomic_word!(u64, Align8, Arch, Arch);
        impl_atomic_word!(u128, Align16, Arch, Arch);
    } else if #[cfg(all(target_arch = "arm", target_feature = "v7"))] {
        impl_atomic_word!(u8, Align1, Arch, Compiler);
        impl_atomic_word!(u16, Align2, Arch, Compiler);
        impl_atomic_word!(u32, Align4, Arch, Compiler);
        #[cfg(target_has_atomic = "64")]
        impl_atomic_word!(u64, Align8, Compiler, Compiler);
    } else if #[cfg(target_arch = "x86_64")] {
        impl_atomic_word!(u8, Align1, Compiler, Compiler);
        impl_atomic_word!(u16, Align2, Compiler, Compiler);
        impl_atomic_word!(u32, Align4, Compiler, Compiler);
        impl_atomic_word!(u64, Align8, Compiler, Compiler);
        // `cmpxchg16b` is not in the x86_64 baseline; without it the target
        // has no lock-free 128-bit word.
        #[cfg(target_feature = "cmpxchg16b")]
        impl_atomic_word!(u128, Align16, Arch, Arch);
    } else {
        #[cfg(target_has_atomic = "8")]
        impl_atomic_word!(u8, Align1, Compiler, Compiler);
        #[cfg(target_has_atomic = "16")]
        impl_atomic_word!(u16, Align2, Compiler, Compiler);
        #[cfg(target_has_atomic = "32")]
        impl_atomic_word!(u32, Align4, Compiler, Compiler);
        #[cfg(target_has_atomic = "64")]
        impl_atomic_word!(u64, Align8, Compiler, Compiler);
    }
}

/// Applies `update` to the word at `dst` until a weak compare-exchange
/// installs the result, and returns the word it replaced.
///
/// Each failed attempt observes a newer word, so the loop only repeats while
/// other writers keep changing the cell between the read and the exchange.
///
/// # Safety
///
/// See [`AtomicWord`].
#[inline]
pub(crate) unsafe fn cas_loop<W, O, F>(dst: *mut W, mut update: F) -> W
where
    W: AtomicWord,
    O: RmwOrder,
    F: FnMut(W) -> W,
{
    // SAFETY: forwarded caller contract.
    let mut current = unsafe { W::load::<Relaxed>(dst) };
    loop {
        let new = update(current);
        // SAFETY: forwarded caller contract.
        match unsafe { W::compare_exchange_weak::<O, O::Failure>(dst, current, new) } {
            Ok(previous) => return previous,
            Err(actual) => current = actual,
        }
    }
}
