/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Compiler Builtins
//!
//! Primitive layer backed by the compiler's portable atomic builtins, reached
//! through `core::sync::atomic`. This is the preferred source for every width
//! the target reports through `target_has_atomic`.
//!
//! The order tag is turned into a constant `Ordering` argument, which the
//! compiler folds away.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::order::FailureOrder;
use crate::atomic::order::LoadOrder;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::StoreOrder;
use crate::atomic::word::LoadStore;
use crate::atomic::word::ReadModifyWrite;

/// The compiler builtin primitive layer.
pub(crate) struct Compiler;

macro_rules! impl_compiler_word {
    ($word:ty, $atomic:ty) => {
        impl LoadStore<$word> for Compiler {
            #[inline(always)]
            unsafe fn load<O: LoadOrder>(src: *mut $word) -> $word {
                // SAFETY: the caller guarantees `src` is valid, aligned to the
                // word size and only accessed atomically.
                let atomic = unsafe { <$atomic>::from_ptr(src) };
                atomic.load(O::ORDERING)
            }

            #[inline(always)]
            unsafe fn store<O: StoreOrder>(dst: *mut $word, value: $word) {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.store(value, O::ORDERING);
            }
        }

        impl ReadModifyWrite<$word> for Compiler {
            #[inline(always)]
            unsafe fn exchange<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.swap(value, O::ORDERING)
            }

            #[inline(always)]
            unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut $word,
                current: $word,
                new: $word,
            ) -> Result<$word, $word> {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.compare_exchange_weak(current, new, S::ORDERING, F::ORDERING)
            }

            #[inline(always)]
            unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut $word,
                current: $word,
                new: $word,
            ) -> Result<$word, $word> {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.compare_exchange(current, new, S::ORDERING, F::ORDERING)
            }

            #[inline(always)]
            unsafe fn fetch_add<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.fetch_add(value, O::ORDERING)
            }

            #[inline(always)]
            unsafe fn fetch_sub<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.fetch_sub(value, O::ORDERING)
            }

            #[inline(always)]
            unsafe fn fetch_and<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.fetch_and(value, O::ORDERING)
            }

            #[inline(always)]
            unsafe fn fetch_or<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.fetch_or(value, O::ORDERING)
            }

            #[inline(always)]
            unsafe fn fetch_xor<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: see `load`.
                let atomic = unsafe { <$atomic>::from_ptr(dst) };
                atomic.fetch_xor(value, O::ORDERING)
            }
        }
    };
}

#[cfg(target_has_atomic = "8")]
impl_compiler_word!(u8, std::sync::atomic::AtomicU8);
#[cfg(target_has_atomic = "16")]
impl_compiler_word!(u16, std::sync::atomic::AtomicU16);
#[cfg(target_has_atomic = "32")]
impl_compiler_word!(u32, std::sync::atomic::AtomicU32);
#[cfg(target_has_atomic = "64")]
impl_compiler_word!(u64, std::sync::atomic::AtomicU64);
