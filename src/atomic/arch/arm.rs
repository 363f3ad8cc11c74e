/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # ARM / AArch64 Primitives
//!
//! Loads and stores follow the trailing-sync convention:
//!
//! | order    | load            | store                  |
//! |----------|-----------------|------------------------|
//! | relaxed  | `ldr`           | `str`                  |
//! | acquire  | `ldr; dmb ish`  |                        |
//! | release  |                 | `dmb ish; str`         |
//! | seq_cst  | `ldr; dmb ish`  | `dmb ish; str; dmb ish`|
//!
//! Every atomic in the process must agree on one convention, which is why
//! these sequences are emitted here rather than left to the compiler.
//!
//! Read-modify-write operations must follow it as well. On ARMv7 the
//! compiler brackets them with full `dmb ish` barriers, which already does.
//! On AArch64 the compiler uses acquire/release exclusives (`ldaxr`/`stlxr`
//! or LSE `casal`/`swpal`), and a release store-exclusive does not order a
//! later plain `ldr`. So a `SeqCst` exchange followed by a `SeqCst` load
//! could be reordered. The AArch64 read-modify-writes here therefore run the
//! compiler's `Relaxed` operation between the same barriers a load and a
//! store would carry: `dmb ish` before when the order releases, `dmb ish`
//! after when it acquires.
//!
//! On AArch64 the 128-bit word is built on an exclusive pair
//! (`ldxp`/`stxp`) compare-exchange. A mismatching compare still writes the
//! observed value back, so a successful store-exclusive proves the pair was
//! read atomically.
//!
//! # Author
//!
//! Haixing Hu

use std::arch::asm;

use super::Arch;
#[cfg(target_arch = "aarch64")]
use crate::atomic::compiler::Compiler;
#[cfg(target_arch = "aarch64")]
use crate::atomic::order::FailureOrder;
use crate::atomic::order::FenceOrder;
use crate::atomic::order::LoadOrder;
#[cfg(target_arch = "aarch64")]
use crate::atomic::order::MemoryOrder;
#[cfg(target_arch = "aarch64")]
use crate::atomic::order::Relaxed;
#[cfg(target_arch = "aarch64")]
use crate::atomic::order::RmwOrder;
use crate::atomic::order::StoreOrder;
use crate::atomic::word::LoadStore;
#[cfg(target_arch = "aarch64")]
use crate::atomic::word::ReadModifyWrite;

/// Full inner-shareable data memory barrier.
#[inline(always)]
pub(crate) fn dmb() {
    // SAFETY: a barrier has no operands and touches no registers.
    unsafe {
        asm!("dmb ish", options(nostack, preserves_flags));
    }
}

/// Thread fence: every non-relaxed fence is a full `dmb ish`.
#[inline(always)]
pub(crate) fn thread_fence<O: FenceOrder>() {
    if O::ACQUIRES || O::RELEASES {
        dmb();
    }
}

/// Wraps `op` in the leading and trailing barriers `O` requires.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn ordered<O: MemoryOrder, R>(op: impl FnOnce() -> R) -> R {
    if O::RELEASES {
        dmb();
    }
    let result = op();
    if O::ACQUIRES {
        dmb();
    }
    result
}

/// Implements trailing-sync loads and stores for a word.
///
/// # Parameters
///
/// * `$word` - The word type
/// * `$load` - The load mnemonic for the width
/// * `$store` - The store mnemonic for the width
/// * `$reg` - The register template modifier (`":w"`, `":x"`, or `""`)
macro_rules! impl_arm_load_store {
    ($word:ty, $load:literal, $store:literal, $reg:literal) => {
        impl LoadStore<$word> for Arch {
            #[inline(always)]
            unsafe fn load<O: LoadOrder>(src: *mut $word) -> $word {
                let value: $word;
                // SAFETY: the caller guarantees `src` is valid and aligned to
                // the word size, so the access is single-copy atomic.
                unsafe {
                    asm!(
                        concat!($load, " {value", $reg, "}, [{src}]"),
                        src = in(reg) src,
                        value = lateout(reg) value,
                        options(nostack, preserves_flags, readonly),
                    );
                }
                if O::ACQUIRES {
                    dmb();
                }
                value
            }

            #[inline(always)]
            unsafe fn store<O: StoreOrder>(dst: *mut $word, value: $word) {
                if O::RELEASES {
                    dmb();
                }
                // SAFETY: see `load`.
                unsafe {
                    asm!(
                        concat!($store, " {value", $reg, "}, [{dst}]"),
                        dst = in(reg) dst,
                        value = in(reg) value,
                        options(nostack, preserves_flags),
                    );
                }
                if O::SEQ_CST {
                    dmb();
                }
            }
        }
    };
}

#[cfg(target_arch = "aarch64")]
impl_arm_load_store!(u8, "ldrb", "strb", ":w");
#[cfg(target_arch = "aarch64")]
impl_arm_load_store!(u16, "ldrh", "strh", ":w");
#[cfg(target_arch = "aarch64")]
impl_arm_load_store!(u32, "ldr", "str", ":w");
#[cfg(target_arch = "aarch64")]
impl_arm_load_store!(u64, "ldr", "str", ":x");

/// Implements read-modify-writes for a word as the compiler's `Relaxed`
/// operation between the barriers of the requested order.
///
/// The failure order of a compare-exchange is never stronger than the
/// success order, so the barriers of the success order cover both outcomes.
#[cfg(target_arch = "aarch64")]
macro_rules! impl_arm_read_modify_write {
    ($word:ty) => {
        impl ReadModifyWrite<$word> for Arch {
            #[inline(always)]
            unsafe fn exchange<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::exchange::<Relaxed>(dst, value)
                })
            }

            #[inline(always)]
            unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut $word,
                current: $word,
                new: $word,
            ) -> Result<$word, $word> {
                // SAFETY: forwarded caller contract.
                ordered::<S, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::compare_exchange_weak::<Relaxed, Relaxed>(
                        dst, current, new,
                    )
                })
            }

            #[inline(always)]
            unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
                dst: *mut $word,
                current: $word,
                new: $word,
            ) -> Result<$word, $word> {
                // SAFETY: forwarded caller contract.
                ordered::<S, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::compare_exchange_strong::<Relaxed, Relaxed>(
                        dst, current, new,
                    )
                })
            }

            #[inline(always)]
            unsafe fn fetch_add<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::fetch_add::<Relaxed>(dst, value)
                })
            }

            #[inline(always)]
            unsafe fn fetch_sub<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::fetch_sub::<Relaxed>(dst, value)
                })
            }

            #[inline(always)]
            unsafe fn fetch_and<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::fetch_and::<Relaxed>(dst, value)
                })
            }

            #[inline(always)]
            unsafe fn fetch_or<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::fetch_or::<Relaxed>(dst, value)
                })
            }

            #[inline(always)]
            unsafe fn fetch_xor<O: RmwOrder>(dst: *mut $word, value: $word) -> $word {
                // SAFETY: forwarded caller contract.
                ordered::<O, _>(|| unsafe {
                    <Compiler as ReadModifyWrite<$word>>::fetch_xor::<Relaxed>(dst, value)
                })
            }
        }
    };
}

#[cfg(target_arch = "aarch64")]
impl_arm_read_modify_write!(u8);
#[cfg(target_arch = "aarch64")]
impl_arm_read_modify_write!(u16);
#[cfg(target_arch = "aarch64")]
impl_arm_read_modify_write!(u32);
#[cfg(target_arch = "aarch64")]
impl_arm_read_modify_write!(u64);

#[cfg(target_arch = "arm")]
impl_arm_load_store!(u8, "ldrb", "strb", "");
#[cfg(target_arch = "arm")]
impl_arm_load_store!(u16, "ldrh", "strh", "");
#[cfg(target_arch = "arm")]
impl_arm_load_store!(u32, "ldr", "str", "");

#[cfg(target_arch = "aarch64")]
mod wide {
    use std::arch::asm;

    use super::dmb;
    use super::ordered;
    use super::Arch;
    use crate::atomic::order::FailureOrder;
    use crate::atomic::order::LoadOrder;
    use crate::atomic::order::MemoryOrder;
    use crate::atomic::order::RmwOrder;
    use crate::atomic::order::StoreOrder;
    use crate::atomic::pun::negate;
    use crate::atomic::word::LoadStore;
    use crate::atomic::word::ReadModifyWrite;

    /// Exclusive-pair compare-exchange without barriers: stores `new` at
    /// `dst` if it holds `old`, and returns the value observed at `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for reads and writes and 16-byte aligned.
    #[inline]
    unsafe fn cmpxchg128(dst: *mut u128, old: u128, new: u128) -> u128 {
        debug_assert!(dst as usize % 16 == 0);
        let previous_lo: u64;
        let previous_hi: u64;
        // SAFETY: the caller guarantees `dst` is valid and aligned. Both
        // branches end in a successful store-exclusive, which proves the pair
        // loaded by `ldxp` was not torn.
        unsafe {
            asm!(
                "2:",
                "ldxp {previous_lo}, {previous_hi}, [{dst}]",
                "cmp {previous_lo}, {old_lo}",
                "ccmp {previous_hi}, {old_hi}, #0, eq",
                "b.ne 3f",
                "stxp {status:w}, {new_lo}, {new_hi}, [{dst}]",
                "cbnz {status:w}, 2b",
                "b 4f",
                "3:",
                "stxp {status:w}, {previous_lo}, {previous_hi}, [{dst}]",
                "cbnz {status:w}, 2b",
                "4:",
                dst = in(reg) dst,
                old_lo = in(reg) old as u64,
                old_hi = in(reg) (old >> 64) as u64,
                new_lo = in(reg) new as u64,
                new_hi = in(reg) (new >> 64) as u64,
                previous_lo = out(reg) previous_lo,
                previous_hi = out(reg) previous_hi,
                status = out(reg) _,
                options(nostack),
            );
        }
        (u128::from(previous_hi) << 64) | u128::from(previous_lo)
    }

    /// Retries `cmpxchg128` with `update(current)` until it succeeds, and
    /// returns the value it replaced.
    #[inline]
    unsafe fn update<O: MemoryOrder, F: FnMut(u128) -> u128>(
        dst: *mut u128,
        mut update: F,
    ) -> u128 {
        ordered::<O, _>(|| {
            // SAFETY: forwarded caller contract.
            let mut current = unsafe { cmpxchg128(dst, 0, 0) };
            loop {
                // SAFETY: forwarded caller contract.
                let previous = unsafe { cmpxchg128(dst, current, update(current)) };
                if previous == current {
                    return previous;
                }
                current = previous;
            }
        })
    }

    impl LoadStore<u128> for Arch {
        #[inline]
        unsafe fn load<O: LoadOrder>(src: *mut u128) -> u128 {
            // SAFETY: forwarded caller contract.
            let value = unsafe { cmpxchg128(src, 0, 0) };
            if O::ACQUIRES {
                dmb();
            }
            value
        }

        #[inline]
        unsafe fn store<O: StoreOrder>(dst: *mut u128, value: u128) {
            if O::RELEASES {
                dmb();
            }
            // SAFETY: forwarded caller contract.
            unsafe { update::<crate::atomic::order::Relaxed, _>(dst, |_| value) };
            if O::SEQ_CST {
                dmb();
            }
        }
    }

    impl ReadModifyWrite<u128> for Arch {
        #[inline]
        unsafe fn exchange<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update::<O, _>(dst, |_| value) }
        }

        #[inline]
        unsafe fn compare_exchange_weak<S: RmwOrder, F: FailureOrder<S>>(
            dst: *mut u128,
            current: u128,
            new: u128,
        ) -> Result<u128, u128> {
            // SAFETY: forwarded caller contract.
            unsafe { Self::compare_exchange_strong::<S, F>(dst, current, new) }
        }

        #[inline]
        unsafe fn compare_exchange_strong<S: RmwOrder, F: FailureOrder<S>>(
            dst: *mut u128,
            current: u128,
            new: u128,
        ) -> Result<u128, u128> {
            // The failure order never acquires more than the success order.
            // SAFETY: forwarded caller contract.
            let previous = ordered::<S, _>(|| unsafe { cmpxchg128(dst, current, new) });
            if previous == current {
                Ok(previous)
            } else {
                Err(previous)
            }
        }

        #[inline]
        unsafe fn fetch_add<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update::<O, _>(dst, |current| current.wrapping_add(value)) }
        }

        #[inline]
        unsafe fn fetch_sub<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { Self::fetch_add::<O>(dst, negate(value)) }
        }

        #[inline]
        unsafe fn fetch_and<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update::<O, _>(dst, |current| current & value) }
        }

        #[inline]
        unsafe fn fetch_or<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update::<O, _>(dst, |current| current | value) }
        }

        #[inline]
        unsafe fn fetch_xor<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update::<O, _>(dst, |current| current ^ value) }
        }
    }
}
