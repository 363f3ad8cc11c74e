/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # x86 / x86_64 Primitives
//!
//! x86 is TSO: plain loads already have acquire semantics and plain stores
//! release semantics, so acquire and release only need a compiler barrier.
//! Sequential consistency needs a full barrier, for which a locked no-op on
//! the stack is used instead of `mfence`.
//!
//! x86_64 has no 128-bit load or store with atomicity guarantees, so every
//! 128-bit operation is built on `lock cmpxchg16b`. The instruction is not
//! part of the x86_64 baseline, so the 128-bit word only exists when the
//! build enables it (`-C target-feature=+cmpxchg16b`, or a `target-cpu`
//! that has it):
//!
//! - load is a compare-exchange whose expected and desired values are equal;
//! - store and exchange retry the compare-exchange until it succeeds;
//! - fetch-and-op computes the new value and retries the same way.
//!
//! Locked instructions are full barriers, so the 128-bit path ignores the
//! requested order beyond acting as a compiler barrier.
//!
//! # Author
//!
//! Haixing Hu

use std::arch::asm;
use std::sync::atomic::compiler_fence;
use std::sync::atomic::Ordering;

use crate::atomic::order::FenceOrder;

/// Full hardware barrier.
#[inline(always)]
pub(crate) fn full_barrier() {
    // SAFETY: or-ing zero into the top of the stack leaves it unchanged; the
    // lock prefix makes it a full barrier.
    #[cfg(target_arch = "x86_64")]
    unsafe {
        asm!("lock or dword ptr [rsp], 0", options(nostack));
    }
    // SAFETY: see above.
    #[cfg(target_arch = "x86")]
    unsafe {
        asm!("lock or dword ptr [esp], 0", options(nostack));
    }
}

/// Thread fence: compiler barrier for acquire/release, full barrier for
/// sequential consistency.
#[inline(always)]
pub(crate) fn thread_fence<O: FenceOrder>() {
    if O::SEQ_CST {
        full_barrier();
    } else if O::ACQUIRES || O::RELEASES {
        compiler_fence(Ordering::SeqCst);
    }
}

#[cfg(all(target_arch = "x86_64", target_feature = "cmpxchg16b"))]
mod wide {
    use std::arch::asm;

    use super::super::Arch;
    use crate::atomic::order::FailureOrder;
    use crate::atomic::order::LoadOrder;
    use crate::atomic::order::RmwOrder;
    use crate::atomic::order::StoreOrder;
    use crate::atomic::pun::negate;
    use crate::atomic::word::LoadStore;
    use crate::atomic::word::ReadModifyWrite;

    /// `lock cmpxchg16b`: stores `new` at `dst` if it holds `old`, and
    /// returns the value observed at `dst`.
    ///
    /// # Safety
    ///
    /// `dst` must be valid for reads and writes and 16-byte aligned. The
    /// module only compiles with `cmpxchg16b` enabled for the whole build.
    #[inline]
    unsafe fn cmpxchg16b(dst: *mut u128, old: u128, new: u128) -> u128 {
        debug_assert!(dst as usize % 16 == 0);
        let previous_lo: u64;
        let previous_hi: u64;
        // SAFETY: the caller guarantees `dst` is valid and aligned. `rbx` is
        // reserved by the compiler, so the low half of `new` is swapped into
        // it for the instruction and the original value restored after.
        unsafe {
            asm!(
                "xchg {rbx_tmp}, rbx",
                "lock cmpxchg16b xmmword ptr [{dst}]",
                "mov rbx, {rbx_tmp}",
                dst = in(reg) dst,
                rbx_tmp = inout(reg) new as u64 => _,
                in("rcx") (new >> 64) as u64,
                inout("rax") old as u64 => previous_lo,
                inout("rdx") (old >> 64) as u64 => previous_hi,
                options(nostack),
            );
        }
        (u128::from(previous_hi) << 64) | u128::from(previous_lo)
    }

    /// Retries `cmpxchg16b` with `update(current)` until it succeeds, and
    /// returns the value it replaced.
    #[inline]
    unsafe fn update<F: FnMut(u128) -> u128>(dst: *mut u128, mut update: F) -> u128 {
        // SAFETY: forwarded caller contract.
        let mut current = unsafe { cmpxchg16b(dst, 0, 0) };
        loop {
            // SAFETY: forwarded caller contract.
            let previous = unsafe { cmpxchg16b(dst, current, update(current)) };
            if previous == current {
                return previous;
            }
            current = previous;
        }
    }

    impl LoadStore<u128> for Arch {
        #[inline]
        unsafe fn load<O: LoadOrder>(src: *mut u128) -> u128 {
            // A matching compare writes back the value it read.
            // SAFETY: forwarded caller contract.
            unsafe { cmpxchg16b(src, 0, 0) }
        }

        #[inline]
        unsafe fn store<O: StoreOrder>(dst: *mut u128, value: u128) {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |_| value) };
        }
    }

    impl ReadModifyWrite<u128> for Arch {
        #[inline]
        unsafe fn exchange<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |_| value) }
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
            // SAFETY: forwarded caller contract.
            let previous = unsafe { cmpxchg16b(dst, current, new) };
            if previous == current {
                Ok(previous)
            } else {
                Err(previous)
            }
        }

        #[inline]
        unsafe fn fetch_add<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |current| current.wrapping_add(value)) }
        }

        #[inline]
        unsafe fn fetch_sub<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { Self::fetch_add::<O>(dst, negate(value)) }
        }

        #[inline]
        unsafe fn fetch_and<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |current| current & value) }
        }

        #[inline]
        unsafe fn fetch_or<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |current| current | value) }
        }

        #[inline]
        unsafe fn fetch_xor<O: RmwOrder>(dst: *mut u128, value: u128) -> u128 {
            // SAFETY: forwarded caller contract.
            unsafe { update(dst, |current| current ^ value) }
        }
    }
}
