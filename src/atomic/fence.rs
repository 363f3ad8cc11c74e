/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Fences
//!
//! Standalone ordering primitives.
//!
//! A thread fence orders memory operations between threads and follows the
//! same barrier convention as the atomic loads and stores of this crate. A
//! signal fence only restrains the compiler, for ordering against a signal
//! handler running on the same thread.
//!
//! # Author
//!
//! Haixing Hu

use std::sync::atomic::compiler_fence;
use std::sync::atomic::Ordering;

use crate::atomic::arch;
use crate::atomic::order::FenceOrder;

/// Issues a thread fence with the given order.
///
/// A `Relaxed` fence has no effect.
///
/// # Parameters
///
/// * `order` - The fence order tag.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::{thread_fence, Atomic, Acquire, Relaxed, Release};
///
/// let data = Atomic::<u32>::new(0);
/// let ready = Atomic::<bool>::new(false);
///
/// data.store_with(42, Relaxed);
/// thread_fence(Release);
/// ready.store_with(true, Relaxed);
///
/// if ready.load_with(Relaxed) {
///     thread_fence(Acquire);
///     assert_eq!(data.load_with(Relaxed), 42);
/// }
/// ```
#[inline(always)]
pub fn thread_fence<O: FenceOrder>(_order: O) {
    arch::thread_fence::<O>();
}

/// Issues a compiler-only fence with the given order.
///
/// No hardware barrier is emitted. A `Relaxed` fence has no effect.
#[inline(always)]
pub fn signal_fence<O: FenceOrder>(_order: O) {
    if O::ACQUIRES || O::RELEASES {
        compiler_fence(O::ORDERING);
    }
}

/// Prevents the compiler from moving memory accesses across this point in
/// either direction.
#[inline(always)]
pub fn compiler_barrier() {
    compiler_fence(Ordering::SeqCst);
}

/// Hints the CPU that the caller is busy-waiting.
///
/// For use in spin loops built on top of the atomics, e.g. while waiting for
/// an [`AtomicFlag`](crate::atomic::AtomicFlag) to clear.
#[inline(always)]
pub fn cpu_pause() {
    std::hint::spin_loop();
}
