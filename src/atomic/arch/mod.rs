/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Architecture Primitives
//!
//! Hand-written instruction sequences for the architectures where the
//! compiler builtins are missing or follow a different barrier convention:
//!
//! - `x86` / `x86_64`: full barrier via a locked no-op, and 128-bit atomics
//!   on `cmpxchg16b` (x86_64 only);
//! - `arm` (ARMv7) / `aarch64`: trailing-sync loads and stores, barriers
//!   around read-modify-writes and 128-bit atomics on `ldxp`/`stxp`
//!   (aarch64 only).
//!
//! Other targets use the compiler builtins exclusively.
//!
//! # Author
//!
//! Haixing Hu

use cfg_if::cfg_if;

#[allow(unused_imports)]
use crate::atomic::order::FenceOrder;

/// The architecture primitive layer.
#[allow(dead_code)]
pub(crate) struct Arch;

cfg_if! {
    if #[cfg(any(target_arch = "x86", target_arch = "x86_64"))] {
        mod x86;

        pub(crate) use x86::thread_fence;
    } else if #[cfg(any(
        target_arch = "aarch64",
        all(target_arch = "arm", target_feature = "v7")
    ))] {
        mod arm;

        pub(crate) use arm::thread_fence;
    } else {
        use std::sync::atomic::fence;

        /// Hardware fence through the compiler builtins.
        #[inline(always)]
        pub(crate) fn thread_fence<O: FenceOrder>() {
            if O::ORDERING != std::sync::atomic::Ordering::Relaxed {
                fence(O::ORDERING);
            }
        }
    }
}
