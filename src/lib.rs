/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # prism3-rust-lockfree
//!
//! Lock-free fixed-width atomic primitives with compile-time memory-order
//! tags.
//!
//! This crate provides a single generic atomic type, [`Atomic<T>`], that
//! stores any padding-free `Copy` value of 1, 2, 4, 8 or 16 bytes and
//! operates on it through the hardware atomic of the same width. Memory
//! orders are zero-sized tag types, so the ordering of every operation is
//! fixed at compile time and invalid orderings do not compile.
//!
//! ## Design Goals
//!
//! - **Lock-free or nothing**: every accepted type is backed by a native
//!   atomic instruction; unsupported widths are rejected at compile time
//! - **Compile-time ordering**: `load_with(Release)` is a type error, not a
//!   runtime panic
//! - **Generic values**: user structs ride on fixed-width words through a
//!   byte-copy punning layer
//! - **Zero-cost**: all dispatch is resolved by monomorphization
//!
//! ## Features
//!
//! - Generic atomic cell: `Atomic<T>`
//! - Integer operations: `fetch_add`, `add_fetch`, `fetch_and`, ... for all
//!   primitive integers up to 128 bits
//! - Pointer arithmetic scaled by the pointee size: `AtomicPtr<P>`
//! - Spinlock building block: `AtomicFlag`
//! - Fences: `thread_fence`, `signal_fence`, `compiler_barrier`
//!
//! ## Example
//!
//! ```rust
//! use prism3_lockfree::{Atomic, Relaxed};
//! use std::sync::Arc;
//! use std::thread;
//!
//! // Basic usage
//! let counter = Atomic::<i32>::new(0);
//! counter.fetch_add_with(5, Relaxed);
//! assert_eq!(counter.load_with(Relaxed), 5);
//!
//! // Concurrent usage
//! let counter = Arc::new(Atomic::<u64>::new(0));
//! let mut handles = vec![];
//!
//! for _ in 0..10 {
//!     let counter = counter.clone();
//!     let handle = thread::spawn(move || {
//!         for _ in 0..100 {
//!             counter.fetch_add_with(1, Relaxed);
//!         }
//!     });
//!     handles.push(handle);
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(counter.load(), 1000);
//! ```
//!
//! ## Author
//!
//! Haixing Hu

#![deny(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod atomic;

#[doc(hidden)]
pub use bytemuck;

// Re-export the public surface of the atomic layer
pub use atomic::{
    compiler_barrier,
    cpu_pause,
    signal_fence,
    thread_fence,
    AcqRel,
    Acquire,
    Atomic,
    AtomicBool,
    AtomicChar,
    AtomicError,
    AtomicF32,
    AtomicF64,
    AtomicFlag,
    AtomicI16,
    AtomicI32,
    AtomicI64,
    AtomicI8,
    AtomicIsize,
    AtomicPtr,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicUsize,
    AtomicValue,
    AtomicWord,
    Capabilities,
    FailureOrder,
    FenceOrder,
    LoadOrder,
    MemoryOrder,
    ReadDepends,
    Relaxed,
    Release,
    RmwOrder,
    SeqCst,
    StoreOrder,
};

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
pub use atomic::{
    AtomicI128,
    AtomicU128,
};
