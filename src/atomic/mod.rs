/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Types
//!
//! Provides the lock-free atomic cell [`Atomic<T>`] and the layers beneath
//! it, leaves first:
//!
//! - [`order`]: zero-sized memory order tags and the traits that decide, at
//!   compile time, which orders each operation accepts;
//! - [`pun`]: bit-level conversions between values and fixed-width words;
//! - the primitive layers: the compiler builtins, and hand-written
//!   instruction sequences for x86/x86_64 and ARM/AArch64;
//! - [`word`]: the per-width selection of a primitive layer;
//! - [`Atomic<T>`] and its per-category operations, and [`AtomicFlag`].
//!
//! # Features
//!
//! - Every operation compiles to the hardware atomic of the value's width;
//!   widths the target cannot do lock-free are rejected at compile time
//! - Default `SeqCst` forms and explicit-order `_with` forms
//! - User types via [`atomic_value!`](crate::atomic_value)
//!
//! # Author
//!
//! Haixing Hu

#[macro_use]
mod atomic_integer_macro;
mod atomic_value_macro;

mod arch;
mod atomic_bool;
mod atomic_cell;
mod atomic_flag;
mod atomic_float;
mod atomic_integer;
#[cfg(target_has_atomic = "ptr")]
mod atomic_pointer;
pub mod capability;
mod compiler;
mod error;
mod fence;
pub mod order;
pub mod pun;
mod traits;
pub mod word;

pub use atomic_cell::Atomic;
pub use atomic_flag::AtomicFlag;
pub use capability::Capabilities;
pub use error::AtomicError;
pub use fence::{
    compiler_barrier,
    cpu_pause,
    signal_fence,
    thread_fence,
};
pub use order::{
    AcqRel,
    Acquire,
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
pub use traits::{
    AtomicValue,
    PointerWord,
};
pub use word::AtomicWord;

/// Atomic `bool`.
pub type AtomicBool = Atomic<bool>;
/// Atomic `char`.
pub type AtomicChar = Atomic<char>;
/// Atomic `i8`.
pub type AtomicI8 = Atomic<i8>;
/// Atomic `u8`.
pub type AtomicU8 = Atomic<u8>;
/// Atomic `i16`.
pub type AtomicI16 = Atomic<i16>;
/// Atomic `u16`.
pub type AtomicU16 = Atomic<u16>;
/// Atomic `i32`.
pub type AtomicI32 = Atomic<i32>;
/// Atomic `u32`.
pub type AtomicU32 = Atomic<u32>;
/// Atomic `i64`.
pub type AtomicI64 = Atomic<i64>;
/// Atomic `u64`.
pub type AtomicU64 = Atomic<u64>;
/// Atomic `i128`.
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
pub type AtomicI128 = Atomic<i128>;
/// Atomic `u128`.
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
pub type AtomicU128 = Atomic<u128>;
/// Atomic `isize`.
pub type AtomicIsize = Atomic<isize>;
/// Atomic `usize`.
pub type AtomicUsize = Atomic<usize>;
/// Atomic `f32`.
pub type AtomicF32 = Atomic<f32>;
/// Atomic `f64`.
pub type AtomicF64 = Atomic<f64>;
/// Atomic raw pointer.
pub type AtomicPtr<P> = Atomic<*mut P>;
