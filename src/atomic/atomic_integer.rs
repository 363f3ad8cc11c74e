/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Integers
//!
//! Arithmetic and bitwise operations for atomic cells holding primitive
//! integers.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::atomic_cell::Atomic;
use crate::atomic::order::RmwOrder;
use crate::atomic::order::SeqCst;
use crate::atomic::traits::PointerWord;
use crate::atomic::word::AtomicWord;

#[cfg(target_has_atomic = "8")]
impl_atomic_integer!(i8, u8, "8-bit signed integer");
#[cfg(target_has_atomic = "8")]
impl_atomic_integer!(u8, u8, "8-bit unsigned integer");
#[cfg(target_has_atomic = "16")]
impl_atomic_integer!(i16, u16, "16-bit signed integer");
#[cfg(target_has_atomic = "16")]
impl_atomic_integer!(u16, u16, "16-bit unsigned integer");
#[cfg(target_has_atomic = "32")]
impl_atomic_integer!(i32, u32, "32-bit signed integer");
#[cfg(target_has_atomic = "32")]
impl_atomic_integer!(u32, u32, "32-bit unsigned integer");
#[cfg(target_has_atomic = "64")]
impl_atomic_integer!(i64, u64, "64-bit signed integer");
#[cfg(target_has_atomic = "64")]
impl_atomic_integer!(u64, u64, "64-bit unsigned integer");
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
impl_atomic_integer!(i128, u128, "128-bit signed integer");
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
impl_atomic_integer!(u128, u128, "128-bit unsigned integer");
#[cfg(target_has_atomic = "ptr")]
impl_atomic_integer!(isize, PointerWord, "pointer-sized signed integer");
#[cfg(target_has_atomic = "ptr")]
impl_atomic_integer!(usize, PointerWord, "pointer-sized unsigned integer");
