/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_lockfree::{
    Atomic,
    AtomicI32,
    AtomicI8,
    AtomicU64,
    Relaxed,
    SeqCst,
};

test_atomic_integer!(AtomicI8, i8, test_atomic_i8);
test_atomic_integer!(AtomicU8, u8, test_atomic_u8);
test_atomic_integer!(AtomicI16, i16, test_atomic_i16);
test_atomic_integer!(AtomicU16, u16, test_atomic_u16);
test_atomic_integer!(AtomicI32, i32, test_atomic_i32);
test_atomic_integer!(AtomicU32, u32, test_atomic_u32);
test_atomic_integer!(AtomicI64, i64, test_atomic_i64);
test_atomic_integer!(AtomicU64, u64, test_atomic_u64);
test_atomic_integer!(AtomicIsize, isize, test_atomic_isize);
test_atomic_integer!(AtomicUsize, usize, test_atomic_usize);
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
test_atomic_integer!(AtomicI128, i128, test_atomic_i128);
#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
test_atomic_integer!(AtomicU128, u128, test_atomic_u128);

#[test]
fn test_relaxed_fetch_add_then_load() {
    let counter = AtomicI32::new(0);
    counter.fetch_add_with(5, Relaxed);
    assert_eq!(counter.load_with(Relaxed), 5);
}

#[test]
fn test_compare_exchange_strong_repeat() {
    let a = AtomicU64::new(10);
    let mut expected = 10;
    let ok = a.compare_exchange_strong_with(&mut expected, 20, SeqCst, SeqCst);
    assert!(ok);
    assert_eq!(a.load(), 20);

    let mut expected = 10;
    let ok = a.compare_exchange_strong_with(&mut expected, 20, SeqCst, SeqCst);
    assert!(!ok);
    assert_eq!(expected, 20);
}

#[test]
fn test_signed_negative_values() {
    let atomic = AtomicI8::new(-1);
    assert_eq!(atomic.fetch_add(-1), -1);
    assert_eq!(atomic.load(), -2);
    assert_eq!(atomic.fetch_max(-5), -2);
    assert_eq!(atomic.fetch_min(-100), -2);
    assert_eq!(atomic.load(), -100);
    assert_eq!(atomic.fetch_and(0x0f), -100);
    assert_eq!(atomic.load(), -100i8 & 0x0f);
}

#[test]
fn test_static_initialization() {
    static COUNTER: Atomic<u32> = Atomic::new(7);
    assert_eq!(COUNTER.inc_fetch(), 8);
}

#[test]
fn test_from_ptr_adopts_aligned_memory() {
    let mut raw = 41u32;
    let cell = unsafe { Atomic::from_ptr(&mut raw) }.unwrap();
    assert_eq!(cell.inc_fetch(), 42);
    assert_eq!(raw, 42);
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
#[test]
fn test_u128_full_width_carry() {
    use prism3_lockfree::AtomicU128;

    let atomic = AtomicU128::new(u64::MAX as u128);
    assert_eq!(atomic.add_fetch(1), 1u128 << 64);
    assert_eq!(atomic.fetch_sub(1), 1u128 << 64);
    assert_eq!(atomic.load(), u64::MAX as u128);
    assert_eq!(atomic.exchange(u128::MAX), u64::MAX as u128);
    assert_eq!(atomic.fetch_xor(u128::MAX), u128::MAX);
    assert_eq!(atomic.load(), 0);
}
