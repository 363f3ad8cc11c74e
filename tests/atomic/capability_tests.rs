/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_lockfree::atomic::capability::{
    is_lock_free_size,
    Capabilities,
    HAS_128BIT,
    HAS_16BIT,
    HAS_32BIT,
    HAS_64BIT,
    HAS_8BIT,
    READ_DEPENDS_ACQUIRE,
};
use prism3_lockfree::{
    Atomic,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
};

#[test]
fn test_is_lock_free_is_idempotent_and_matches_matrix() {
    let a8 = AtomicU8::new(0);
    let a16 = AtomicU16::new(0);
    let a32 = AtomicU32::new(0);
    let a64 = AtomicU64::new(0);

    for _ in 0..3 {
        assert_eq!(a8.is_lock_free(), HAS_8BIT);
        assert_eq!(a16.is_lock_free(), HAS_16BIT);
        assert_eq!(a32.is_lock_free(), HAS_32BIT);
        assert_eq!(a64.is_lock_free(), HAS_64BIT);
    }
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
#[test]
fn test_128bit_is_lock_free() {
    assert!(HAS_128BIT);
    assert!(Atomic::<u128>::new(0).is_lock_free());
    assert_eq!(std::mem::align_of::<Atomic<u128>>(), 16);
}

// Without `cmpxchg16b` in the build, x86_64 must not claim a 128-bit word.
#[cfg(all(target_arch = "x86_64", not(target_feature = "cmpxchg16b")))]
#[test]
fn test_128bit_requires_cmpxchg16b_in_build() {
    assert!(!HAS_128BIT);
    assert!(!is_lock_free_size(16));
    assert!(!Capabilities::detect().has_128bit);
}

#[test]
fn test_lock_free_sizes() {
    assert_eq!(is_lock_free_size(1), HAS_8BIT);
    assert_eq!(is_lock_free_size(16), HAS_128BIT);
    assert!(!is_lock_free_size(0));
    assert!(!is_lock_free_size(3));
    assert!(!is_lock_free_size(32));
}

#[test]
fn test_compiled_matches_constants() {
    let caps = Capabilities::compiled();
    assert_eq!(caps.has_8bit, HAS_8BIT);
    assert_eq!(caps.has_64bit, HAS_64BIT);
    assert_eq!(caps.has_128bit, HAS_128BIT);
    assert_eq!(caps.read_depends_acquire, READ_DEPENDS_ACQUIRE);
    assert_eq!(Capabilities::default(), caps);
    assert!(caps.supports_size(4));
}

#[test]
fn test_detect_is_stable() {
    let first = Capabilities::detect();
    let second = Capabilities::detect();
    assert_eq!(first, second);
    assert_eq!(first.has_32bit, HAS_32BIT);
    assert!(!first.has_128bit || HAS_128BIT);
}

#[test]
fn test_display() {
    let caps = Capabilities {
        has_8bit: true,
        has_16bit: true,
        has_32bit: true,
        has_64bit: false,
        has_128bit: false,
        read_depends_acquire: false,
    };
    assert_eq!(
        caps.to_string(),
        "lock-free widths: [8, 16, 32], read_depends: relaxed"
    );
}
