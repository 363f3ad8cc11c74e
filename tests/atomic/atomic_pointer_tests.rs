/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_lockfree::{
    AcqRel,
    Atomic,
    AtomicPtr,
    Relaxed,
};
use std::mem::size_of;
use std::sync::Arc;
use std::thread;

// Seven bytes, not a power of two.
#[allow(dead_code)]
#[derive(Clone, Copy)]
#[repr(C, packed)]
struct Odd {
    a: [u8; 3],
    b: u8,
    c: u16,
    d: u8,
}

#[allow(dead_code)]
#[derive(Clone, Copy)]
#[repr(C)]
struct Wide {
    values: [u64; 3],
}

fn assert_scaled_by_three<T>(base: *mut T) {
    let atomic = AtomicPtr::new(base);
    let p0 = atomic.load();
    atomic.fetch_add(3);
    let p1 = atomic.load();
    assert_eq!(p1 as usize - p0 as usize, 3 * size_of::<T>());
}

#[test]
fn test_fetch_add_scales_by_pointee_size() {
    let mut bytes = [0u8; 8];
    let mut words = [0u32; 8];
    let mut odds = [Odd {
        a: [0; 3],
        b: 0,
        c: 0,
        d: 0,
    }; 8];
    let mut wides = [Wide { values: [0; 3] }; 8];

    assert_eq!(size_of::<Odd>(), 7);
    assert_scaled_by_three(bytes.as_mut_ptr());
    assert_scaled_by_three(words.as_mut_ptr());
    assert_scaled_by_three(odds.as_mut_ptr());
    assert_scaled_by_three(wides.as_mut_ptr());
}

#[test]
fn test_pre_and_post_forms() {
    let mut items = [1u64, 2, 3, 4, 5, 6];
    let base = items.as_mut_ptr();
    let cursor = AtomicPtr::new(base);

    assert_eq!(cursor.fetch_add(2), base);
    assert_eq!(cursor.add_fetch(1), base.wrapping_add(3));
    assert_eq!(cursor.fetch_sub(1), base.wrapping_add(3));
    assert_eq!(cursor.sub_fetch(2), base);
    assert_eq!(cursor.fetch_inc(), base);
    assert_eq!(cursor.inc_fetch(), base.wrapping_add(2));
    assert_eq!(cursor.fetch_dec(), base.wrapping_add(2));
    assert_eq!(cursor.dec_fetch(), base);
    assert_eq!(unsafe { *cursor.load() }, 1);
}

#[test]
fn test_negative_offsets() {
    let mut items = [0u16; 10];
    let base = items.as_mut_ptr();
    let cursor = AtomicPtr::new(base.wrapping_add(5));

    assert_eq!(cursor.fetch_add_with(-2, Relaxed), base.wrapping_add(5));
    assert_eq!(cursor.load(), base.wrapping_add(3));
    assert_eq!(cursor.sub_fetch_with(-4, AcqRel), base.wrapping_add(7));
}

#[test]
fn test_pointer_exchange_and_compare_exchange() {
    let mut a = 1i32;
    let mut b = 2i32;
    let pa: *mut i32 = &mut a;
    let pb: *mut i32 = &mut b;

    let atomic = AtomicPtr::new(pa);
    assert_eq!(atomic.exchange(pb), pa);

    let mut expected = pa;
    assert!(!atomic.compare_exchange_strong(&mut expected, std::ptr::null_mut()));
    assert_eq!(expected, pb);
    assert!(atomic.compare_exchange_strong(&mut expected, std::ptr::null_mut()));
    assert!(atomic.load().is_null());
}

// Pointers loaded back from the cell are usable for reads and writes of
// the original allocation, including after arithmetic.
#[test]
fn test_loaded_pointer_accesses_original_allocation() {
    let mut slots = [10u32, 20, 30, 40];
    let cursor = AtomicPtr::new(slots.as_mut_ptr());

    let second = cursor.add_fetch(1);
    // SAFETY: `second` points into `slots`, which outlives the cell.
    unsafe {
        assert_eq!(*second, 20);
        *cursor.load() += 5;
        *cursor.load().add(2) = 99;
    }
    assert_eq!(slots, [10, 25, 30, 99]);
}

#[test]
fn test_const_pointer_cell() {
    let value = 5u8;
    let atomic = Atomic::<*const u8>::new(&value);
    assert_eq!(unsafe { *atomic.load() }, 5);
    assert_eq!(atomic.exchange(std::ptr::null()), &value as *const u8);
}

#[test]
fn test_concurrent_slot_claiming() {
    const SLOTS: usize = 4000;
    const THREADS: usize = 4;

    let buffer: Arc<Vec<u32>> = Arc::new(vec![0; SLOTS]);
    let cursor = Arc::new(AtomicPtr::new(buffer.as_ptr() as *mut u32));
    let mut handles = vec![];

    for _ in 0..THREADS {
        let cursor = cursor.clone();
        let buffer = buffer.clone();
        handles.push(thread::spawn(move || {
            let mut claimed = Vec::with_capacity(SLOTS / THREADS);
            for _ in 0..SLOTS / THREADS {
                let slot = cursor.fetch_add_with(1, Relaxed);
                claimed.push((slot as usize - buffer.as_ptr() as usize) / size_of::<u32>());
            }
            claimed
        }));
    }

    let mut all: Vec<usize> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..SLOTS).collect::<Vec<_>>());
}
