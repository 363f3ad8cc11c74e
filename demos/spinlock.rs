/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Spinlock Example
//!
//! Builds a minimal spinlock on top of `AtomicFlag` and uses it to guard a
//! plain `Vec`.

use prism3_lockfree::{
    cpu_pause,
    Acquire,
    AtomicFlag,
    Relaxed,
    Release,
};
use std::cell::UnsafeCell;
use std::ops::{
    Deref,
    DerefMut,
};
use std::sync::Arc;
use std::thread;

struct SpinLock<T> {
    flag: AtomicFlag,
    value: UnsafeCell<T>,
}

// SAFETY: access to `value` is serialized by `flag`.
unsafe impl<T: Send> Sync for SpinLock<T> {}

struct Guard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> SpinLock<T> {
    fn new(value: T) -> Self {
        Self {
            flag: AtomicFlag::new(),
            value: UnsafeCell::new(value),
        }
    }

    fn lock(&self) -> Guard<'_, T> {
        while self.flag.test_and_set_with(Acquire) {
            // Wait on plain loads to keep the cache line shared.
            while self.flag.test_with(Relaxed) {
                cpu_pause();
            }
        }
        Guard { lock: self }
    }
}

impl<T> Deref for Guard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: the guard holds the flag.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> DerefMut for Guard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: the guard holds the flag.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for Guard<'_, T> {
    fn drop(&mut self) {
        self.lock.flag.clear_with(Release);
    }
}

fn main() {
    println!("=== Spinlock Example ===\n");

    let lock = Arc::new(SpinLock::new(Vec::new()));
    let num_threads = 8;
    let pushes_per_thread = 250;

    let mut handles = vec![];
    for id in 0..num_threads {
        let lock = lock.clone();
        handles.push(thread::spawn(move || {
            for i in 0..pushes_per_thread {
                lock.lock().push(id * pushes_per_thread + i);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let mut values = lock.lock().clone();
    values.sort_unstable();
    let complete = values == (0..num_threads * pushes_per_thread).collect::<Vec<_>>();
    println!("   Collected {} values, complete: {}", values.len(), complete);

    println!("\n=== Example completed ===");
}
