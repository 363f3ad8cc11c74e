/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Atomic Counter Example
//!
//! Demonstrates using atomic integers as thread-safe counters.

use prism3_lockfree::{
    AcqRel,
    Acquire,
    AtomicI32,
    AtomicU64,
    Relaxed,
};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== Atomic Counter Example ===\n");

    // Example 1: Basic counter operations
    println!("1. Basic Counter Operations:");
    let counter = AtomicI32::new(0);
    println!("   Initial value: {}", counter.load());

    counter.inc_fetch();
    println!("   After increment: {}", counter.load());

    counter.add_fetch(5);
    println!("   After adding 5: {}", counter.load());

    counter.dec_fetch();
    println!("   After decrement: {}", counter.load());

    // Example 2: Multi-threaded counter with relaxed increments
    println!("\n2. Multi-threaded Counter:");
    let counter = Arc::new(AtomicU64::new(0));
    let num_threads = 10;
    let increments_per_thread = 1000;

    let mut handles = vec![];
    for i in 0..num_threads {
        let counter = counter.clone();
        let handle = thread::spawn(move || {
            for _ in 0..increments_per_thread {
                counter.fetch_add_with(1, Relaxed);
            }
            println!("   Thread {} completed", i);
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    println!(
        "   Final count: {} (expected: {})",
        counter.load(),
        num_threads * increments_per_thread
    );

    // Example 3: Compare-and-exchange
    println!("\n3. Compare-and-Exchange:");
    let counter = AtomicI32::new(10);
    println!("   Initial value: {}", counter.load());

    let mut expected = 10;
    if counter.compare_exchange_strong_with(&mut expected, 20, AcqRel, Acquire) {
        println!("   CAS succeeded: value is now {}", counter.load());
    }

    let mut expected = 10;
    if !counter.compare_exchange_strong(&mut expected, 30) {
        println!("   CAS failed: actual value was {}", expected);
    }

    // Example 4: Functional updates
    println!("\n4. Functional Updates:");
    let counter = AtomicI32::new(5);
    println!("   Initial value: {}", counter.load());

    let old = counter.fetch_update(|x| x * 2);
    println!("   After doubling - old: {}, new: {}", old, counter.load());

    // Example 5: Running maximum
    println!("\n5. Running Maximum:");
    let peak = AtomicI32::new(0);
    for sample in [3, 17, 8, 12] {
        peak.fetch_max(sample);
    }
    println!("   Peak: {}", peak.load());

    println!("\n=== Example completed ===");
}
