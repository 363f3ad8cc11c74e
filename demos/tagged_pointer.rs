/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/
//! # Tagged Pointer Example
//!
//! A Treiber stack whose head pairs a pointer with a version counter in a
//! single 128-bit atomic, so a recycled node cannot be mistaken for the
//! head it replaced.

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
mod stack {
    use bytemuck::NoUninit;
    use prism3_lockfree::{
        AcqRel,
        Acquire,
        Atomic,
    };

    #[derive(Clone, Copy, PartialEq, Eq, NoUninit)]
    #[repr(C)]
    struct Head {
        node: u64,
        version: u64,
    }

    prism3_lockfree::atomic_value!(Head => u128);

    struct Node {
        value: u32,
        next: u64,
    }

    pub struct Stack {
        head: Atomic<Head>,
    }

    impl Stack {
        pub fn new() -> Self {
            Self {
                head: Atomic::new(Head {
                    node: 0,
                    version: 0,
                }),
            }
        }

        pub fn push(&self, value: u32) {
            let node = Box::into_raw(Box::new(Node { value, next: 0 }));
            let mut current = self.head.load_with(Acquire);
            loop {
                // SAFETY: `node` is not shared until the exchange succeeds.
                unsafe { (*node).next = current.node };
                let desired = Head {
                    node: node as u64,
                    version: current.version.wrapping_add(1),
                };
                if self
                    .head
                    .compare_exchange_weak_with(&mut current, desired, AcqRel, Acquire)
                {
                    return;
                }
            }
        }

        pub fn pop(&self) -> Option<u32> {
            let mut current = self.head.load_with(Acquire);
            loop {
                if current.node == 0 {
                    return None;
                }
                let node = current.node as *mut Node;
                // SAFETY: nodes are only freed by the thread that unlinks them,
                // and this demo pops from a single thread.
                let next = unsafe { (*node).next };
                let desired = Head {
                    node: next,
                    version: current.version.wrapping_add(1),
                };
                if self
                    .head
                    .compare_exchange_weak_with(&mut current, desired, AcqRel, Acquire)
                {
                    // SAFETY: the node is unlinked and owned by this thread.
                    let node = unsafe { Box::from_raw(node) };
                    return Some(node.value);
                }
            }
        }

        pub fn version(&self) -> u64 {
            self.head.load().version
        }
    }

    impl Drop for Stack {
        fn drop(&mut self) {
            while self.pop().is_some() {}
        }
    }
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
fn main() {
    use std::sync::Arc;
    use std::thread;

    println!("=== Tagged Pointer Example ===\n");

    let stack = Arc::new(stack::Stack::new());
    let mut handles = vec![];
    for id in 0..4u32 {
        let stack = stack.clone();
        handles.push(thread::spawn(move || {
            for i in 0..100 {
                stack.push(id * 100 + i);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut sum = 0u64;
    let mut count = 0;
    while let Some(value) = stack.pop() {
        sum += value as u64;
        count += 1;
    }
    println!("   Popped {} values, sum {}", count, sum);
    println!("   Head version: {}", stack.version());

    println!("\n=== Example completed ===");
}

#[cfg(not(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64")))]
fn main() {
    println!("128-bit atomics are not available on this target");
}
