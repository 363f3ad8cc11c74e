/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

use prism3_lockfree::{
    thread_fence,
    AcqRel,
    Acquire,
    AtomicBool,
    AtomicI32,
    AtomicU16,
    AtomicU32,
    AtomicU64,
    AtomicU8,
    AtomicUsize,
    ReadDepends,
    Relaxed,
    Release,
    SeqCst,
};
use std::sync::{
    Arc,
    Barrier,
};
use std::thread;

const NUM_THREADS: usize = 10;
const ITERATIONS_PER_THREAD: usize = 1000;

/// Runs `NUM_THREADS` workers released together by a barrier.
fn run_workers<F>(worker: F)
where
    F: Fn(usize) + Send + Sync + 'static,
{
    let worker = Arc::new(worker);
    let barrier = Arc::new(Barrier::new(NUM_THREADS));
    let mut handles = vec![];

    for id in 0..NUM_THREADS {
        let worker = worker.clone();
        let barrier = barrier.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            worker(id);
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

// No lost updates at any width
#[test]
fn test_relaxed_fetch_add_all_widths() {
    let a8 = Arc::new(AtomicU8::new(0));
    let a16 = Arc::new(AtomicU16::new(0));
    let a32 = Arc::new(AtomicU32::new(0));
    let a64 = Arc::new(AtomicU64::new(0));

    {
        let (a8, a16, a32, a64) = (a8.clone(), a16.clone(), a32.clone(), a64.clone());
        run_workers(move |_| {
            for _ in 0..ITERATIONS_PER_THREAD {
                a8.fetch_add_with(1, Relaxed);
                a16.fetch_add_with(1, Relaxed);
                a32.fetch_add_with(1, Relaxed);
                a64.fetch_add_with(1, Relaxed);
            }
        });
    }

    let total = NUM_THREADS * ITERATIONS_PER_THREAD;
    assert_eq!(a8.load(), (total % 256) as u8);
    assert_eq!(a16.load(), total as u16);
    assert_eq!(a32.load(), total as u32);
    assert_eq!(a64.load(), total as u64);
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
#[test]
fn test_relaxed_fetch_add_128bit() {
    use prism3_lockfree::AtomicU128;

    // Start just below the 64-bit boundary so carries cross halves.
    let start = u64::MAX as u128 - 500;
    let atomic = Arc::new(AtomicU128::new(start));
    {
        let atomic = atomic.clone();
        run_workers(move |_| {
            for _ in 0..ITERATIONS_PER_THREAD {
                atomic.fetch_add_with(1, Relaxed);
            }
        });
    }
    assert_eq!(
        atomic.load(),
        start + (NUM_THREADS * ITERATIONS_PER_THREAD) as u128
    );
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
#[test]
fn test_128bit_halves_never_tear() {
    use prism3_lockfree::AtomicU128;

    // Writers only ever store values whose halves are equal.
    let atomic = Arc::new(AtomicU128::new(0));
    {
        let atomic = atomic.clone();
        run_workers(move |id| {
            for i in 0..ITERATIONS_PER_THREAD as u128 {
                if id % 2 == 0 {
                    let half = (id as u128) << 32 | i;
                    atomic.store_with(half << 64 | half, Release);
                } else {
                    let value = atomic.load_with(Acquire);
                    assert_eq!(value >> 64, value & u64::MAX as u128);
                }
            }
        });
    }
}

// Each thread wins exactly one CAS increment
#[test]
fn test_concurrent_compare_exchange_weak() {
    let atomic = Arc::new(AtomicU32::new(0));
    let successes = Arc::new(AtomicUsize::new(0));
    {
        let atomic = atomic.clone();
        let successes = successes.clone();
        run_workers(move |_| {
            let mut current = atomic.load_with(Relaxed);
            loop {
                let desired = current + 1;
                if atomic.compare_exchange_weak_with(&mut current, desired, AcqRel, Relaxed) {
                    break;
                }
            }
            successes.fetch_inc();
        });
    }
    assert_eq!(atomic.load(), NUM_THREADS as u32);
    assert_eq!(successes.load(), NUM_THREADS);
}

// Only one thread flips the flag
#[test]
fn test_single_winner_compare_exchange_strong() {
    let flag = Arc::new(AtomicBool::new(false));
    let winners = Arc::new(AtomicUsize::new(0));
    {
        let flag = flag.clone();
        let winners = winners.clone();
        run_workers(move |_| {
            let mut expected = false;
            if flag.compare_exchange_strong(&mut expected, true) {
                winners.fetch_inc();
            } else {
                assert!(expected);
            }
        });
    }
    assert!(flag.load());
    assert_eq!(winners.load(), 1);
}

#[test]
fn test_concurrent_exchange_preserves_values() {
    let atomic = Arc::new(AtomicUsize::new(0));
    let collected = Arc::new(AtomicUsize::new(0));
    {
        let atomic = atomic.clone();
        let collected = collected.clone();
        run_workers(move |id| {
            let old = atomic.exchange_with(id + 1, AcqRel);
            collected.fetch_add(old);
        });
    }
    // Every stored value is returned by exactly one exchange, except the
    // last one which remains in the cell.
    let all: usize = (1..=NUM_THREADS).sum();
    assert_eq!(collected.load() + atomic.load(), all);
}

#[test]
fn test_concurrent_bitwise() {
    let atomic = Arc::new(AtomicU32::new(0));
    {
        let atomic = atomic.clone();
        run_workers(move |id| {
            atomic.fetch_or_with(1 << id, Release);
        });
    }
    assert_eq!(atomic.load(), (1u32 << NUM_THREADS) - 1);

    {
        let atomic = atomic.clone();
        run_workers(move |id| {
            atomic.fetch_and_with(!(1 << id), AcqRel);
        });
    }
    assert_eq!(atomic.load(), 0);
}

#[test]
fn test_concurrent_toggle() {
    let flag = Arc::new(AtomicBool::new(false));
    {
        let flag = flag.clone();
        run_workers(move |_| {
            for _ in 0..100 {
                flag.fetch_not();
            }
        });
    }
    // Even number of toggles
    assert!(!flag.load());
}

#[test]
fn test_concurrent_max_min() {
    let high = Arc::new(AtomicI32::new(0));
    let low = Arc::new(AtomicI32::new(1000));
    {
        let high = high.clone();
        let low = low.clone();
        run_workers(move |id| {
            high.fetch_max((id * 10) as i32);
            low.fetch_min((100 - id * 5) as i32);
        });
    }
    assert_eq!(high.load(), ((NUM_THREADS - 1) * 10) as i32);
    assert_eq!(low.load(), (100 - (NUM_THREADS - 1) * 5) as i32);
}

// Release store / acquire load message passing
#[test]
fn test_message_passing() {
    for _ in 0..100 {
        let data = Arc::new(AtomicU64::new(0));
        let ready = Arc::new(AtomicBool::new(false));

        let producer = {
            let data = data.clone();
            let ready = ready.clone();
            thread::spawn(move || {
                data.store_with(42, Relaxed);
                ready.store_with(true, Release);
            })
        };

        let consumer = thread::spawn(move || {
            while !ready.load_with(Acquire) {
                prism3_lockfree::cpu_pause();
            }
            data.load_with(Relaxed)
        });

        producer.join().unwrap();
        assert_eq!(consumer.join().unwrap(), 42);
    }
}

// Same idiom with standalone fences
#[test]
fn test_message_passing_with_fences() {
    for _ in 0..100 {
        let data = Arc::new(AtomicU32::new(0));
        let ready = Arc::new(AtomicBool::new(false));

        let producer = {
            let data = data.clone();
            let ready = ready.clone();
            thread::spawn(move || {
                data.store_with(7, Relaxed);
                thread_fence(Release);
                ready.store_with(true, Relaxed);
            })
        };

        let consumer = thread::spawn(move || {
            while !ready.load_with(Relaxed) {
                prism3_lockfree::cpu_pause();
            }
            thread_fence(Acquire);
            data.load_with(Relaxed)
        });

        producer.join().unwrap();
        assert_eq!(consumer.join().unwrap(), 7);
    }
}

// Publishing a pointer and chasing it with a dependent load
#[test]
fn test_read_depends_pointer_publication() {
    let slot = Arc::new(prism3_lockfree::AtomicPtr::<u64>::new(std::ptr::null_mut()));

    let reader = {
        let slot = slot.clone();
        thread::spawn(move || loop {
            let ptr = slot.load_with(ReadDepends);
            if !ptr.is_null() {
                // SAFETY: the writer leaks the box and never frees it.
                return unsafe { *ptr };
            }
            prism3_lockfree::cpu_pause();
        })
    };

    let value = Box::into_raw(Box::new(99u64));
    slot.store_with(value, Release);

    assert_eq!(reader.join().unwrap(), 99);
    // SAFETY: the reader has finished.
    drop(unsafe { Box::from_raw(slot.exchange(std::ptr::null_mut())) });
}

// IRIW: two readers must agree on the order of two independent seq_cst
// writes.
#[test]
fn test_iriw_seq_cst() {
    for _ in 0..200 {
        let x = Arc::new(AtomicU32::new(0));
        let y = Arc::new(AtomicU32::new(0));
        let barrier = Arc::new(Barrier::new(4));

        let writer = |cell: Arc<AtomicU32>, barrier: Arc<Barrier>| {
            thread::spawn(move || {
                barrier.wait();
                cell.store_with(1, SeqCst);
            })
        };

        let reader = |first: Arc<AtomicU32>, second: Arc<AtomicU32>, barrier: Arc<Barrier>| {
            thread::spawn(move || {
                barrier.wait();
                let a = first.load_with(SeqCst);
                let b = second.load_with(SeqCst);
                (a, b)
            })
        };

        let w1 = writer(x.clone(), barrier.clone());
        let w2 = writer(y.clone(), barrier.clone());
        let r1 = reader(x.clone(), y.clone(), barrier.clone());
        let r2 = reader(y.clone(), x.clone(), barrier.clone());

        w1.join().unwrap();
        w2.join().unwrap();
        let (r1_x, r1_y) = r1.join().unwrap();
        let (r2_y, r2_x) = r2.join().unwrap();

        // Reader 1 saw x before y and reader 2 saw y before x: forbidden.
        let disagree = r1_x == 1 && r1_y == 0 && r2_y == 1 && r2_x == 0;
        assert!(!disagree, "readers observed the writes in opposite orders");
    }
}

// Store buffering: with seq_cst, at least one thread sees the other's store.
#[test]
fn test_store_buffering_seq_cst() {
    for _ in 0..200 {
        let x = Arc::new(AtomicU32::new(0));
        let y = Arc::new(AtomicU32::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let t1 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                x.store(1);
                y.load()
            })
        };
        let t2 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                y.store(1);
                x.load()
            })
        };

        let seen_y = t1.join().unwrap();
        let seen_x = t2.join().unwrap();
        assert!(seen_x == 1 || seen_y == 1);
    }
}

// Store buffering where the stores are read-modify-writes. A seq_cst RMW
// must not be reordered with a later seq_cst load.
#[test]
fn test_store_buffering_read_modify_write_seq_cst() {
    for _ in 0..200 {
        let x = Arc::new(AtomicU32::new(0));
        let y = Arc::new(AtomicU64::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let t1 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                x.exchange(1);
                y.load()
            })
        };
        let t2 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                y.fetch_add(1);
                x.load()
            })
        };

        let seen_y = t1.join().unwrap();
        let seen_x = t2.join().unwrap();
        assert!(seen_x == 1 || seen_y == 1);
    }
}

// Same shape with compare-exchange and small words.
#[test]
fn test_store_buffering_compare_exchange_seq_cst() {
    for _ in 0..200 {
        let x = Arc::new(AtomicU8::new(0));
        let y = Arc::new(AtomicU16::new(0));
        let barrier = Arc::new(Barrier::new(2));

        let t1 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                let mut expected = 0;
                assert!(x.compare_exchange_strong(&mut expected, 1));
                y.load()
            })
        };
        let t2 = {
            let (x, y, barrier) = (x.clone(), y.clone(), barrier.clone());
            thread::spawn(move || {
                barrier.wait();
                y.fetch_or(1);
                x.load()
            })
        };

        let seen_y = t1.join().unwrap();
        let seen_x = t2.join().unwrap();
        assert!(seen_x == 1 || seen_y == 1);
    }
}
