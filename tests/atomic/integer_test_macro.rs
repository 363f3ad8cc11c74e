/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

/// Macro to generate comprehensive tests for atomic integer types.
#[macro_export]
macro_rules! test_atomic_integer {
    ($atomic_type:ident, $value_type:ty, $test_mod:ident) => {
        mod $test_mod {
            use prism3_lockfree::{
                $atomic_type,
                AcqRel,
                Acquire,
                Relaxed,
                Release,
                SeqCst,
            };
            use std::sync::Arc;
            use std::thread;

            #[test]
            fn test_new() {
                let atomic = <$atomic_type>::new(42);
                assert_eq!(atomic.load(), 42);
            }

            #[test]
            fn test_default() {
                let atomic = <$atomic_type>::default();
                assert_eq!(atomic.load(), 0);
            }

            #[test]
            fn test_from() {
                let atomic = <$atomic_type>::from(100);
                assert_eq!(atomic.load(), 100);
            }

            #[test]
            fn test_load_store() {
                let atomic = <$atomic_type>::new(0);
                atomic.store(42);
                assert_eq!(atomic.load(), 42);
                atomic.store_with(10, Release);
                assert_eq!(atomic.load_with(Acquire), 10);
                atomic.store_with(11, Relaxed);
                assert_eq!(atomic.load_with(Relaxed), 11);
            }

            #[test]
            fn test_exchange() {
                let atomic = <$atomic_type>::new(10);
                assert_eq!(atomic.exchange(20), 10);
                assert_eq!(atomic.exchange_with(30, AcqRel), 20);
                assert_eq!(atomic.load(), 30);
            }

            #[test]
            fn test_compare_exchange_strong_success() {
                let atomic = <$atomic_type>::new(10);
                let mut expected = 10;
                assert!(atomic.compare_exchange_strong(&mut expected, 20));
                assert_eq!(expected, 10);
                assert_eq!(atomic.load(), 20);
            }

            #[test]
            fn test_compare_exchange_strong_failure_updates_expected() {
                let atomic = <$atomic_type>::new(10);
                let mut expected = 15;
                assert!(!atomic.compare_exchange_strong_with(
                    &mut expected,
                    20,
                    AcqRel,
                    Acquire
                ));
                assert_eq!(expected, 10);
                assert_eq!(atomic.load(), 10);
            }

            #[test]
            fn test_compare_exchange_weak_loop() {
                let atomic = <$atomic_type>::new(10);
                let mut expected = 10;
                while !atomic.compare_exchange_weak_with(&mut expected, 20, SeqCst, Relaxed) {
                    assert_eq!(expected, 10);
                }
                assert_eq!(atomic.load(), 20);
            }

            #[test]
            fn test_compare_exchange_weak_failure_updates_expected() {
                let atomic = <$atomic_type>::new(10);
                let mut expected = 15;
                assert!(!atomic.compare_exchange_weak_with(&mut expected, 20, AcqRel, Acquire));
                assert_eq!(expected, 10);
                assert_eq!(atomic.load(), 10);

                // Default orders
                let mut expected = 15;
                assert!(!atomic.compare_exchange_weak(&mut expected, 20));
                assert_eq!(expected, 10);
                assert_eq!(atomic.load(), 10);
            }

            #[test]
            fn test_fetch_add_and_add_fetch() {
                let atomic = <$atomic_type>::new(10);
                assert_eq!(atomic.fetch_add(5), 10);
                assert_eq!(atomic.add_fetch(5), 20);
                assert_eq!(atomic.fetch_add_with(1, Relaxed), 20);
                assert_eq!(atomic.add_fetch_with(1, AcqRel), 22);
                assert_eq!(atomic.load(), 22);
            }

            #[test]
            fn test_fetch_sub_and_sub_fetch() {
                let atomic = <$atomic_type>::new(20);
                assert_eq!(atomic.fetch_sub(5), 20);
                assert_eq!(atomic.sub_fetch(5), 10);
                assert_eq!(atomic.sub_fetch_with(3, Release), 7);
                assert_eq!(atomic.load(), 7);
            }

            #[test]
            fn test_wrapping_arithmetic() {
                let atomic = <$atomic_type>::new(<$value_type>::MAX);
                assert_eq!(atomic.add_fetch(1), <$value_type>::MIN);
                assert_eq!(atomic.sub_fetch(1), <$value_type>::MAX);
            }

            #[test]
            fn test_increment_decrement() {
                let atomic = <$atomic_type>::new(5);
                assert_eq!(atomic.fetch_inc(), 5);
                assert_eq!(atomic.inc_fetch(), 7);
                assert_eq!(atomic.fetch_dec(), 7);
                assert_eq!(atomic.dec_fetch(), 5);
            }

            #[test]
            fn test_bitwise_operations() {
                let atomic = <$atomic_type>::new(0b1100);
                assert_eq!(atomic.fetch_and(0b1010), 0b1100);
                assert_eq!(atomic.load(), 0b1000);
                assert_eq!(atomic.or_fetch(0b0011), 0b1011);
                assert_eq!(atomic.fetch_xor_with(0b1111, AcqRel), 0b1011);
                assert_eq!(atomic.load(), 0b0100);
                assert_eq!(atomic.and_fetch(0b0110), 0b0100);
                assert_eq!(atomic.xor_fetch(0b0100), 0);
                assert_eq!(atomic.fetch_or_with(0b0001, Relaxed), 0);
                assert_eq!(atomic.load(), 1);
            }

            #[test]
            fn test_max_min() {
                let atomic = <$atomic_type>::new(10);
                assert_eq!(atomic.fetch_max(20), 10);
                assert_eq!(atomic.fetch_max(15), 20);
                assert_eq!(atomic.fetch_min(5), 20);
                assert_eq!(atomic.fetch_min_with(8, AcqRel), 5);
                assert_eq!(atomic.load(), 5);
            }

            #[test]
            fn test_fetch_update() {
                let atomic = <$atomic_type>::new(10);
                assert_eq!(atomic.fetch_update(|x| x * 2), 10);
                assert_eq!(atomic.fetch_update_with(|x| x + 1, Relaxed), 20);
                assert_eq!(atomic.load(), 21);
            }

            #[test]
            fn test_get_mut_and_into_inner() {
                let mut atomic = <$atomic_type>::new(1);
                *atomic.get_mut() = 2;
                assert_eq!(atomic.load(), 2);
                assert_eq!(atomic.into_inner(), 2);
            }

            #[test]
            fn test_is_lock_free() {
                let atomic = <$atomic_type>::new(0);
                assert!(atomic.is_lock_free());
                assert!(<$atomic_type>::IS_ALWAYS_LOCK_FREE);
            }

            #[test]
            fn test_layout() {
                assert_eq!(
                    std::mem::size_of::<$atomic_type>(),
                    std::mem::size_of::<$value_type>()
                );
                assert_eq!(
                    std::mem::align_of::<$atomic_type>(),
                    std::mem::size_of::<$value_type>()
                );
            }

            #[test]
            fn test_concurrent_fetch_add() {
                let atomic = Arc::new(<$atomic_type>::new(0));
                let mut handles = vec![];

                for _ in 0..4 {
                    let atomic = atomic.clone();
                    let handle = thread::spawn(move || {
                        for _ in 0..25 {
                            atomic.fetch_add_with(1, Relaxed);
                        }
                    });
                    handles.push(handle);
                }

                for handle in handles {
                    handle.join().unwrap();
                }

                assert_eq!(atomic.load(), 100);
            }

            #[test]
            fn test_debug_display() {
                let atomic = <$atomic_type>::new(42);
                assert_eq!(format!("{:?}", atomic), "Atomic(42)");
                assert_eq!(format!("{}", atomic), "42");
            }
        }
    };
}
