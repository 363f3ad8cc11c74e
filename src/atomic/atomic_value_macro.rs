/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Value Macro
//!
//! Provides the macro that admits user types into
//! [`Atomic<T>`](crate::atomic::Atomic).
//!
//! # Author
//!
//! Haixing Hu

/// Implements [`AtomicValue`](crate::atomic::AtomicValue) for one or more
/// types, each mapped to the word of the same size.
///
/// The following requirements are checked at compile time, and a violation
/// fails the build:
///
/// - the type implements [`bytemuck::NoUninit`], i.e. is `Copy` and has no
///   padding bytes (derive it with `#[derive(NoUninit)]`);
/// - the type has exactly the size of the word.
///
/// # Parameters
///
/// * `$ty => $word` - The value type and the word type (`u8`, `u16`, `u32`,
///   `u64` or `u128`) it rides on.
///
/// # Example
///
/// ```rust
/// use bytemuck::NoUninit;
/// use prism3_lockfree::{atomic_value, Atomic};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, NoUninit)]
/// #[repr(C)]
/// struct Point {
///     x: i16,
///     y: i16,
/// }
///
/// atomic_value!(Point => u32);
///
/// let point = Atomic::new(Point { x: 1, y: 2 });
/// point.store(Point { x: 3, y: 4 });
/// assert_eq!(point.load(), Point { x: 3, y: 4 });
/// ```
///
/// A type whose size differs from the word is rejected:
///
/// ```compile_fail
/// use bytemuck::NoUninit;
/// use prism3_lockfree::atomic_value;
///
/// #[derive(Clone, Copy, NoUninit)]
/// #[repr(C)]
/// struct Rgb {
///     r: u8,
///     g: u8,
///     b: u8,
/// }
///
/// atomic_value!(Rgb => u32);
/// ```
///
/// So is a type that may contain padding:
///
/// ```compile_fail
/// use prism3_lockfree::atomic_value;
///
/// #[derive(Clone, Copy)]
/// #[repr(C)]
/// struct Padded {
///     tag: u8,
///     value: u16,
/// }
///
/// atomic_value!(Padded => u32);
/// ```
#[macro_export]
macro_rules! atomic_value {
    ($($ty:ty => $word:ty),+ $(,)?) => {
        $(
            const _: () = {
                fn assert_no_uninit<T: $crate::bytemuck::NoUninit>() {}
                let _ = assert_no_uninit::<$ty>;
                assert!(
                    ::core::mem::size_of::<$ty>() == ::core::mem::size_of::<$word>(),
                    concat!(
                        "`",
                        stringify!($ty),
                        "` must have the same size as `",
                        stringify!($word),
                        "`"
                    )
                );
            };

            // SAFETY: `NoUninit` and the size are asserted above.
            unsafe impl $crate::atomic::AtomicValue for $ty {
                type Word = $word;
            }
        )+
    };
}
