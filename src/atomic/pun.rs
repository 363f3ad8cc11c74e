/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Type Punning
//!
//! Bit-level conversions between atomic values and the fixed-width words the
//! hardware operates on.
//!
//! Every conversion is a byte copy between two equally sized types. The size
//! check is a compile-time assertion, so a mismatched pair does not build.
//! No conversion allocates, fails, or branches on the value.
//!
//! # Author
//!
//! Haixing Hu

use std::mem::size_of;
use std::mem::MaybeUninit;
use std::ptr;

use bytemuck::NoUninit;
use bytemuck::Pod;
use bytemuck::Zeroable;

use crate::atomic::word::AtomicWord;

/// Reinterprets the bytes of `value` as a `P`.
///
/// `T` must have no uninitialized bytes and every bit pattern must be a valid
/// `P`; both are enforced by the `bytemuck` bounds. The sizes of `T` and `P`
/// must be equal, which is checked at compile time.
///
/// # Parameters
///
/// * `value` - The value to reinterpret.
///
/// # Returns
///
/// A `P` with exactly the bytes of `value`.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::atomic::pun::pun;
///
/// let bits: u32 = pun(1.0f32);
/// assert_eq!(bits, 0x3f80_0000);
/// ```
#[inline]
pub fn pun<P: Pod, T: NoUninit>(value: T) -> P {
    const {
        assert!(
            size_of::<P>() == size_of::<T>(),
            "pun requires equally sized types"
        )
    };
    let mut out = <P as Zeroable>::zeroed();
    bytemuck::bytes_of_mut(&mut out).copy_from_slice(bytemuck::bytes_of(&value));
    out
}

/// Reinterprets the bytes of `value` as a `P` without checking the validity
/// of the bytes.
///
/// The sizes of `T` and `P` must be equal, which is checked at compile time.
///
/// # Safety
///
/// Every byte of `value` must be initialized, and the bytes must form a
/// valid `P`. Converting a word back into the value type it was produced
/// from always satisfies this.
#[inline(always)]
pub unsafe fn pun_unchecked<P: Copy, T: Copy>(value: T) -> P {
    const {
        assert!(
            size_of::<P>() == size_of::<T>(),
            "pun requires equally sized types"
        )
    };
    let mut out = MaybeUninit::<P>::uninit();
    // SAFETY: `out` is a distinct local of the same size as `value`; the
    // caller guarantees the copied bytes form a valid `P`.
    unsafe {
        ptr::copy_nonoverlapping(
            (&value as *const T).cast::<u8>(),
            out.as_mut_ptr().cast::<u8>(),
            size_of::<T>(),
        );
        out.assume_init()
    }
}

/// Reinterprets a pointer to a value as a pointer to its fixed-width word.
///
/// The pointee sizes must be equal, which is checked at compile time. The
/// alignment of the result is the caller's concern; atomic cells are aligned
/// to their size.
#[inline(always)]
pub fn integral_cast<W: AtomicWord, T>(ptr: *mut T) -> *mut W {
    const {
        assert!(
            size_of::<W>() == size_of::<T>(),
            "integral_cast requires equally sized pointees"
        )
    };
    ptr.cast::<W>()
}

/// Reinterprets a shared pointer to a value as a mutable pointer to its
/// fixed-width word, for handing to hardware primitives that write through
/// interior mutability.
#[inline(always)]
pub fn shared_integral_cast<W: AtomicWord, T>(ptr: *const T) -> *mut W {
    integral_cast::<W, T>(ptr.cast_mut())
}

/// Two's-complement negation of a word.
///
/// Subtraction is expressed as addition of the negation where only an add
/// primitive exists: `x - y == x + negate(y)` modulo `2^BITS`. The wrap
/// around is intended.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::atomic::pun::negate;
///
/// assert_eq!(negate(1u8), 0xff);
/// assert_eq!(10u8.wrapping_add(negate(3u8)), 7);
/// ```
#[inline(always)]
pub fn negate<W: AtomicWord>(value: W) -> W {
    value.wrapping_neg()
}
