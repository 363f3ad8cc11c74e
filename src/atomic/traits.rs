/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Traits
//!
//! Defines the trait that admits a value type into
//! [`Atomic<T>`](crate::atomic::Atomic), and its implementations for the
//! primitive types.
//!
//! # Author
//!
//! Haixing Hu

use crate::atomic::pun::pun_unchecked;
use crate::atomic::word::AtomicWord;

/// A value type that can be stored in an [`Atomic`](crate::atomic::Atomic)
/// cell.
///
/// Every value rides on a fixed-width [`AtomicWord`] of the same size: it is
/// punned into the word on the way in and back out on the way out.
///
/// Use the [`atomic_value!`](crate::atomic_value) macro to implement this
/// trait for your own types; it checks the requirements below at compile
/// time.
///
/// # Safety
///
/// Implementors guarantee that:
///
/// - `Self` has no padding or other uninitialized bytes;
/// - `size_of::<Self>() == size_of::<Self::Word>()`;
/// - a value may be copied to, and used on, another thread as plain bits.
///
/// The size requirement is also asserted at compile time when the cell is
/// created.
///
/// # Author
///
/// Haixing Hu
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be stored in an atomic cell",
    label = "`{Self}` does not implement `AtomicValue`",
    note = "an atomic value must be `Copy`, free of padding bytes, and exactly 1, 2, 4, 8 or 16 bytes; \
            implement it with `prism3_lockfree::atomic_value!`"
)]
pub unsafe trait AtomicValue: Copy {
    /// The fixed-width word the value is punned to.
    type Word: AtomicWord;

    /// Converts the value to its word.
    #[inline(always)]
    fn into_word(self) -> Self::Word {
        // SAFETY: the trait contract guarantees equal sizes and fully
        // initialized bytes, and every bit pattern is a valid word.
        unsafe { pun_unchecked(self) }
    }

    /// Converts a word back to a value.
    ///
    /// # Safety
    ///
    /// `word` must have been produced by [`AtomicValue::into_word`], or by an
    /// operation that keeps the word a valid `Self` (e.g. integer arithmetic
    /// on an integer type).
    #[inline(always)]
    unsafe fn from_word(word: Self::Word) -> Self {
        // SAFETY: forwarded caller contract.
        unsafe { pun_unchecked(word) }
    }
}

/// The word backing pointers and pointer-sized integers.
#[cfg(target_pointer_width = "16")]
pub type PointerWord = u16;

/// The word backing pointers and pointer-sized integers.
#[cfg(target_pointer_width = "32")]
pub type PointerWord = u32;

/// The word backing pointers and pointer-sized integers.
#[cfg(target_pointer_width = "64")]
pub type PointerWord = u64;

#[cfg(target_has_atomic = "8")]
crate::atomic_value! {
    u8 => u8,
    i8 => u8,
    bool => u8,
}

#[cfg(target_has_atomic = "ptr")]
crate::atomic_value! {
    usize => PointerWord,
    isize => PointerWord,
}

#[cfg(target_has_atomic = "16")]
crate::atomic_value! {
    u16 => u16,
    i16 => u16,
}

#[cfg(target_has_atomic = "32")]
crate::atomic_value! {
    u32 => u32,
    i32 => u32,
    f32 => u32,
    char => u32,
}

#[cfg(target_has_atomic = "64")]
crate::atomic_value! {
    u64 => u64,
    i64 => u64,
    f64 => u64,
}

#[cfg(any(all(target_arch = "x86_64", target_feature = "cmpxchg16b"), target_arch = "aarch64"))]
crate::atomic_value! {
    u128 => u128,
    i128 => u128,
}

// Pointers keep their address bits in the word. Provenance is exposed when
// a pointer is stored and recovered from the exposed set when it is loaded.
#[cfg(target_has_atomic = "ptr")]
unsafe impl<P> AtomicValue for *mut P {
    type Word = PointerWord;

    #[inline(always)]
    fn into_word(self) -> PointerWord {
        self.expose_provenance() as PointerWord
    }

    #[inline(always)]
    unsafe fn from_word(word: PointerWord) -> Self {
        std::ptr::with_exposed_provenance_mut(word as usize)
    }
}

#[cfg(target_has_atomic = "ptr")]
unsafe impl<P> AtomicValue for *const P {
    type Word = PointerWord;

    #[inline(always)]
    fn into_word(self) -> PointerWord {
        self.expose_provenance() as PointerWord
    }

    #[inline(always)]
    unsafe fn from_word(word: PointerWord) -> Self {
        std::ptr::with_exposed_provenance(word as usize)
    }
}
