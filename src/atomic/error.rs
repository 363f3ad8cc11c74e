/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Atomic Errors
//!
//! Misuse of the atomic operations themselves is rejected at compile time.
//! The only runtime failure is adopting foreign memory as an atomic cell,
//! which is reported by [`AtomicError`].
//!
//! # Author
//!
//! Haixing Hu

use thiserror::Error;

/// Error returned when a raw pointer cannot be viewed as an atomic cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AtomicError {
    /// The pointer is null.
    #[error("cannot create an atomic cell from a null pointer")]
    Null,

    /// The pointer is not aligned to the size of the atomic word.
    #[error("address {address:#x} is not aligned to {required} bytes")]
    Misaligned {
        /// The offending address.
        address: usize,
        /// The alignment the atomic word requires.
        required: usize,
    },
}
