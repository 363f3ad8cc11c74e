/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Memory Order Tags
//!
//! Encodes the six memory orders as zero-sized types so that the ordering of
//! an atomic operation is selected by the type system instead of a runtime
//! argument.
//!
//! Each tag implements the capability traits for the operations it is legal
//! on:
//!
//! | tag           | load | store | read-modify-write | fence |
//! |---------------|------|-------|-------------------|-------|
//! | `Relaxed`     | yes  | yes   | yes               | yes   |
//! | `Acquire`     | yes  |       | yes               | yes   |
//! | `Release`     |      | yes   | yes               | yes   |
//! | `AcqRel`      |      |       | yes               | yes   |
//! | `SeqCst`      | yes  | yes   | yes               | yes   |
//! | `ReadDepends` | yes  |       |                   |       |
//!
//! Passing a tag to an operation it is not legal on is a compile error, for
//! example `atomic.load_with(Release)` reports that `Release` is not a valid
//! memory order for an atomic load.
//!
//! ```rust
//! use prism3_lockfree::{Atomic, AcqRel, Acquire, ReadDepends, Relaxed, Release};
//!
//! let value = Atomic::<u32>::new(0);
//! value.store_with(1, Release);
//! assert_eq!(value.load_with(Acquire), 1);
//! assert_eq!(value.load_with(ReadDepends), 1);
//!
//! let mut expected = 1;
//! assert!(value.compare_exchange_strong_with(&mut expected, 2, Release, Relaxed));
//! assert_eq!(value.exchange_with(3, AcqRel), 2);
//! ```
//!
//! A load cannot release:
//!
//! ```compile_fail
//! use prism3_lockfree::{Atomic, Release};
//!
//! let value = Atomic::<u32>::new(0);
//! value.load_with(Release);
//! ```
//!
//! A store cannot acquire:
//!
//! ```compile_fail
//! use prism3_lockfree::{Acquire, Atomic};
//!
//! let value = Atomic::<u32>::new(0);
//! value.store_with(1, Acquire);
//! ```
//!
//! The failure order of a compare-exchange cannot be stronger than the
//! success order:
//!
//! ```compile_fail
//! use prism3_lockfree::{Acquire, Atomic, Release};
//!
//! let value = Atomic::<u32>::new(0);
//! let mut expected = 0;
//! value.compare_exchange_strong_with(&mut expected, 1, Release, Acquire);
//! ```
//!
//! `ReadDepends` only applies to loads:
//!
//! ```compile_fail
//! use prism3_lockfree::{Atomic, ReadDepends};
//!
//! let value = Atomic::<u32>::new(0);
//! value.exchange_with(1, ReadDepends);
//! ```
//!
//! ```compile_fail
//! use prism3_lockfree::{thread_fence, ReadDepends};
//!
//! thread_fence(ReadDepends);
//! ```
//!
//! # Author
//!
//! Haixing Hu

use std::fmt::Debug;
use std::sync::atomic::Ordering;

mod sealed {
    pub trait Sealed {}
}

/// Common trait of the memory order tags.
///
/// Sealed: the set of orders is closed.
///
/// # Author
///
/// Haixing Hu
pub trait MemoryOrder: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// The `std` ordering this tag lowers to on the compiler builtins.
    const ORDERING: Ordering;

    /// Human readable name of the order, as used in diagnostics.
    const NAME: &'static str;

    /// Whether the order has acquire semantics.
    const ACQUIRES: bool = matches!(
        Self::ORDERING,
        Ordering::Acquire | Ordering::AcqRel | Ordering::SeqCst
    );

    /// Whether the order has release semantics.
    const RELEASES: bool = matches!(
        Self::ORDERING,
        Ordering::Release | Ordering::AcqRel | Ordering::SeqCst
    );

    /// Whether the order takes part in the single total order of
    /// sequentially consistent operations.
    const SEQ_CST: bool = matches!(Self::ORDERING, Ordering::SeqCst);
}

/// Orders that are valid for an atomic load.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid memory order for an atomic load",
    label = "loads only accept `Relaxed`, `Acquire`, `SeqCst` or `ReadDepends`"
)]
pub trait LoadOrder: MemoryOrder {}

/// Orders that are valid for an atomic store.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid memory order for an atomic store",
    label = "stores only accept `Relaxed`, `Release` or `SeqCst`"
)]
pub trait StoreOrder: MemoryOrder {}

/// Orders that are valid for a read-modify-write operation (exchange,
/// compare-exchange success, fetch-and-op).
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid memory order for a read-modify-write operation",
    label = "read-modify-write operations do not accept `ReadDepends`"
)]
pub trait RmwOrder: MemoryOrder {
    /// The strongest failure order that may accompany this success order.
    ///
    /// `AcqRel` pairs with `Acquire` and `Release` pairs with `Relaxed`,
    /// since a failed compare-exchange performs no store.
    type Failure: FailureOrder<Self>;
}

/// Orders that are valid as the failure order of a compare-exchange whose
/// success order is `S`.
///
/// Only the pairs where the failure order is a load order no stronger than
/// the success order implement this trait, so an illegal pair has no
/// matching implementation and is rejected at compile time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be the failure order of a compare-exchange with success order `{S}`",
    label = "invalid failure order",
    note = "the failure order must be `Relaxed`, `Acquire` or `SeqCst` and no stronger than the success order"
)]
pub trait FailureOrder<S: RmwOrder>: LoadOrder {}

/// Orders that are valid for a fence.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid memory order for a fence",
    label = "fences do not accept `ReadDepends`"
)]
pub trait FenceOrder: MemoryOrder {}

macro_rules! define_order {
    ($(#[$meta:meta])* $name:ident, $ordering:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl MemoryOrder for $name {
            const ORDERING: Ordering = $ordering;
            const NAME: &'static str = stringify!($name);
        }
    };
}

define_order!(
    /// No ordering constraint; only the atomicity of the operation itself is
    /// guaranteed.
    Relaxed,
    Ordering::Relaxed
);

define_order!(
    /// Later memory operations of this thread cannot move before the load,
    /// and writes published by a matching release become visible.
    Acquire,
    Ordering::Acquire
);

define_order!(
    /// Earlier memory operations of this thread cannot move after the store,
    /// and become visible to a matching acquire.
    Release,
    Ordering::Release
);

define_order!(
    /// Both `Acquire` and `Release`, for read-modify-write operations.
    AcqRel,
    Ordering::AcqRel
);

define_order!(
    /// `AcqRel` plus a single total order over all `SeqCst` operations.
    SeqCst,
    Ordering::SeqCst
);

define_order!(
    /// Ordering for loads whose result is only used to compute the address of
    /// later loads (pointer or index chasing).
    ///
    /// Lowers to `Relaxed`, or to `Acquire` when the `read-depends-acquire`
    /// feature is enabled for targets that reorder dependent loads.
    ReadDepends,
    READ_DEPENDS_ORDERING
);

const READ_DEPENDS_ORDERING: Ordering = if cfg!(feature = "read-depends-acquire") {
    Ordering::Acquire
} else {
    Ordering::Relaxed
};

impl LoadOrder for Relaxed {}
impl LoadOrder for Acquire {}
impl LoadOrder for SeqCst {}
impl LoadOrder for ReadDepends {}

impl StoreOrder for Relaxed {}
impl StoreOrder for Release {}
impl StoreOrder for SeqCst {}

impl RmwOrder for Relaxed {
    type Failure = Relaxed;
}

impl RmwOrder for Acquire {
    type Failure = Acquire;
}

impl RmwOrder for Release {
    type Failure = Relaxed;
}

impl RmwOrder for AcqRel {
    type Failure = Acquire;
}

impl RmwOrder for SeqCst {
    type Failure = SeqCst;
}

impl FailureOrder<Relaxed> for Relaxed {}

impl FailureOrder<Acquire> for Relaxed {}
impl FailureOrder<Acquire> for Acquire {}

impl FailureOrder<Release> for Relaxed {}

impl FailureOrder<AcqRel> for Relaxed {}
impl FailureOrder<AcqRel> for Acquire {}

impl FailureOrder<SeqCst> for Relaxed {}
impl FailureOrder<SeqCst> for Acquire {}
impl FailureOrder<SeqCst> for SeqCst {}

impl FenceOrder for Relaxed {}
impl FenceOrder for Acquire {}
impl FenceOrder for Release {}
impl FenceOrder for AcqRel {}
impl FenceOrder for SeqCst {}
