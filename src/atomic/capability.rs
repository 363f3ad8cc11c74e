/*******************************************************************************
 *
 *    Copyright (c) 2025.
 *    3-Prism Co. Ltd.
 *
 *    All rights reserved.
 *
 ******************************************************************************/

//! # Capability Matrix
//!
//! Which word widths are lock-free on the current target, fixed at compile
//! time from the target configuration.
//!
//! A width reported as unavailable here has no
//! [`AtomicWord`](crate::atomic::AtomicWord) implementation, so an
//! [`Atomic<T>`](crate::atomic::Atomic) of that size does not compile. There
//! is no runtime fallback.
//!
//! On x86_64 the 128-bit path relies on `cmpxchg16b`, which almost every
//! 64-bit x86 CPU has but which is not part of the baseline instruction set.
//! It is therefore only compiled when the build enables the instruction
//! (`-C target-feature=+cmpxchg16b`). [`Capabilities::detect`] checks the
//! running CPU and reports a mismatch in either direction through the `log`
//! facade.
//!
//! # Author
//!
//! Haixing Hu

use std::fmt;

use log::{
    debug,
    warn,
};

/// Whether 8-bit words are lock-free.
pub const HAS_8BIT: bool = cfg!(target_has_atomic = "8");

/// Whether 16-bit words are lock-free.
pub const HAS_16BIT: bool = cfg!(target_has_atomic = "16");

/// Whether 32-bit words are lock-free.
pub const HAS_32BIT: bool = cfg!(target_has_atomic = "32");

/// Whether 64-bit words are lock-free.
pub const HAS_64BIT: bool = cfg!(target_has_atomic = "64");

/// Whether 128-bit words are lock-free.
///
/// On x86_64 this requires `cmpxchg16b` to be enabled at compile time.
pub const HAS_128BIT: bool = cfg!(any(
    all(target_arch = "x86_64", target_feature = "cmpxchg16b"),
    target_arch = "aarch64"
));

/// Whether `ReadDepends` loads are upgraded to `Acquire`.
pub const READ_DEPENDS_ACQUIRE: bool = cfg!(feature = "read-depends-acquire");

/// Returns whether values of `size` bytes are lock-free on this target.
///
/// # Parameters
///
/// * `size` - The size of the value in bytes.
///
/// # Returns
///
/// `true` if a lock-free word of exactly that size exists.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::atomic::capability::{is_lock_free_size, HAS_32BIT};
///
/// assert_eq!(is_lock_free_size(4), HAS_32BIT);
/// assert!(!is_lock_free_size(3));
/// ```
#[inline]
pub const fn is_lock_free_size(size: usize) -> bool {
    match size {
        1 => HAS_8BIT,
        2 => HAS_16BIT,
        4 => HAS_32BIT,
        8 => HAS_64BIT,
        16 => HAS_128BIT,
        _ => false,
    }
}

/// Snapshot of the capability matrix.
///
/// [`Capabilities::compiled`] reflects the compile-time constants only.
/// [`Capabilities::detect`] additionally verifies the CPU features the
/// compiled paths rely on.
///
/// # Example
///
/// ```rust
/// use prism3_lockfree::atomic::capability::Capabilities;
///
/// let caps = Capabilities::detect();
/// assert!(caps.has_32bit);
/// println!("{caps}");
/// ```
///
/// # Author
///
/// Haixing Hu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// 8-bit words are lock-free.
    pub has_8bit: bool,
    /// 16-bit words are lock-free.
    pub has_16bit: bool,
    /// 32-bit words are lock-free.
    pub has_32bit: bool,
    /// 64-bit words are lock-free.
    pub has_64bit: bool,
    /// 128-bit words are lock-free and usable on the running CPU.
    pub has_128bit: bool,
    /// `ReadDepends` loads are upgraded to `Acquire`.
    pub read_depends_acquire: bool,
}

impl Capabilities {
    /// Returns the matrix as compiled, without inspecting the CPU.
    #[inline]
    pub const fn compiled() -> Self {
        Self {
            has_8bit: HAS_8BIT,
            has_16bit: HAS_16BIT,
            has_32bit: HAS_32BIT,
            has_64bit: HAS_64BIT,
            has_128bit: HAS_128BIT,
            read_depends_acquire: READ_DEPENDS_ACQUIRE,
        }
    }

    /// Returns the matrix as compiled, with the 128-bit entry cleared if the
    /// running CPU lacks the instruction the 128-bit path is built on.
    ///
    /// The result is the same on every call within a process.
    pub fn detect() -> Self {
        let mut caps = Self::compiled();
        if caps.has_128bit && !wide_instruction_available() {
            warn!(
                "128-bit atomics are compiled in but the CPU lacks {}; \
                 128-bit operations will fault",
                WIDE_INSTRUCTION
            );
            caps.has_128bit = false;
        } else if !caps.has_128bit && cfg!(target_arch = "x86_64") && wide_instruction_available() {
            debug!(
                "the CPU supports {} but the build does not enable it; \
                 compile with `-C target-feature=+cmpxchg16b` for 128-bit atomics",
                WIDE_INSTRUCTION
            );
        }
        debug!("Lock-free capabilities: {}", caps);
        caps
    }

    /// Returns whether values of `size` bytes are lock-free according to this
    /// snapshot.
    pub const fn supports_size(&self, size: usize) -> bool {
        match size {
            1 => self.has_8bit,
            2 => self.has_16bit,
            4 => self.has_32bit,
            8 => self.has_64bit,
            16 => self.has_128bit,
            _ => false,
        }
    }
}

impl Default for Capabilities {
    #[inline]
    fn default() -> Self {
        Self::compiled()
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = [
            (8, self.has_8bit),
            (16, self.has_16bit),
            (32, self.has_32bit),
            (64, self.has_64bit),
            (128, self.has_128bit),
        ];
        f.write_str("lock-free widths: [")?;
        let mut first = true;
        for (bits, available) in widths {
            if available {
                if !first {
                    f.write_str(", ")?;
                }
                write!(f, "{bits}")?;
                first = false;
            }
        }
        write!(f, "], read_depends: {}", if self.read_depends_acquire {
            "acquire"
        } else {
            "relaxed"
        })
    }
}

#[cfg(target_arch = "x86_64")]
const WIDE_INSTRUCTION: &str = "cmpxchg16b";

#[cfg(not(target_arch = "x86_64"))]
const WIDE_INSTRUCTION: &str = "ldxp/stxp";

#[cfg(target_arch = "x86_64")]
fn wide_instruction_available() -> bool {
    std::arch::is_x86_feature_detected!("cmpxchg16b")
}

// Exclusive pairs are part of the AArch64 baseline.
#[cfg(not(target_arch = "x86_64"))]
fn wide_instruction_available() -> bool {
    true
}
