//! Replaceable memory primitives.
//!
//! Every byte comparison, byte copy and C string length computed by this crate
//! goes through the [`MemOps`] table returned by [`mem_ops`]. The default table,
//! [`CoreMemOps`], is built on `core::ptr` and `core::slice`. A program that needs
//! its own primitives (an instrumented `memcpy`, a vendor `memcmp`, ...) installs
//! them once at startup with [`install`].
//!
//! # Example
//!
//! ```
//! use rawslice_core::hooks::{self, CoreMemOps, MemOps};
//!
//! struct Quiet;
//! impl MemOps for Quiet {}
//!
//! static QUIET: Quiet = Quiet;
//! hooks::install(&QUIET).unwrap();
//! assert!(hooks::install(&CoreMemOps).is_err());
//! ```

use std::{cmp::Ordering, ffi::CStr, ffi::c_char, ptr, slice, sync::OnceLock};

use crate::error::{Error, Result};

/// The primitive operations slices delegate to.
///
/// All methods have default implementations, so an implementor overrides only
/// what it needs.
pub trait MemOps: Send + Sync {
    /// Like `memcmp`: lexicographic comparison of `n` bytes.
    ///
    /// # Safety
    ///
    /// `lhs` and `rhs` must be non-null and valid for reads of `n` bytes.
    unsafe fn compare(&self, lhs: *const u8, rhs: *const u8, n: usize) -> Ordering {
        // SAFETY: forwarded from the caller.
        let (lhs, rhs) = unsafe { (slice::from_raw_parts(lhs, n), slice::from_raw_parts(rhs, n)) };
        lhs.cmp(rhs)
    }

    /// Like `memmove`: copies `n` bytes, the regions may overlap.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads and `dst` for writes of `n` bytes.
    unsafe fn copy(&self, dst: *mut u8, src: *const u8, n: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::copy(src, dst, n) }
    }

    /// Like `memcpy`: copies `n` bytes between disjoint regions.
    ///
    /// # Safety
    ///
    /// Same as [`MemOps::copy`], and the regions must not overlap.
    unsafe fn copy_nonoverlapping(&self, dst: *mut u8, src: *const u8, n: usize) {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::copy_nonoverlapping(src, dst, n) }
    }

    /// Like `strlen`: number of bytes before the first NUL.
    ///
    /// # Safety
    ///
    /// `s` must point to a NUL-terminated string.
    unsafe fn strlen(&self, s: *const c_char) -> usize {
        // SAFETY: forwarded from the caller.
        unsafe { CStr::from_ptr(s) }.count_bytes()
    }
}

/// The default primitives, backed by `core`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreMemOps;

impl MemOps for CoreMemOps {}

static CORE_MEM_OPS: CoreMemOps = CoreMemOps;
static INSTALLED: OnceLock<&'static dyn MemOps> = OnceLock::new();

/// Installs `ops` as the process-wide memory primitives.
///
/// Only the first call succeeds. Install before creating any slice: operations
/// that ran earlier used [`CoreMemOps`].
pub fn install(ops: &'static dyn MemOps) -> Result<()> {
    if INSTALLED.set(ops).is_err() {
        tracing::warn!("memory primitives already installed, keeping the existing table");
        return Err(Error::HooksAlreadyInstalled);
    }
    tracing::info!("installed custom memory primitives");
    Ok(())
}

/// Returns the active memory primitives.
pub fn mem_ops() -> &'static dyn MemOps {
    match INSTALLED.get() {
        Some(ops) => *ops,
        None => &CORE_MEM_OPS,
    }
}
