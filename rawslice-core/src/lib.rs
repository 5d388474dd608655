//! Untyped fat-pointer slices.
//!
//! A [`Slice`] is a base pointer, an item size in bytes and an item count. It
//! borrows memory owned by someone else (a stack array, a heap buffer, a region
//! handed over by C code) and offers pointer arithmetic, sub-ranging,
//! comparison, copying and in-place rearrangement over it without knowing the
//! item type.
//!
//! Reading operations are safe. Operations that write through a slice, or that
//! accept raw pointers, are `unsafe` and document what the caller guarantees.
//! Checked variants return [`Result`]; unchecked variants with signed offsets
//! are provided alongside for callers that step outside the current view.
//!
//! Typed views over the same representation live in the `rawslice-typed` crate.
//!
//! # Features
//!
//! - `sort`: [`Slice::sort`] through the host `qsort`
//! - `bsearch`: [`Slice::bsearch`] through the host `bsearch`
//! - `io`: writing slices to `std::io::Write` sinks
//! - `logging`: [`logger::init_logging`]
//!
//! # Example
//!
//! ```
//! use std::mem::MaybeUninit;
//! use rawslice_core::Slice;
//!
//! let mut data = [5i32, 8, 1, 9];
//! let mut backup = [MaybeUninit::uninit(); 4];
//! let slice = Slice::from_array(&mut data);
//! unsafe { slice.swap(1, 3, &mut backup) };
//! assert_eq!(data, [5, 9, 1, 8]);
//! ```

mod cmp;
mod cstr;
pub mod error;
pub mod hooks;
#[cfg(feature = "io")]
mod io;
#[cfg(feature = "logging")]
pub mod logger;
mod mutate;
mod search;
mod slice;

pub use error::{Error, Result};
pub use hooks::MemOps;
#[cfg(any(feature = "sort", feature = "bsearch"))]
pub use search::RawComparator;
pub use slice::Slice;

// Re-exported for the typed crate's compile-time checks.
pub use bytemuck;
