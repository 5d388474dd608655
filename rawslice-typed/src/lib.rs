//! Strongly typed views over [`rawslice_core`] slices.
//!
//! [`TypedSlice<'a, T>`] carries a `*mut T` base and a length; the item size is
//! `size_of::<T>()`. Each operation converts to the untyped [`Slice`], runs the
//! untyped operation and converts back, so both layers behave identically.
//!
//! Named typed slices are declared with [`def_typed_slice!`]; the fundamental
//! types already have one in [`primitives`]. Character slices additionally
//! convert to and from NUL-terminated strings, and [`pack`] copies plain values
//! into byte buffers.
//!
//! ```
//! use std::mem::MaybeUninit;
//! use rawslice_typed::primitives::IntSlice;
//!
//! let mut data = [1, 2, 3];
//! let mut backup = MaybeUninit::uninit();
//! unsafe { IntSlice::from_array(&mut data).reverse(&mut backup) };
//! assert_eq!(data, [3, 2, 1]);
//! ```

mod macros;
pub mod pack;
pub mod primitives;
mod strings;
mod typed;

pub use rawslice_core::{Error, Result, Slice};
pub use strings::CharLike;
pub use typed::TypedSlice;

// Used by `def_typed_slice!`.
pub use bytemuck;
