//! NUL-terminated string interop for character slices.

use std::ffi::{CStr, c_char};

use rawslice_core::{Result, Slice};

use crate::TypedSlice;

mod private {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for i8 {}
}

/// One-byte character types: `u8` and `i8`, and therefore `c_char` on every
/// platform.
pub trait CharLike: bytemuck::NoUninit + private::Sealed {}

impl CharLike for u8 {}
impl CharLike for i8 {}

impl<'a, C: CharLike> TypedSlice<'a, C> {
    /// See [`Slice::from_cstr`].
    pub fn from_cstr(s: &'a CStr) -> Self {
        Self::from_untyped_unchecked(Slice::from_cstr(s))
    }

    /// See [`Slice::from_str_ptr`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::from_str_ptr`].
    pub unsafe fn from_str_ptr(s: *const c_char) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        unsafe { Slice::from_str_ptr(s) }.map(Self::from_untyped_unchecked)
    }

    /// See [`Slice::to_cstr`].
    pub fn to_cstr<'o>(self, out: &'o mut [u8]) -> Result<&'o CStr> {
        self.to_untyped().to_cstr(out)
    }
}
