//! Conversions between slices and NUL-terminated strings.

use std::{
    ffi::{CStr, c_char},
    num::NonZeroUsize,
    ptr::NonNull,
};

use crate::{
    error::{Error, Result},
    hooks::mem_ops,
    slice::Slice,
};

impl<'a> Slice<'a> {
    /// Views the characters of `s`, without its terminating NUL, as a slice of
    /// one-byte items.
    pub fn from_cstr(s: &'a CStr) -> Self {
        Self::from_slice(s.to_bytes())
    }

    /// Views the characters of the NUL-terminated string at `s` as a slice of
    /// one-byte items. The length is measured with the installed `strlen`.
    ///
    /// # Safety
    ///
    /// `s` must point to a NUL-terminated string that stays valid for `'a`.
    pub unsafe fn from_str_ptr(s: *const c_char) -> Result<Self> {
        let Some(ptr) = NonNull::new(s.cast_mut().cast::<u8>()) else {
            return Err(Error::NullPointer);
        };
        // SAFETY: forwarded from the caller.
        let len = unsafe { mem_ops().strlen(s) };
        // SAFETY: `len` bytes before the NUL are readable.
        Ok(unsafe { Self::from_non_null(ptr, NonZeroUsize::MIN, len) })
    }

    /// Copies the bytes of `self` into `out` followed by a NUL, and returns the
    /// resulting string.
    ///
    /// `out` must hold at least `byte_size() + 1` bytes and must not overlap
    /// `self`. The string ends at the first NUL, so a slice that itself contains
    /// a zero byte yields a shorter string.
    pub fn to_cstr<'o>(self, out: &'o mut [u8]) -> Result<&'o CStr> {
        let size = self.byte_size();
        if out.len() < size + 1 {
            return Err(Error::BufferTooSmall {
                required: size + 1,
                actual: out.len(),
            });
        }
        if self.overlaps(Slice::from_slice(&*out)) {
            return Err(Error::Overlap);
        }

        // SAFETY: `out` holds `size` bytes and is disjoint from `self`.
        unsafe { mem_ops().copy_nonoverlapping(out.as_mut_ptr(), self.as_ptr(), size) };
        out[size] = 0;
        Ok(CStr::from_bytes_until_nul(out)?)
    }
}
