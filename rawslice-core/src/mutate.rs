//! Copying, swapping and reversing in place.
//!
//! Every operation here writes through a [`Slice`] and is therefore `unsafe`:
//! the caller guarantees that the destination storage is writable and that no
//! live Rust reference observes it during the call.

use std::mem::MaybeUninit;

use crate::{
    error::{Error, Result},
    hooks::mem_ops,
    slice::Slice,
};

impl Slice<'_> {
    /// Copies all bytes of `src` to the start of `self`.
    ///
    /// The regions may overlap. The length of `self` is not consulted, so a
    /// zero-length destination still receives `src.byte_size()` bytes.
    ///
    /// # Safety
    ///
    /// `self` must be writable for `src.byte_size()` bytes from its base.
    pub unsafe fn copy_from(self, src: Slice<'_>) {
        // SAFETY: forwarded from the caller; `src` is readable by construction.
        unsafe { mem_ops().copy(self.as_ptr(), src.as_ptr(), src.byte_size()) }
    }

    /// Like [`Slice::copy_from`], for regions known to be disjoint.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::copy_from`], and the copied regions must not overlap.
    pub unsafe fn copy_from_non_overlapping(self, src: Slice<'_>) {
        debug_assert!(
            !self.widened_to(src.byte_size()).overlaps(src),
            "non-overlapping copy between overlapping regions"
        );
        // SAFETY: forwarded from the caller.
        unsafe { mem_ops().copy_nonoverlapping(self.as_ptr(), src.as_ptr(), src.byte_size()) }
    }

    /// Copies all bytes of `src` to the start of `self` after checking that
    /// they fit.
    ///
    /// # Safety
    ///
    /// `self` must be writable.
    pub unsafe fn try_copy_from(self, src: Slice<'_>) -> Result<()> {
        if self.byte_size() < src.byte_size() {
            return Err(Error::BufferTooSmall {
                required: src.byte_size(),
                actual: self.byte_size(),
            });
        }
        // SAFETY: the destination holds at least `src.byte_size()` bytes.
        unsafe { self.copy_from(src) };
        Ok(())
    }

    /// Exchanges the items at signed indices `i` and `j`, using `backup` as
    /// scratch space for one item.
    ///
    /// Swapping an index with itself leaves the slice untouched.
    ///
    /// # Panics
    ///
    /// Panics if `backup` is shorter than one item.
    ///
    /// # Safety
    ///
    /// Both items must lie inside writable storage. Indices are not checked
    /// against the length.
    pub unsafe fn swap(self, i: isize, j: isize, backup: &mut [MaybeUninit<u8>]) {
        assert!(
            backup.len() >= self.item_size(),
            "swap scratch of {} bytes cannot hold an item of {} bytes",
            backup.len(),
            self.item_size()
        );
        if i == j {
            return;
        }

        let (a, b) = (self.get(i), self.get(j));
        let scratch = backup.as_mut_ptr().cast::<u8>();
        let n = self.item_size();
        let ops = mem_ops();
        // SAFETY: `i != j`, so the two items are distinct and disjoint; the
        // scratch buffer is a separate exclusive borrow.
        unsafe {
            ops.copy_nonoverlapping(scratch, a, n);
            ops.copy_nonoverlapping(a, b, n);
            ops.copy_nonoverlapping(b, scratch, n);
        }
    }

    /// Exchanges every item of `self` with the item at the same index in
    /// `other`, using `backup` as scratch space for one item.
    ///
    /// # Panics
    ///
    /// Panics if the lengths or item sizes differ, or if `backup` is shorter
    /// than one item.
    ///
    /// # Safety
    ///
    /// Both slices must be writable and must not overlap.
    pub unsafe fn swap_with_slice(self, other: Slice<'_>, backup: &mut [MaybeUninit<u8>]) {
        assert_eq!(
            self.len(),
            other.len(),
            "swapped slices must have the same length"
        );
        assert_eq!(
            self.item_size(),
            other.item_size(),
            "swapped slices must have the same item size"
        );
        assert!(
            backup.len() >= self.item_size(),
            "swap scratch of {} bytes cannot hold an item of {} bytes",
            backup.len(),
            self.item_size()
        );
        debug_assert!(!self.overlaps(other), "swapped slices overlap");

        let scratch = backup.as_mut_ptr().cast::<u8>();
        let n = self.item_size();
        let ops = mem_ops();
        for i in 0..self.len() as isize {
            let (a, b) = (self.get(i), other.get(i));
            // SAFETY: the slices are disjoint and writable; scratch is exclusive.
            unsafe {
                ops.copy_nonoverlapping(scratch, a, n);
                ops.copy_nonoverlapping(a, b, n);
                ops.copy_nonoverlapping(b, scratch, n);
            }
        }
    }

    /// Reverses the order of items in place, using `backup` as scratch space
    /// for one item.
    ///
    /// # Panics
    ///
    /// Panics if `backup` is shorter than one item.
    ///
    /// # Safety
    ///
    /// `self` must be writable.
    pub unsafe fn reverse(self, backup: &mut [MaybeUninit<u8>]) {
        let len = self.len() as isize;
        for i in 0..len / 2 {
            // SAFETY: both indices are inside `0..len`.
            unsafe { self.swap(i, len - i - 1, backup) };
        }
    }

    // `self` re-measured to cover `bytes` bytes from its base, for overlap checks.
    fn widened_to(self, bytes: usize) -> Self {
        // SAFETY: a one-byte item size is never zero; the result is only inspected.
        unsafe {
            Self::from_non_null(
                self.as_non_null(),
                std::num::NonZeroUsize::MIN,
                bytes,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy() {
        let src = [1i32, 2, 3];
        let mut dst = [0i32; 3];
        let dst_slice = Slice::from_array(&mut dst);
        unsafe { dst_slice.copy_from(Slice::from_slice(&src)) };
        assert_eq!(dst, src);
    }

    #[test]
    fn test_copy_ignores_destination_length() {
        let src = [1i32, 2, 3];
        let mut dst = [0i32; 3];
        let dst_slice = unsafe { Slice::from_array(&mut dst).with_len(0) };
        unsafe { dst_slice.copy_from(Slice::from_slice(&src)) };
        assert_eq!(dst, src);
    }

    #[test]
    fn test_copy_overlapping() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);
        let src = slice.sub(1, 5).unwrap();
        unsafe { slice.copy_from(src) };
        assert_eq!(data, [2, 3, 4, 5, 5]);
    }

    #[test]
    fn test_copy_non_overlapping() {
        let src = [9u8, 8, 7];
        let mut dst = [0u8; 5];
        let dst_slice = Slice::from_array(&mut dst).advance(1).unwrap();
        unsafe { dst_slice.copy_from_non_overlapping(Slice::from_slice(&src)) };
        assert_eq!(dst, [0, 9, 8, 7, 0]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "overlap")]
    fn test_copy_non_overlapping_rejects_overlap() {
        let mut data = [1i32, 2, 3, 4];
        let slice = Slice::from_array(&mut data);
        let src = slice.sub(1, 3).unwrap();
        unsafe { slice.copy_from_non_overlapping(src) };
    }

    #[test]
    fn test_try_copy_too_small() {
        let src = [1u32, 2, 3];
        let mut dst = [0u32; 2];
        let dst_slice = Slice::from_array(&mut dst);
        let err = unsafe { dst_slice.try_copy_from(Slice::from_slice(&src)) }.unwrap_err();
        assert!(matches!(
            err,
            Error::BufferTooSmall {
                required: 12,
                actual: 8
            }
        ));
        assert_eq!(dst, [0, 0]);
    }

    #[test]
    fn test_swap() {
        let mut data = [5i32, 8, 1, 9];
        let mut backup = [MaybeUninit::uninit(); 4];
        let slice = Slice::from_array(&mut data);
        unsafe { slice.swap(1, 3, &mut backup) };
        assert_eq!(data, [5, 9, 1, 8]);
    }

    #[test]
    fn test_swap_same_index() {
        let mut data = [1i32, 2, 3, 4, 5];
        let mut backup = [MaybeUninit::uninit(); 4];
        let slice = Slice::from_array(&mut data);
        unsafe { slice.swap(2, 2, &mut backup) };
        assert_eq!(data, [1, 2, 3, 4, 5]);
    }

    #[test]
    #[should_panic(expected = "cannot hold an item")]
    fn test_swap_small_backup() {
        let mut data = [1i32, 2];
        let mut backup = [MaybeUninit::uninit(); 2];
        let slice = Slice::from_array(&mut data);
        unsafe { slice.swap(0, 1, &mut backup) };
    }

    #[test]
    fn test_swap_with_slice() {
        let mut lhs = [1i32, 2, 3, 4, 5];
        let mut rhs = [6i32, 7, 8, 9, 0];
        let mut backup = [MaybeUninit::uninit(); 4];
        let a = Slice::from_array(&mut lhs);
        let b = Slice::from_array(&mut rhs);
        unsafe { a.swap_with_slice(b, &mut backup) };
        assert_eq!(lhs, [6, 7, 8, 9, 0]);
        assert_eq!(rhs, [1, 2, 3, 4, 5]);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "overlap")]
    fn test_swap_with_slice_rejects_overlap() {
        let mut data = [1i32, 2, 3, 4];
        let mut backup = [MaybeUninit::uninit(); 4];
        let slice = Slice::from_array(&mut data);
        let a = slice.sub(0, 3).unwrap();
        let b = slice.sub(1, 4).unwrap();
        unsafe { a.swap_with_slice(b, &mut backup) };
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_swap_with_slice_length_mismatch() {
        let mut lhs = [1i32, 2, 3];
        let mut rhs = [4i32, 5];
        let mut backup = [MaybeUninit::uninit(); 4];
        let a = Slice::from_array(&mut lhs);
        let b = Slice::from_array(&mut rhs);
        unsafe { a.swap_with_slice(b, &mut backup) };
    }

    #[test]
    fn test_reverse() {
        let mut backup = [MaybeUninit::uninit(); 4];

        let mut data = [1i32, 2, 3];
        unsafe { Slice::from_array(&mut data).reverse(&mut backup) };
        assert_eq!(data, [3, 2, 1]);

        let mut data = [1i32, 2, 3, 4];
        unsafe { Slice::from_array(&mut data).reverse(&mut backup) };
        assert_eq!(data, [4, 3, 2, 1]);

        let mut data = [7i32];
        unsafe { Slice::from_array(&mut data).reverse(&mut backup) };
        assert_eq!(data, [7]);

        unsafe { Slice::empty(4).unwrap().reverse(&mut backup) };
    }
}
