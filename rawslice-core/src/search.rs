//! Linear search and iteration, plus `qsort`/`bsearch` delegation.

use std::ptr::NonNull;

#[cfg(any(feature = "sort", feature = "bsearch"))]
use std::ffi::{c_int, c_void};

use crate::slice::Slice;

/// Comparator passed through to the host `qsort` and `bsearch`.
///
/// Receives pointers to two items and returns a negative value, zero or a
/// positive value when the first is less than, equal to or greater than the
/// second.
#[cfg(any(feature = "sort", feature = "bsearch"))]
pub type RawComparator = unsafe extern "C" fn(*const c_void, *const c_void) -> c_int;

impl Slice<'_> {
    /// Returns the address of the first item whose bytes satisfy `pred`.
    ///
    /// Items are visited in index order and the search stops at the first match.
    pub fn find<F>(self, mut pred: F) -> Option<NonNull<u8>>
    where
        F: FnMut(&[u8]) -> bool,
    {
        let index = self.items().position(|item| pred(item))?;
        // SAFETY: `index < len`, so the address lies inside the region.
        Some(unsafe { self.as_non_null().add(index * self.item_size()) })
    }

    /// Calls `f` with the address of every item, in index order.
    pub fn for_each<F>(self, mut f: F)
    where
        F: FnMut(NonNull<u8>),
    {
        for i in 0..self.len() {
            // SAFETY: `i < len`, so the address lies inside the region.
            f(unsafe { self.as_non_null().add(i * self.item_size()) });
        }
    }

    /// Sorts the items in place with the host `qsort`.
    ///
    /// # Safety
    ///
    /// `self` must be writable, and `cmp` must be sound to call on any two
    /// items of the slice.
    #[cfg(feature = "sort")]
    pub unsafe fn sort(self, cmp: RawComparator) {
        if self.len() < 2 {
            return;
        }
        tracing::trace!(len = self.len(), item_size = self.item_size(), "qsort");
        // SAFETY: forwarded from the caller.
        unsafe {
            libc::qsort(
                self.as_ptr().cast::<c_void>(),
                self.len(),
                self.item_size(),
                Some(cmp),
            )
        }
    }

    /// Binary-searches the sorted items for `key` with the host `bsearch`.
    ///
    /// Returns the address of a matching item. When several items match, which
    /// one is returned is unspecified.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not exactly one item long.
    ///
    /// # Safety
    ///
    /// The items must be sorted consistently with `cmp`, and `cmp` must be
    /// sound to call on `key` and any item of the slice.
    #[cfg(feature = "bsearch")]
    pub unsafe fn bsearch(self, key: &[u8], cmp: RawComparator) -> Option<NonNull<u8>> {
        assert_eq!(
            key.len(),
            self.item_size(),
            "search key must be exactly one item long"
        );
        if self.is_empty() {
            return None;
        }
        // SAFETY: forwarded from the caller.
        let found = unsafe {
            libc::bsearch(
                key.as_ptr().cast::<c_void>(),
                self.as_ptr().cast::<c_void>(),
                self.len(),
                self.item_size(),
                Some(cmp),
            )
        };
        NonNull::new(found.cast::<u8>())
    }
}
