//! Equality and prefix/suffix tests.

use std::cmp::Ordering;

use crate::{hooks::mem_ops, slice::Slice};

impl Slice<'_> {
    /// Byte-wise equality: same byte size and identical bytes.
    ///
    /// Item sizes are not compared, so a slice of two `u16`s equals a slice of
    /// four `u8`s with the same bytes.
    pub fn primitive_eq(self, other: Slice<'_>) -> bool {
        let size = self.byte_size();
        if size != other.byte_size() {
            return false;
        }
        if size == 0 {
            return true;
        }
        // SAFETY: both regions are readable for `size` bytes.
        unsafe { mem_ops().compare(self.as_ptr(), other.as_ptr(), size) }.is_eq()
    }

    /// Item-wise equality under `cmp`.
    ///
    /// Slices of different lengths are never equal. Otherwise they are equal
    /// when `cmp` reports [`Ordering::Equal`] for every pair of items at the
    /// same index. `cmp` receives the bytes of one item from each side.
    ///
    /// # Panics
    ///
    /// Panics if the item sizes differ.
    pub fn eq_by<F>(self, other: Slice<'_>, mut cmp: F) -> bool
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.assert_same_item_size(other);
        if self.len() != other.len() {
            return false;
        }
        self.items()
            .zip(other.items())
            .all(|(lhs, rhs)| cmp(lhs, rhs).is_eq())
    }

    /// Returns `true` if the leading bytes of `self` equal all bytes of `prefix`.
    pub fn primitive_starts_with(self, prefix: Slice<'_>) -> bool {
        match self.prefix_window(prefix) {
            Some(head) => head.primitive_eq(prefix),
            None => false,
        }
    }

    /// Returns `true` if the trailing bytes of `self` equal all bytes of `postfix`.
    pub fn primitive_ends_with(self, postfix: Slice<'_>) -> bool {
        match self.postfix_window(postfix) {
            Some(tail) => tail.primitive_eq(postfix),
            None => false,
        }
    }

    /// Returns `true` if the first `prefix.len()` items of `self` equal `prefix`
    /// under `cmp`.
    ///
    /// # Panics
    ///
    /// Panics if the item sizes differ.
    pub fn starts_with_by<F>(self, prefix: Slice<'_>, cmp: F) -> bool
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.assert_same_item_size(prefix);
        match self.prefix_window(prefix) {
            Some(head) => head.eq_by(prefix, cmp),
            None => false,
        }
    }

    /// Returns `true` if the last `postfix.len()` items of `self` equal
    /// `postfix` under `cmp`.
    ///
    /// # Panics
    ///
    /// Panics if the item sizes differ.
    pub fn ends_with_by<F>(self, postfix: Slice<'_>, cmp: F) -> bool
    where
        F: FnMut(&[u8], &[u8]) -> Ordering,
    {
        self.assert_same_item_size(postfix);
        match self.postfix_window(postfix) {
            Some(tail) => tail.eq_by(postfix, cmp),
            None => false,
        }
    }

    fn assert_same_item_size(self, other: Slice<'_>) {
        assert_eq!(
            self.item_size(),
            other.item_size(),
            "compared slices must have the same item size"
        );
    }

    // Leading `other.len()` items, if `self` is large enough in both items and bytes.
    fn prefix_window(self, other: Slice<'_>) -> Option<Self> {
        if self.byte_size() < other.byte_size() || self.len() < other.len() {
            return None;
        }
        Some(self.sub_in_bounds(0, other.len()))
    }

    fn postfix_window(self, other: Slice<'_>) -> Option<Self> {
        if self.byte_size() < other.byte_size() || self.len() < other.len() {
            return None;
        }
        Some(self.sub_in_bounds(self.len() - other.len(), self.len()))
    }
}
