//! The untyped slice value: construction, accessors and sub-ranging.

use std::{marker::PhantomData, mem, num::NonZeroUsize, ptr::NonNull, slice};

use bytemuck::NoUninit;

use crate::error::{Error, Result};

/// Item size of `T`, rejected at compile time for zero-sized types.
const fn item_size_of<T>() -> NonZeroUsize {
    const {
        match NonZeroUsize::new(mem::size_of::<T>()) {
            Some(size) => size,
            None => panic!("zero-sized types cannot be sliced"),
        }
    }
}

/// A run of `len` contiguous items of `item_size` bytes each, starting at `ptr`.
///
/// A `Slice` is a fat pointer: it borrows its backing storage for `'a` and never
/// owns or frees it. It is `Copy`, and several slices may address the same
/// storage at once. Operations that read are safe; operations that write are
/// `unsafe` and list their aliasing requirements.
///
/// Invariants: `ptr` is never null and `item_size` is never zero. An empty slice
/// still carries a non-null base.
///
/// # Example
///
/// ```
/// use rawslice_core::Slice;
///
/// let mut data = [1i32, 2, 3, 4, 5];
/// let slice = Slice::from_array(&mut data);
/// let tail = slice.advance(2).unwrap();
/// assert_eq!(tail.len(), 3);
/// assert_eq!(unsafe { *tail.first().cast::<i32>() }, 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Slice<'a> {
    ptr: NonNull<u8>,
    item_size: usize,
    len: usize,
    _marker: PhantomData<&'a mut [u8]>,
}

impl<'a> Slice<'a> {
    /// Creates a slice from already validated parts.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `item_size * len` bytes for `'a` and
    /// every item must be initialized. Writing through the slice additionally
    /// requires the region to be writable.
    pub const unsafe fn from_non_null(ptr: NonNull<u8>, item_size: NonZeroUsize, len: usize) -> Self {
        Self {
            ptr,
            item_size: item_size.get(),
            len,
            _marker: PhantomData,
        }
    }

    /// Creates a slice from a raw base pointer, item size and length.
    ///
    /// Fails on a null `ptr` or a zero `item_size`.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::from_non_null`].
    pub unsafe fn from_raw_parts(ptr: *mut u8, item_size: usize, len: usize) -> Result<Self> {
        let Some(ptr) = NonNull::new(ptr) else {
            tracing::debug!(item_size, len, "rejected slice with null base");
            return Err(Error::NullPointer);
        };
        let Some(item_size) = NonZeroUsize::new(item_size) else {
            tracing::debug!(len, "rejected slice with zero item size");
            return Err(Error::ZeroItemSize);
        };
        // SAFETY: forwarded from the caller.
        Ok(unsafe { Self::from_non_null(ptr, item_size, len) })
    }

    /// Creates a slice from a typed pointer, using `size_of::<T>()` as the item size.
    ///
    /// # Safety
    ///
    /// `ptr` must point to `len` initialized values of `T` valid for `'a`.
    pub unsafe fn from_typed_ptr<T: NoUninit>(ptr: *mut T, len: usize) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        unsafe { Self::from_raw_parts(ptr.cast(), item_size_of::<T>().get(), len) }
    }

    /// Creates the slice lying between `start` (inclusive) and `end` (exclusive).
    ///
    /// The byte distance from `start` to `end` must be non-negative and a
    /// multiple of `item_size`.
    ///
    /// # Safety
    ///
    /// Both pointers must address the same allocation and the items between
    /// them must be valid as described in [`Slice::from_non_null`].
    pub unsafe fn from_ptrdiff(start: *mut u8, end: *mut u8, item_size: usize) -> Result<Self> {
        if start.is_null() || end.is_null() {
            tracing::debug!(
                start_null = start.is_null(),
                end_null = end.is_null(),
                "rejected slice with null bound"
            );
            return Err(Error::NullPointer);
        }
        if item_size == 0 {
            return Err(Error::ZeroItemSize);
        }

        let diff = end.addr().wrapping_sub(start.addr()) as isize;
        if diff < 0 {
            tracing::debug!(diff, "rejected slice with end before start");
            return Err(Error::NegativeDistance { diff });
        }
        let diff = diff as usize;
        if diff % item_size != 0 {
            tracing::debug!(diff, item_size, "rejected slice with partial trailing item");
            return Err(Error::UnalignedDistance { diff, item_size });
        }

        // SAFETY: forwarded from the caller.
        unsafe { Self::from_raw_parts(start, item_size, diff / item_size) }
    }

    /// Creates a slice spanning all of `items`.
    pub fn from_mut_slice<T: NoUninit>(items: &'a mut [T]) -> Self {
        let len = items.len();
        let ptr = NonNull::from(items).cast::<u8>();
        // SAFETY: the region comes from a live exclusive borrow of initialized `T`s.
        unsafe { Self::from_non_null(ptr, item_size_of::<T>(), len) }
    }

    /// Creates a slice spanning a whole array, inferring item size and length
    /// from its type.
    pub fn from_array<T: NoUninit, const N: usize>(array: &'a mut [T; N]) -> Self {
        Self::from_mut_slice(array.as_mut_slice())
    }

    /// Creates a read-only slice spanning all of `items`.
    ///
    /// The storage behind the returned slice (and every slice derived from it)
    /// must never be written through.
    pub fn from_slice<T: NoUninit>(items: &'a [T]) -> Self {
        let len = items.len();
        let ptr = NonNull::from(items).cast::<u8>();
        // SAFETY: the region comes from a live shared borrow of initialized `T`s.
        unsafe { Self::from_non_null(ptr, item_size_of::<T>(), len) }
    }

    /// Replaces the length.
    ///
    /// # Safety
    ///
    /// The new extent must stay inside the backing storage.
    pub unsafe fn with_len(self, len: usize) -> Self {
        Self { len, ..self }
    }

    /// Replaces the base pointer.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::from_raw_parts`] for the new base.
    pub unsafe fn with_ptr(self, ptr: *mut u8) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        unsafe { Self::from_raw_parts(ptr, self.item_size, self.len) }
    }

    /// Replaces the item size.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::from_raw_parts`] for the new item size.
    pub unsafe fn with_item_size(self, item_size: usize) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        unsafe { Self::from_raw_parts(self.ptr.as_ptr(), item_size, self.len) }
    }

    /// Number of items.
    pub const fn len(self) -> usize {
        self.len
    }

    /// Size of each item in bytes.
    pub const fn item_size(self) -> usize {
        self.item_size
    }

    /// Returns `true` if the slice has no items.
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Total size in bytes, `item_size * len`.
    pub const fn byte_size(self) -> usize {
        self.item_size * self.len
    }

    /// The base pointer.
    pub const fn as_ptr(self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// The base pointer as `NonNull`.
    pub const fn as_non_null(self) -> NonNull<u8> {
        self.ptr
    }

    /// All bytes of the slice.
    pub fn as_bytes(self) -> &'a [u8] {
        // SAFETY: the region is readable for `'a` by construction.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.byte_size()) }
    }

    /// Iterates over the bytes of each item, in index order.
    pub fn items(self) -> impl ExactSizeIterator<Item = &'a [u8]> {
        self.as_bytes().chunks_exact(self.item_size)
    }

    /// Computes the address of the item at signed index `i`.
    ///
    /// No bounds check is performed and nothing is dereferenced. Negative
    /// indices address items before the base.
    pub fn get(self, i: isize) -> *mut u8 {
        self.ptr
            .as_ptr()
            .wrapping_offset(i.wrapping_mul(self.item_size as isize))
    }

    /// Address of the first item.
    pub fn first(self) -> *mut u8 {
        self.get(0)
    }

    /// Address of the last item.
    ///
    /// On an empty slice this is the address one item before the base; check
    /// [`Slice::is_empty`] before dereferencing it.
    pub fn last(self) -> *mut u8 {
        self.get(self.len as isize - 1)
    }

    /// Sub-slices `self` to items `start..end`.
    ///
    /// Fails unless `start <= end <= len`.
    pub fn sub(self, start: usize, end: usize) -> Result<Self> {
        if start > end || end > self.len {
            tracing::debug!(start, end, len = self.len, "rejected sub-range");
            return Err(Error::InvalidRange {
                start,
                end,
                len: self.len,
            });
        }
        Ok(self.sub_in_bounds(start, end))
    }

    /// Sub-slices `self` to items `start..end` using unchecked signed offsets.
    ///
    /// Indices may be negative or exceed `len`; the result is not clamped.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    ///
    /// # Safety
    ///
    /// Both addresses must lie inside, or one past, the backing storage.
    pub unsafe fn sub_unchecked(self, start: isize, end: isize) -> Self {
        assert!(start <= end, "sub-range start {start} exceeds end {end}");

        let ptr = self.get(start);
        Self {
            // SAFETY: the caller keeps the address inside the backing storage.
            ptr: unsafe { NonNull::new_unchecked(ptr) },
            len: (end - start) as usize,
            ..self
        }
    }

    /// Drops the first `offset` items.
    ///
    /// Fails if `offset > len`.
    pub fn advance(self, offset: usize) -> Result<Self> {
        self.sub(offset, self.len)
    }

    /// Moves the base by `offset` items, shrinking the length accordingly.
    ///
    /// A negative offset extends the slice backwards.
    ///
    /// # Panics
    ///
    /// Panics if `offset > len`.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::sub_unchecked`].
    pub unsafe fn advance_unchecked(self, offset: isize) -> Self {
        // SAFETY: forwarded from the caller.
        unsafe { self.sub_unchecked(offset, self.len as isize) }
    }

    /// Splits `self` into items `0..index` and `index..len`.
    ///
    /// Fails if `index > len`.
    pub fn split_at(self, index: usize) -> Result<(Self, Self)> {
        if index > self.len {
            tracing::debug!(index, len = self.len, "rejected split index");
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }
        Ok((
            self.sub_in_bounds(0, index),
            self.sub_in_bounds(index, self.len),
        ))
    }

    /// Returns `true` if `self` and `other` share at least one byte.
    pub fn overlaps(self, other: Slice<'_>) -> bool {
        let (a, b) = (self.ptr.as_ptr().addr(), other.ptr.as_ptr().addr());
        let (a_size, b_size) = (self.byte_size(), other.byte_size());
        a_size != 0 && b_size != 0 && a < b + b_size && b < a + a_size
    }

    /// Sub-range with `start <= end <= len` already established.
    pub(crate) fn sub_in_bounds(self, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= self.len);
        Self {
            // SAFETY: `start <= len`, so the offset stays inside or one past the region.
            ptr: unsafe { self.ptr.add(start * self.item_size) },
            len: end - start,
            ..self
        }
    }
}

impl Slice<'static> {
    /// Creates an empty slice with the given item size.
    ///
    /// The base is a dangling, non-null pointer that is never dereferenced.
    pub fn empty(item_size: usize) -> Result<Self> {
        let item_size = NonZeroUsize::new(item_size).ok_or(Error::ZeroItemSize)?;
        // SAFETY: zero bytes are addressed.
        Ok(unsafe { Self::from_non_null(NonNull::dangling(), item_size, 0) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_at(ptr: *mut u8) -> i32 {
        unsafe { *ptr.cast::<i32>() }
    }

    #[test]
    fn test_new_rejects_invalid_parts() {
        let mut data = [0u8; 4];
        assert!(matches!(
            unsafe { Slice::from_raw_parts(std::ptr::null_mut(), 1, 0) },
            Err(Error::NullPointer)
        ));
        assert!(matches!(
            unsafe { Slice::from_raw_parts(data.as_mut_ptr(), 0, 4) },
            Err(Error::ZeroItemSize)
        ));
        let slice = unsafe { Slice::from_raw_parts(data.as_mut_ptr(), 2, 2) }.unwrap();
        assert_eq!(slice.as_ptr(), data.as_mut_ptr());
        assert_eq!(slice.item_size(), 2);
        assert_eq!(slice.len(), 2);
    }

    #[test]
    fn test_from_array() {
        let mut data = [1i32, 2, 3];
        let base = data.as_mut_ptr().cast::<u8>();
        let slice = Slice::from_array(&mut data);
        assert_eq!(slice.as_ptr(), base);
        assert_eq!(slice.item_size(), 4);
        assert_eq!(slice.len(), 3);
        assert_eq!(slice.byte_size(), 12);
    }

    #[test]
    fn test_from_typed_ptr() {
        let mut data = [1u16, 2, 3, 4, 5];
        let slice = unsafe { Slice::from_typed_ptr(data.as_mut_ptr(), 5) }.unwrap();
        assert_eq!(slice.as_ptr(), data.as_mut_ptr().cast::<u8>());
        assert_eq!(slice.item_size(), 2);
        assert_eq!(slice.len(), 5);
    }

    #[test]
    fn test_from_ptrdiff() {
        let mut data = [1i32, 2, 3, 4, 5];
        let base = data.as_mut_ptr();
        unsafe {
            let slice = Slice::from_ptrdiff(base.cast(), base.cast(), 4).unwrap();
            assert_eq!(slice.as_ptr(), base.cast::<u8>());
            assert_eq!(slice.len(), 0);

            let slice = Slice::from_ptrdiff(base.cast(), base.add(5).cast(), 4).unwrap();
            assert_eq!(slice.len(), 5);

            let slice = Slice::from_ptrdiff(base.add(1).cast(), base.add(4).cast(), 4).unwrap();
            assert_eq!(slice.as_ptr(), base.add(1).cast::<u8>());
            assert_eq!(slice.len(), 3);

            assert!(matches!(
                Slice::from_ptrdiff(base.add(2).cast(), base.cast(), 4),
                Err(Error::NegativeDistance { diff: -8 })
            ));
            assert!(matches!(
                Slice::from_ptrdiff(base.cast(), base.cast::<u8>().add(6), 4),
                Err(Error::UnalignedDistance {
                    diff: 6,
                    item_size: 4
                })
            ));
        }
    }

    #[test]
    fn test_from_ptrdiff_null_bounds() {
        let mut data = [0u8; 6];
        let base = data.as_mut_ptr();
        unsafe {
            assert!(matches!(
                Slice::from_ptrdiff(std::ptr::null_mut(), base.add(6), 3),
                Err(Error::NullPointer)
            ));
            assert!(matches!(
                Slice::from_ptrdiff(base, std::ptr::null_mut(), 3),
                Err(Error::NullPointer)
            ));
        }
    }

    #[test]
    fn test_empty() {
        let slice = Slice::empty(8).unwrap();
        assert!(slice.is_empty());
        assert_eq!(slice.item_size(), 8);
        assert_eq!(slice.byte_size(), 0);
        assert!(!slice.as_ptr().is_null());
        assert!(slice.as_bytes().is_empty());
        assert!(matches!(Slice::empty(0), Err(Error::ZeroItemSize)));
    }

    #[test]
    fn test_with_len() {
        let mut data = [1i32, 2, 3];
        let slice = Slice::from_array(&mut data);
        let shorter = unsafe { slice.with_len(1) };
        assert_eq!(shorter.len(), 1);
        assert_eq!(shorter.as_ptr(), slice.as_ptr());
        assert_eq!(shorter.item_size(), slice.item_size());
    }

    #[test]
    fn test_with_item_size() {
        let mut data = [0u8; 8];
        let slice = Slice::from_array(&mut data);
        let slice = unsafe { slice.with_len(2).with_item_size(4) }.unwrap();
        assert_eq!(slice.byte_size(), 8);
        assert!(matches!(
            unsafe { slice.with_item_size(0) },
            Err(Error::ZeroItemSize)
        ));
        assert!(matches!(
            unsafe { slice.with_ptr(std::ptr::null_mut()) },
            Err(Error::NullPointer)
        ));
    }

    #[test]
    fn test_get() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);
        assert_eq!(int_at(slice.get(0)), 1);
        assert_eq!(int_at(slice.get(4)), 5);
        assert_eq!(slice.get(3), slice.get(2).wrapping_add(4));

        let tail = slice.sub(1, 5).unwrap();
        assert_eq!(tail.get(-1), slice.first());
        assert_eq!(int_at(tail.get(-1)), 1);
    }

    #[test]
    fn test_first_last() {
        let mut data = [1i32, 2, 3];
        let slice = Slice::from_array(&mut data);
        assert_eq!(int_at(slice.first()), 1);
        assert_eq!(int_at(slice.last()), 3);
        assert_eq!(slice.last(), slice.get(2));
    }

    #[test]
    fn test_sub() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);

        let sub = slice.sub(0, 0).unwrap();
        assert_eq!(sub.as_ptr(), slice.as_ptr());
        assert_eq!(sub.len(), 0);

        let sub = slice.sub(0, 3).unwrap();
        assert_eq!(sub.as_ptr(), slice.as_ptr());
        assert_eq!(sub.len(), 3);

        let sub = slice.sub(2, 4).unwrap();
        assert_eq!(sub.as_ptr(), slice.get(2));
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.item_size(), 4);

        assert!(matches!(
            slice.sub(3, 2),
            Err(Error::InvalidRange {
                start: 3,
                end: 2,
                len: 5
            })
        ));
        assert!(slice.sub(0, 6).is_err());
    }

    #[test]
    fn test_sub_unchecked_negative() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);
        unsafe {
            let middle = slice.sub(2, 5).unwrap();
            let sub = middle.sub_unchecked(-2, 1);
            assert_eq!(sub.as_ptr(), slice.as_ptr());
            assert_eq!(sub.len(), 3);

            let end = slice.sub(3, 5).unwrap();
            let sub = end.sub_unchecked(-2, -1);
            assert_eq!(sub.as_ptr(), slice.get(1));
            assert_eq!(sub.len(), 1);
        }
    }

    #[test]
    #[should_panic(expected = "exceeds end")]
    fn test_sub_unchecked_reversed_panics() {
        let mut data = [1i32, 2, 3];
        let slice = Slice::from_array(&mut data);
        let _ = unsafe { slice.sub_unchecked(2, 1) };
    }

    #[test]
    fn test_advance() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);

        let advanced = slice.advance(0).unwrap();
        assert_eq!(advanced.as_ptr(), slice.as_ptr());
        assert_eq!(advanced.len(), 5);

        let advanced = slice.advance(2).unwrap();
        assert_eq!(advanced.len(), 3);
        assert_eq!(int_at(advanced.first()), 3);

        let advanced = slice.advance(5).unwrap();
        assert_eq!(advanced.as_ptr(), slice.get(5));
        assert!(advanced.is_empty());

        assert!(slice.advance(6).is_err());

        let tail = slice.advance(1).unwrap();
        let back = unsafe { tail.advance_unchecked(-1) };
        assert_eq!(back.as_ptr(), slice.as_ptr());
        assert_eq!(back.len(), 5);
    }

    #[test]
    fn test_split_at() {
        let mut data = [1i32, 2, 3, 4, 5];
        let slice = Slice::from_array(&mut data);

        let (lhs, rhs) = slice.split_at(2).unwrap();
        assert_eq!(lhs.as_ptr(), slice.as_ptr());
        assert_eq!(lhs.len(), 2);
        assert_eq!(rhs.as_ptr(), slice.get(2));
        assert_eq!(rhs.len(), 3);

        let (lhs, rhs) = slice.split_at(0).unwrap();
        assert_eq!(lhs.len(), 0);
        assert_eq!(rhs.as_ptr(), slice.as_ptr());
        assert_eq!(rhs.len(), 5);

        let (lhs, rhs) = slice.split_at(5).unwrap();
        assert_eq!(lhs.len(), 5);
        assert_eq!(rhs.as_ptr(), slice.get(5));
        assert_eq!(rhs.len(), 0);

        assert!(matches!(
            slice.split_at(6),
            Err(Error::IndexOutOfBounds { index: 6, len: 5 })
        ));
    }

    #[test]
    fn test_split_empty() {
        let slice = Slice::empty(1).unwrap();
        let (lhs, rhs) = slice.split_at(0).unwrap();
        assert_eq!(lhs.as_ptr(), slice.as_ptr());
        assert_eq!(rhs.as_ptr(), slice.as_ptr());
        assert!(lhs.is_empty() && rhs.is_empty());
    }

    #[test]
    fn test_overlaps() {
        let mut data = [0u32; 6];
        let slice = Slice::from_array(&mut data);
        let a = slice.sub(0, 3).unwrap();
        let b = slice.sub(2, 5).unwrap();
        let c = slice.sub(3, 6).unwrap();
        assert!(a.overlaps(b));
        assert!(b.overlaps(a));
        assert!(!a.overlaps(c));
        assert!(!a.overlaps(slice.sub(1, 1).unwrap()));
    }

    #[test]
    fn test_items() {
        let mut data = [0x0102u16, 0x0304];
        let slice = Slice::from_array(&mut data);
        let items: Vec<&[u8]> = slice.items().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], &0x0102u16.to_ne_bytes());
        assert_eq!(items[1], &0x0304u16.to_ne_bytes());
    }
}
