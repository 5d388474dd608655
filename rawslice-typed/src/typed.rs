//! The typed view: a [`Slice`] whose item size is implied by `T`.

use std::{
    cmp::Ordering,
    fmt,
    marker::PhantomData,
    mem::{self, MaybeUninit},
    num::NonZeroUsize,
    ptr::NonNull,
    slice,
};

use bytemuck::{NoUninit, Pod};
use rawslice_core::{Error, Result, Slice};

#[cfg(any(feature = "sort", feature = "bsearch"))]
use rawslice_core::RawComparator;

/// A run of `len` contiguous values of `T` starting at `ptr`.
///
/// Every operation delegates to the [`Slice`] operation of the same name, so
/// the two share preconditions and results exactly. Only the signatures
/// differ: addresses are `*mut T`, comparators and predicates see `&T`, and
/// the item size is `size_of::<T>()`.
///
/// `T` must be [`NoUninit`] so that byte-wise comparison never reads padding,
/// and must not be zero-sized.
///
/// # Example
///
/// ```
/// use rawslice_typed::TypedSlice;
///
/// let mut data = [1i32, 2, 3, 4, 5];
/// let slice = TypedSlice::from_array(&mut data);
/// let (head, tail) = slice.split_at(2).unwrap();
/// assert_eq!(head.as_slice(), &[1, 2]);
/// assert_eq!(tail.as_slice(), &[3, 4, 5]);
/// ```
pub struct TypedSlice<'a, T> {
    ptr: NonNull<T>,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

impl<T> Clone for TypedSlice<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedSlice<'_, T> {}

impl<T> fmt::Debug for TypedSlice<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSlice")
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: NoUninit> TypedSlice<'a, T> {
    const ITEM_SIZE: NonZeroUsize = match NonZeroUsize::new(mem::size_of::<T>()) {
        Some(size) => size,
        None => panic!("zero-sized types cannot be sliced"),
    };

    /// Creates a typed slice spanning all of `items`.
    pub fn from_mut_slice(items: &'a mut [T]) -> Self {
        Self::from_untyped_unchecked(Slice::from_mut_slice(items))
    }

    /// Creates a typed slice spanning a whole array.
    pub fn from_array<const N: usize>(array: &'a mut [T; N]) -> Self {
        Self::from_untyped_unchecked(Slice::from_array(array))
    }

    /// Creates a read-only typed slice spanning all of `items`.
    ///
    /// The storage must never be written through the returned slice or any
    /// slice derived from it.
    pub fn from_slice(items: &'a [T]) -> Self {
        Self::from_untyped_unchecked(Slice::from_slice(items))
    }

    /// Creates a typed slice from a raw pointer and a length.
    ///
    /// Fails on a null or misaligned `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to `len` initialized values of `T` valid for `'a`.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        let untyped = unsafe { Slice::from_typed_ptr(ptr, len) }?;
        check_aligned::<T>(untyped)?;
        Ok(Self::from_untyped_unchecked(untyped))
    }

    /// Creates the typed slice lying between `start` (inclusive) and `end`
    /// (exclusive).
    ///
    /// # Safety
    ///
    /// Same as [`Slice::from_ptrdiff`].
    pub unsafe fn from_ptrdiff(start: *mut T, end: *mut T) -> Result<Self> {
        // SAFETY: forwarded from the caller.
        let untyped =
            unsafe { Slice::from_ptrdiff(start.cast(), end.cast(), Self::ITEM_SIZE.get()) }?;
        check_aligned::<T>(untyped)?;
        Ok(Self::from_untyped_unchecked(untyped))
    }

    /// Replaces the length.
    ///
    /// # Safety
    ///
    /// The new extent must stay inside the backing storage.
    pub unsafe fn with_len(self, len: usize) -> Self {
        // SAFETY: forwarded from the caller.
        Self::from_untyped_unchecked(unsafe { self.to_untyped().with_len(len) })
    }

    /// Number of values.
    pub const fn len(self) -> usize {
        self.len
    }

    /// Returns `true` if the slice has no values.
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }

    /// Total size in bytes.
    pub fn byte_size(self) -> usize {
        self.to_untyped().byte_size()
    }

    /// The base pointer.
    pub const fn as_ptr(self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// The base pointer as `NonNull`.
    pub const fn as_non_null(self) -> NonNull<T> {
        self.ptr
    }

    /// Views the values as a standard slice.
    pub fn as_slice(self) -> &'a [T] {
        // SAFETY: the base is aligned and addresses `len` initialized values
        // readable for `'a`.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Iterates over the values.
    pub fn iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// See [`Slice::get`].
    pub fn get(self, i: isize) -> *mut T {
        self.to_untyped().get(i).cast()
    }

    /// See [`Slice::first`].
    pub fn first(self) -> *mut T {
        self.to_untyped().first().cast()
    }

    /// See [`Slice::last`].
    pub fn last(self) -> *mut T {
        self.to_untyped().last().cast()
    }

    /// See [`Slice::sub`].
    pub fn sub(self, start: usize, end: usize) -> Result<Self> {
        self.to_untyped()
            .sub(start, end)
            .map(Self::from_untyped_unchecked)
    }

    /// See [`Slice::sub_unchecked`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::sub_unchecked`].
    pub unsafe fn sub_unchecked(self, start: isize, end: isize) -> Self {
        // SAFETY: forwarded from the caller.
        Self::from_untyped_unchecked(unsafe { self.to_untyped().sub_unchecked(start, end) })
    }

    /// See [`Slice::advance`].
    pub fn advance(self, offset: usize) -> Result<Self> {
        self.to_untyped()
            .advance(offset)
            .map(Self::from_untyped_unchecked)
    }

    /// See [`Slice::advance_unchecked`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::advance_unchecked`].
    pub unsafe fn advance_unchecked(self, offset: isize) -> Self {
        // SAFETY: forwarded from the caller.
        Self::from_untyped_unchecked(unsafe { self.to_untyped().advance_unchecked(offset) })
    }

    /// See [`Slice::split_at`].
    pub fn split_at(self, index: usize) -> Result<(Self, Self)> {
        let (lhs, rhs) = self.to_untyped().split_at(index)?;
        Ok((
            Self::from_untyped_unchecked(lhs),
            Self::from_untyped_unchecked(rhs),
        ))
    }

    /// See [`Slice::primitive_eq`].
    pub fn primitive_eq(self, other: TypedSlice<'_, T>) -> bool {
        self.to_untyped().primitive_eq(other.to_untyped())
    }

    /// See [`Slice::eq_by`].
    pub fn eq_by<F>(self, other: TypedSlice<'_, T>, mut cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.to_untyped()
            .eq_by(other.to_untyped(), |lhs, rhs| cmp(item_ref(lhs), item_ref(rhs)))
    }

    /// See [`Slice::primitive_starts_with`].
    pub fn primitive_starts_with(self, prefix: TypedSlice<'_, T>) -> bool {
        self.to_untyped().primitive_starts_with(prefix.to_untyped())
    }

    /// See [`Slice::primitive_ends_with`].
    pub fn primitive_ends_with(self, postfix: TypedSlice<'_, T>) -> bool {
        self.to_untyped().primitive_ends_with(postfix.to_untyped())
    }

    /// See [`Slice::starts_with_by`].
    pub fn starts_with_by<F>(self, prefix: TypedSlice<'_, T>, mut cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.to_untyped()
            .starts_with_by(prefix.to_untyped(), |lhs, rhs| cmp(item_ref(lhs), item_ref(rhs)))
    }

    /// See [`Slice::ends_with_by`].
    pub fn ends_with_by<F>(self, postfix: TypedSlice<'_, T>, mut cmp: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.to_untyped()
            .ends_with_by(postfix.to_untyped(), |lhs, rhs| cmp(item_ref(lhs), item_ref(rhs)))
    }

    /// See [`Slice::overlaps`].
    pub fn overlaps(self, other: TypedSlice<'_, T>) -> bool {
        self.to_untyped().overlaps(other.to_untyped())
    }

    /// See [`Slice::copy_from`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::copy_from`].
    pub unsafe fn copy_from(self, src: TypedSlice<'_, T>) {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().copy_from(src.to_untyped()) }
    }

    /// See [`Slice::copy_from_non_overlapping`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::copy_from_non_overlapping`].
    pub unsafe fn copy_from_non_overlapping(self, src: TypedSlice<'_, T>) {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().copy_from_non_overlapping(src.to_untyped()) }
    }

    /// See [`Slice::try_copy_from`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::try_copy_from`].
    pub unsafe fn try_copy_from(self, src: TypedSlice<'_, T>) -> Result<()> {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().try_copy_from(src.to_untyped()) }
    }

    /// See [`Slice::swap`]. `backup` holds one value during the exchange.
    ///
    /// # Safety
    ///
    /// Same as [`Slice::swap`].
    pub unsafe fn swap(self, i: isize, j: isize, backup: &mut MaybeUninit<T>) {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().swap(i, j, scratch(backup)) }
    }

    /// See [`Slice::swap_with_slice`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::swap_with_slice`].
    pub unsafe fn swap_with_slice(self, other: TypedSlice<'_, T>, backup: &mut MaybeUninit<T>) {
        // SAFETY: forwarded from the caller.
        unsafe {
            self.to_untyped()
                .swap_with_slice(other.to_untyped(), scratch(backup))
        }
    }

    /// See [`Slice::reverse`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::reverse`].
    pub unsafe fn reverse(self, backup: &mut MaybeUninit<T>) {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().reverse(scratch(backup)) }
    }

    /// See [`Slice::find`].
    pub fn find<F>(self, mut pred: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> bool,
    {
        self.to_untyped()
            .find(|item| pred(item_ref(item)))
            .map(NonNull::cast)
    }

    /// See [`Slice::for_each`].
    pub fn for_each<F>(self, mut f: F)
    where
        F: FnMut(NonNull<T>),
    {
        self.to_untyped().for_each(|item| f(item.cast()))
    }

    /// See [`Slice::sort`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::sort`].
    #[cfg(feature = "sort")]
    pub unsafe fn sort(self, cmp: RawComparator) {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().sort(cmp) }
    }

    /// Sorts the values in place with the standard library's stable sort.
    ///
    /// # Safety
    ///
    /// `self` must be writable and no reference to its values may be live.
    #[cfg(feature = "sort")]
    pub unsafe fn sort_by<F>(self, cmp: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        // SAFETY: the caller grants exclusive access to `len` aligned values.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }.sort_by(cmp)
    }

    /// See [`Slice::bsearch`].
    ///
    /// # Safety
    ///
    /// Same as [`Slice::bsearch`].
    #[cfg(feature = "bsearch")]
    pub unsafe fn bsearch(self, key: &T, cmp: RawComparator) -> Option<NonNull<T>> {
        // SAFETY: forwarded from the caller.
        unsafe { self.to_untyped().bsearch(bytemuck::bytes_of(key), cmp) }.map(NonNull::cast)
    }

    /// Binary-searches the sorted values with `f`, which reports how each
    /// probed value orders relative to the target.
    #[cfg(feature = "bsearch")]
    pub fn bsearch_by<F>(self, f: F) -> Option<NonNull<T>>
    where
        F: FnMut(&T) -> Ordering,
    {
        let index = self.as_slice().binary_search_by(f).ok()?;
        // SAFETY: `index < len`.
        Some(unsafe { self.ptr.add(index) })
    }

    /// See [`Slice::write_to`].
    #[cfg(feature = "io")]
    pub fn write_to<W: std::io::Write>(self, w: &mut W) -> std::io::Result<()> {
        self.to_untyped().write_to(w)
    }

    /// See [`Slice::write_ln_to`].
    #[cfg(feature = "io")]
    pub fn write_ln_to<W: std::io::Write>(self, w: &mut W) -> std::io::Result<()> {
        self.to_untyped().write_ln_to(w)
    }

    /// See [`Slice::write`].
    #[cfg(feature = "io")]
    pub fn write(self) -> std::io::Result<()> {
        self.to_untyped().write()
    }

    /// See [`Slice::write_ln`].
    #[cfg(feature = "io")]
    pub fn write_ln(self) -> std::io::Result<()> {
        self.to_untyped().write_ln()
    }

    /// Forgets the value type. Base and length are preserved.
    pub fn to_untyped(self) -> Slice<'a> {
        // SAFETY: the region was validated when `self` was created.
        unsafe { Slice::from_non_null(self.ptr.cast(), Self::ITEM_SIZE, self.len) }
    }

    /// Reinterprets an untyped slice as a slice of `T`.
    ///
    /// Fails if the item size is not `size_of::<T>()` or the base is not
    /// aligned for `T`. Base and length are preserved.
    ///
    /// # Safety
    ///
    /// Every item must hold a valid value of `T`. For [`Pod`] types use
    /// `TryFrom` instead.
    pub unsafe fn from_untyped(untyped: Slice<'a>) -> Result<Self> {
        if untyped.item_size() != Self::ITEM_SIZE.get() {
            tracing::debug!(
                item_size = untyped.item_size(),
                expected = Self::ITEM_SIZE.get(),
                "rejected typed view with mismatched item size"
            );
            return Err(Error::ItemSizeMismatch {
                expected: Self::ITEM_SIZE.get(),
                actual: untyped.item_size(),
            });
        }
        check_aligned::<T>(untyped)?;
        Ok(Self::from_untyped_unchecked(untyped))
    }

    pub(crate) fn from_untyped_unchecked(untyped: Slice<'a>) -> Self {
        debug_assert_eq!(untyped.item_size(), Self::ITEM_SIZE.get());
        Self {
            ptr: untyped.as_non_null().cast(),
            len: untyped.len(),
            _marker: PhantomData,
        }
    }
}

impl<T: NoUninit> TypedSlice<'static, T> {
    /// Creates an empty typed slice with a dangling, well-aligned base.
    pub fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            len: 0,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: NoUninit> From<TypedSlice<'a, T>> for Slice<'a> {
    fn from(typed: TypedSlice<'a, T>) -> Self {
        typed.to_untyped()
    }
}

impl<'a, T: Pod> TryFrom<Slice<'a>> for TypedSlice<'a, T> {
    type Error = Error;

    fn try_from(untyped: Slice<'a>) -> Result<Self> {
        // SAFETY: every bit pattern is a valid `T`.
        unsafe { Self::from_untyped(untyped) }
    }
}

impl<'a, T: NoUninit> IntoIterator for TypedSlice<'a, T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn check_aligned<T>(untyped: Slice<'_>) -> Result<()> {
    let addr = untyped.as_ptr().addr();
    let align = mem::align_of::<T>();
    if addr % align != 0 {
        tracing::debug!(addr, align, "rejected misaligned typed view");
        return Err(Error::Misaligned { addr, align });
    }
    Ok(())
}

// Item bytes handed out by the untyped layer of a typed slice.
fn item_ref<T>(bytes: &[u8]) -> &T {
    debug_assert_eq!(bytes.len(), mem::size_of::<T>());
    // SAFETY: the bytes are one whole, aligned value of `T` inside a typed slice.
    unsafe { &*bytes.as_ptr().cast::<T>() }
}

fn scratch<T>(backup: &mut MaybeUninit<T>) -> &mut [MaybeUninit<u8>] {
    // SAFETY: every byte of a `MaybeUninit<T>` is a valid `MaybeUninit<u8>`.
    unsafe { slice::from_raw_parts_mut(backup.as_mut_ptr().cast(), mem::size_of::<T>()) }
}
