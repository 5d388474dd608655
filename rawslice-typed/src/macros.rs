/// Declares a named typed slice for an item type.
///
/// Expands to a type alias `$name<'a> = TypedSlice<'a, $ty>`, so the alias has
/// every typed operation, and to a compile-time check that `$ty` is a
/// non-zero-sized [`NoUninit`](bytemuck::NoUninit) type.
///
/// # Example
///
/// ```
/// use bytemuck::NoUninit;
/// use rawslice_typed::def_typed_slice;
///
/// #[repr(C)]
/// #[derive(Clone, Copy, NoUninit)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// def_typed_slice!(
///     /// A run of points.
///     pub PointSlice, Point
/// );
///
/// let mut points = [Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
/// let slice = PointSlice::from_array(&mut points);
/// assert_eq!(slice.len(), 2);
/// assert_eq!(unsafe { (*slice.last()).x }, 3);
/// ```
///
/// An item type with padding is rejected:
///
/// ```compile_fail
/// use rawslice_typed::def_typed_slice;
///
/// #[repr(C)]
/// #[derive(Clone, Copy)]
/// struct Padded {
///     a: u8,
///     b: u32,
/// }
///
/// def_typed_slice!(PaddedSlice, Padded);
/// ```
#[macro_export]
macro_rules! def_typed_slice {
    ($(#[$meta:meta])* $vis:vis $name:ident, $ty:ty) => {
        $(#[$meta])*
        $vis type $name<'a> = $crate::TypedSlice<'a, $ty>;

        const _: () = {
            const fn assert_no_uninit<T: $crate::bytemuck::NoUninit>() {}
            assert_no_uninit::<$ty>();
            assert!(
                ::core::mem::size_of::<$ty>() > 0,
                "zero-sized types cannot be sliced"
            );
        };
    };
}
