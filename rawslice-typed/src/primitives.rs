//! Typed slices of the fundamental types.

use std::ffi::{
    c_char, c_double, c_float, c_int, c_long, c_longlong, c_schar, c_short, c_uchar, c_uint,
    c_ulong, c_ulonglong, c_ushort,
};

use crate::def_typed_slice;

// C fundamental types
def_typed_slice!(pub CharSlice, c_char);
def_typed_slice!(pub SCharSlice, c_schar);
def_typed_slice!(pub UCharSlice, c_uchar);
def_typed_slice!(pub ShortSlice, c_short);
def_typed_slice!(pub UShortSlice, c_ushort);
def_typed_slice!(pub IntSlice, c_int);
def_typed_slice!(pub UIntSlice, c_uint);
def_typed_slice!(pub LongSlice, c_long);
def_typed_slice!(pub ULongSlice, c_ulong);
def_typed_slice!(pub LongLongSlice, c_longlong);
def_typed_slice!(pub ULongLongSlice, c_ulonglong);
def_typed_slice!(pub FloatSlice, c_float);
def_typed_slice!(pub DoubleSlice, c_double);
def_typed_slice!(pub BoolSlice, bool);

// Fixed-width integers
def_typed_slice!(pub U8Slice, u8);
def_typed_slice!(pub U16Slice, u16);
def_typed_slice!(pub U32Slice, u32);
def_typed_slice!(pub U64Slice, u64);
def_typed_slice!(pub I8Slice, i8);
def_typed_slice!(pub I16Slice, i16);
def_typed_slice!(pub I32Slice, i32);
def_typed_slice!(pub I64Slice, i64);
def_typed_slice!(pub USizeSlice, usize);
def_typed_slice!(pub ISizeSlice, isize);
