//! Packing values into byte buffers.
//!
//! ```
//! use rawslice_typed::pack;
//!
//! let mut buf = [0u8; 8];
//! let rest = pack::append(&mut buf, &0x0102u16).unwrap();
//! let rest = pack::append_array(rest, &[3u8, 4, 5]).unwrap();
//! assert_eq!(rest.len(), 3);
//! assert_eq!(&buf[2..5], &[3, 4, 5]);
//! ```

use bytemuck::{NoUninit, Pod};
use rawslice_core::{Error, Result, Slice};

use crate::primitives::U8Slice;

/// Number of items in an array.
pub const fn array_len<T, const N: usize>(_: &[T; N]) -> usize {
    N
}

/// Copies the bytes of `value` to the front of `buffer` and returns the rest.
pub fn append<'b, T: NoUninit>(buffer: &'b mut [u8], value: &T) -> Result<&'b mut [u8]> {
    append_array(buffer, std::slice::from_ref(value))
}

/// Copies the bytes of every value in `values` to the front of `buffer` and
/// returns the rest.
pub fn append_array<'b, T: NoUninit>(buffer: &'b mut [u8], values: &[T]) -> Result<&'b mut [u8]> {
    let bytes = Slice::from_slice(values).as_bytes();
    if buffer.len() < bytes.len() {
        return Err(Error::BufferTooSmall {
            required: bytes.len(),
            actual: buffer.len(),
        });
    }
    let (head, rest) = buffer.split_at_mut(bytes.len());
    head.copy_from_slice(bytes);
    Ok(rest)
}

/// Views the bytes of `value` as a byte slice.
pub fn to_octets<T: Pod>(value: &mut T) -> U8Slice<'_> {
    U8Slice::from_mut_slice(bytemuck::bytes_of_mut(value))
}
