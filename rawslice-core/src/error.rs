//! Error types for slice construction and checked operations.

use thiserror::Error;

/// Result type for slice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported where untrusted pointers, sizes or indices enter a slice.
///
/// Contract violations between two operands of the same call (for example
/// comparing slices of different item sizes) are not represented here; they
/// panic, the same way `<[T]>::copy_from_slice` does.
#[derive(Debug, Error)]
pub enum Error {
    /// A base pointer was null.
    #[error("slice base pointer is null")]
    NullPointer,

    /// An item size of zero was requested.
    #[error("slice item size must be greater than zero")]
    ZeroItemSize,

    /// The end pointer lies before the start pointer.
    #[error("end pointer lies {diff} bytes before start pointer")]
    NegativeDistance {
        /// Signed byte distance from start to end.
        diff: isize,
    },

    /// The byte distance between two pointers is not a whole number of items.
    #[error("byte distance {diff} is not a multiple of item size {item_size}")]
    UnalignedDistance {
        /// Byte distance from start to end.
        diff: usize,
        /// Requested item size.
        item_size: usize,
    },

    /// A sub-range is reversed or reaches past the end.
    #[error("invalid range {start}..{end} for slice of length {len}")]
    InvalidRange {
        /// Requested start index.
        start: usize,
        /// Requested end index.
        end: usize,
        /// Length of the sliced value.
        len: usize,
    },

    /// An index lies past the end.
    #[error("index {index} out of bounds for slice of length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Length of the sliced value.
        len: usize,
    },

    /// A destination or output buffer cannot hold the data.
    #[error("buffer of {actual} bytes is too small, {required} bytes required")]
    BufferTooSmall {
        /// Bytes needed.
        required: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The item size of an untyped slice does not match the target type.
    #[error("item size {actual} does not match expected size {expected}")]
    ItemSizeMismatch {
        /// Size of the target item type.
        expected: usize,
        /// Item size carried by the slice.
        actual: usize,
    },

    /// A base pointer is not aligned for the target type.
    #[error("address {addr:#x} is not aligned to {align} bytes")]
    Misaligned {
        /// Offending address.
        addr: usize,
        /// Required alignment.
        align: usize,
    },

    /// Two regions that must be disjoint share bytes.
    #[error("memory regions overlap")]
    Overlap,

    /// Custom memory primitives were already installed for this process.
    #[error("memory primitives are already installed")]
    HooksAlreadyInstalled,

    /// A written C string could not be read back.
    #[error(transparent)]
    Nul(#[from] std::ffi::FromBytesUntilNulError),
}
