//! Replacing the memory primitives.
//!
//! Installation is process-wide, so these tests live in their own binary and
//! share one installed table.

use std::{
    cmp::Ordering,
    sync::{
        Once,
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
    },
};

use rawslice_core::{
    Error, Slice,
    hooks::{self, CoreMemOps, MemOps},
};

struct CountingMemOps {
    compares: AtomicUsize,
    copies: AtomicUsize,
}

impl MemOps for CountingMemOps {
    unsafe fn compare(&self, lhs: *const u8, rhs: *const u8, n: usize) -> Ordering {
        self.compares.fetch_add(1, AtomicOrdering::SeqCst);
        unsafe { CoreMemOps.compare(lhs, rhs, n) }
    }

    unsafe fn copy(&self, dst: *mut u8, src: *const u8, n: usize) {
        self.copies.fetch_add(1, AtomicOrdering::SeqCst);
        unsafe { CoreMemOps.copy(dst, src, n) }
    }
}

static COUNTING: CountingMemOps = CountingMemOps {
    compares: AtomicUsize::new(0),
    copies: AtomicUsize::new(0),
};
static INSTALL: Once = Once::new();

fn install_counting() {
    INSTALL.call_once(|| hooks::install(&COUNTING).unwrap());
}

#[test]
fn test_compare_goes_through_hook() {
    install_counting();

    let a = [1u32, 2, 3];
    let b = [1u32, 2, 3];
    let before = COUNTING.compares.load(AtomicOrdering::SeqCst);
    assert!(Slice::from_slice(&a).primitive_eq(Slice::from_slice(&b)));
    assert!(COUNTING.compares.load(AtomicOrdering::SeqCst) > before);
}

#[test]
fn test_copy_goes_through_hook() {
    install_counting();

    let src = [4u16, 5];
    let mut dst = [0u16; 2];
    let before = COUNTING.copies.load(AtomicOrdering::SeqCst);
    unsafe { Slice::from_array(&mut dst).copy_from(Slice::from_slice(&src)) };
    assert_eq!(dst, src);
    assert!(COUNTING.copies.load(AtomicOrdering::SeqCst) > before);
}

#[test]
fn test_second_install_rejected() {
    install_counting();

    assert!(matches!(
        hooks::install(&CoreMemOps),
        Err(Error::HooksAlreadyInstalled)
    ));
    let active: *const dyn MemOps = hooks::mem_ops();
    let counting: *const dyn MemOps = &COUNTING;
    assert!(std::ptr::addr_eq(active, counting));
}
