//! Writing slice bytes to `std::io` sinks.

use std::io::{self, Write};

use crate::slice::Slice;

impl Slice<'_> {
    /// Writes all bytes of `self` to `w`.
    pub fn write_to<W: Write>(self, w: &mut W) -> io::Result<()> {
        w.write_all(self.as_bytes())
    }

    /// Writes all bytes of `self` to `w`, followed by a newline.
    pub fn write_ln_to<W: Write>(self, w: &mut W) -> io::Result<()> {
        self.write_to(w)?;
        w.write_all(b"\n")
    }

    /// Writes all bytes of `self` to standard output.
    pub fn write(self) -> io::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    /// Writes all bytes of `self` to standard output, followed by a newline.
    pub fn write_ln(self) -> io::Result<()> {
        self.write_ln_to(&mut io::stdout().lock())
    }
}
