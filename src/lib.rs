//! Reads and writes binary data in either byte order, over in-memory buffers and `std::io`
//! streams.
//!
//! * [`EndianSpanReader`] and [`EndianSpanWriter`] are zero-copy cursors over a borrowed slice.
//! * [`EndianReader`] and [`EndianWriter`] are cursors over a seekable stream, and add
//!   length-prefixed arrays (requires the `std` feature).
//!
//! All of them encode the same scalar types, listed on [`Primitive`], in the same way:
//! native width, two's complement for signed integers, IEEE 754 bit patterns for
//! floating-point values, and the byte order selected when the cursor is created.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![forbid(unused_must_use)]
#![warn(missing_docs)]

extern crate alloc;

mod endian;
mod error;
pub mod primitives;
mod reader;
mod writer;

#[cfg(feature = "std")]
mod stream;

#[cfg(test)]
mod tests;

pub use endian::ByteOrder;
pub use error::{Error, Result};
pub use half::f16;
pub use primitives::{Primitive, WChar};
pub use reader::EndianSpanReader;
pub use writer::EndianSpanWriter;

#[cfg(feature = "std")]
pub use error::{StreamError, StreamResult};
#[cfg(feature = "std")]
pub use stream::{EndianReadable, EndianReader, EndianWritable, EndianWriter, BUFFER_SIZE};
