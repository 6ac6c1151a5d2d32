//! Cursors over `std::io` streams.
//!
//! [`EndianReader`] and [`EndianWriter`] use the same byte-order rules as the span cursors, and
//! add length-prefixed arrays. An array is an `i32` element count followed by the elements, back
//! to back. If the cursor is configured to align arrays, the stream is then padded to the next
//! multiple of 4 bytes of its absolute position.
//!
//! A cursor either owns its stream, dropping it when the cursor is dropped, or borrows it, which
//! leaves it open. To borrow, pass `&mut stream`; `&mut S` implements `Read`, `Write` and `Seek`
//! whenever `S` does.

use crate::{StreamError, StreamResult};
use std::io::{Read, Seek, Write};

mod reader;
mod writer;

pub use reader::EndianReader;
pub use writer::EndianWriter;

/// Size of the scratch buffer used to batch array elements.
pub const BUFFER_SIZE: usize = 4096;

/// A type that knows how to decode itself from an [`EndianReader`].
pub trait EndianReadable: Sized {
    /// Decodes one value, leaving the reader positioned after it.
    fn read_from<R: Read + Seek>(reader: &mut EndianReader<R>) -> StreamResult<Self>;
}

/// A type that knows how to encode itself into an [`EndianWriter`].
pub trait EndianWritable {
    /// Encodes one value at the writer's position.
    fn write_to<W: Write + Seek>(&self, writer: &mut EndianWriter<W>) -> StreamResult<()>;
}

#[inline(always)]
fn aligned(position: u64) -> u64 {
    position.checked_add(3).map_or(u64::MAX, |p| p & !3)
}

fn truncated(read: usize, expected: usize, source: StreamError) -> StreamError {
    tracing::debug!(read, expected, "array read stopped early");
    StreamError::TruncatedArray {
        read,
        expected,
        source: Box::new(source),
    }
}
