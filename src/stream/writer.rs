use super::{aligned, EndianWritable, BUFFER_SIZE};
use crate::primitives::{self, wire_size, Primitive, WChar};
use crate::{ByteOrder, StreamError, StreamResult};
use half::f16;
use std::io::{self, Read, Seek, SeekFrom, Write};
use zerocopy::{Immutable, IntoBytes};

/// Encodes values into a seekable stream, in a byte order chosen by the caller.
///
/// Array elements are encoded into a fixed 4096-byte scratch buffer and written one buffer at a
/// time. If the writer was created with `align_arrays`, every array (and string array) is
/// followed by zero padding up to the next multiple of 4 of the stream position.
pub struct EndianWriter<W> {
    inner: W,
    order: ByteOrder,
    align_arrays: bool,
    buffer: Box<[u8]>,
}

impl<W: Write + Seek> EndianWriter<W> {
    /// Creates a writer that does not pad after arrays.
    pub fn new(inner: W, order: ByteOrder) -> Self {
        Self::with_alignment(inner, order, false)
    }

    /// Creates a writer, choosing whether arrays are followed by alignment padding.
    pub fn with_alignment(inner: W, order: ByteOrder, align_arrays: bool) -> Self {
        Self {
            inner,
            order,
            align_arrays,
            buffer: vec![0; BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Extracts the inner stream
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Accesses the inner stream
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// The byte order used for multi-byte values.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order used by subsequent writes.
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Flips between little-endian and big-endian.
    pub fn swap_byte_order(&mut self) {
        self.order = self.order.swapped();
        tracing::trace!(order = ?self.order, "swapped byte order");
    }

    /// Whether arrays are followed by alignment padding.
    pub fn align_arrays(&self) -> bool {
        self.align_arrays
    }

    /// The absolute position in the stream.
    pub fn position(&mut self) -> StreamResult<u64> {
        Ok(self.inner.stream_position()?)
    }

    /// Flushes the inner stream.
    pub fn flush(&mut self) -> StreamResult<()> {
        Ok(self.inner.flush()?)
    }

    /// Writes any [`Primitive`] type in the writer's byte order.
    ///
    /// A type that does not set [`Primitive::SUPPORTED`] writes nothing.
    pub fn write_primitive<T: Primitive>(&mut self, value: T) -> StreamResult<()> {
        if !T::SUPPORTED {
            return Ok(());
        }
        let value = if self.order.is_native() {
            value
        } else {
            primitives::reverse_endianness(value)
        };
        self.inner.write_all(value.to_ne_bytes().as_bytes())?;
        Ok(())
    }

    /// Writes `bytes` to the stream.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> StreamResult<()> {
        Ok(self.inner.write_all(bytes)?)
    }

    fn write_count(&mut self, len: usize) -> StreamResult<()> {
        let count = i32::try_from(len).map_err(|_| StreamError::OutOfRange {
            count: i64::try_from(len).unwrap_or(i64::MAX),
        })?;
        self.write_i32(count)
    }

    fn finish_array(&mut self) -> StreamResult<()> {
        self.finish_array_with(self.align_arrays)
    }

    fn finish_array_with(&mut self, align: bool) -> StreamResult<()> {
        if align {
            self.align_stream()?;
        }
        Ok(())
    }

    /// Writes a length-prefixed array of any [`Primitive`] type.
    pub fn write_array<T: Primitive>(&mut self, elements: &[T]) -> StreamResult<()> {
        self.write_array_aligned(elements, self.align_arrays)
    }

    /// Like [`write_array`](Self::write_array), but `align` overrides the writer's alignment
    /// setting for this one array.
    pub fn write_array_aligned<T: Primitive>(
        &mut self,
        elements: &[T],
        align: bool,
    ) -> StreamResult<()> {
        self.write_count(elements.len())?;

        let order = self.order;
        let size = wire_size::<T>();
        if size != 0 {
            for chunk in elements.chunks(BUFFER_SIZE / size) {
                let len = chunk.len() * size;
                for (dest, value) in self.buffer[..len].chunks_exact_mut(size).zip(chunk) {
                    dest.copy_from_slice(value.to_bytes(order).as_bytes());
                }
                self.inner.write_all(&self.buffer[..len])?;
            }
        }

        self.finish_array_with(align)
    }

    // Single-byte elements have no byte order, so they go straight to the stream.
    fn write_byte_array<T: IntoBytes + Immutable>(&mut self, elements: &[T]) -> StreamResult<()> {
        self.write_count(elements.len())?;
        self.inner.write_all(elements.as_bytes())?;
        self.finish_array()
    }

    /// Writes a length-prefixed array of `u8`.
    pub fn write_u8_array(&mut self, elements: &[u8]) -> StreamResult<()> {
        self.write_byte_array(elements)
    }

    /// Writes a length-prefixed array of `i8`.
    pub fn write_i8_array(&mut self, elements: &[i8]) -> StreamResult<()> {
        self.write_byte_array(elements)
    }

    /// Writes a string as an `i32` byte length followed by its UTF-8 bytes.
    ///
    /// This does not align the stream.
    pub fn write_utf8_str(&mut self, s: &str) -> StreamResult<()> {
        self.write_count(s.len())?;
        self.write_bytes(s.as_bytes())
    }

    /// Writes a string's UTF-8 bytes followed by a zero byte.
    ///
    /// The string is written as-is; an interior zero byte will end the string early when it is
    /// read back.
    pub fn write_null_terminated_str(&mut self, s: &str) -> StreamResult<()> {
        self.write_bytes(s.as_bytes())?;
        self.write_u8(0)
    }

    /// Writes a length-prefixed array of length-prefixed strings.
    pub fn write_utf8_str_array<S: AsRef<str>>(&mut self, elements: &[S]) -> StreamResult<()> {
        self.write_count(elements.len())?;
        for s in elements {
            self.write_utf8_str(s.as_ref())?;
        }
        self.finish_array()
    }

    /// Encodes one value of a type that knows how to write itself.
    pub fn write_endian<T: EndianWritable>(&mut self, value: &T) -> StreamResult<()> {
        value.write_to(self)
    }

    /// Writes a length-prefixed array of values that know how to write themselves.
    pub fn write_endian_array<T: EndianWritable>(&mut self, elements: &[T]) -> StreamResult<()> {
        self.write_count(elements.len())?;
        for value in elements {
            value.write_to(self)?;
        }
        self.finish_array()
    }

    /// Writes a length-prefixed array of arrays, each written by
    /// [`write_endian_array`](Self::write_endian_array).
    pub fn write_endian_array_array<T, A>(&mut self, elements: &[A]) -> StreamResult<()>
    where
        T: EndianWritable,
        A: AsRef<[T]>,
    {
        self.write_count(elements.len())?;
        for inner in elements {
            self.write_endian_array(inner.as_ref())?;
        }
        self.finish_array()
    }

    /// Moves the stream position up to the next multiple of 4.
    ///
    /// If the target lies beyond the end of the stream, the gap is filled with zero bytes
    /// instead of seeking past the end.
    pub fn align_stream(&mut self) -> StreamResult<()> {
        let position = self.inner.stream_position()?;
        let target = aligned(position);
        if target == position {
            return Ok(());
        }

        let length = self.inner.seek(SeekFrom::End(0))?;
        if target > length {
            let padding = target - length;
            tracing::trace!(position, padding, "padding stream to 4-byte boundary");
            io::copy(&mut io::repeat(0).take(padding), &mut self.inner)?;
        } else {
            self.inner.seek(SeekFrom::Start(target))?;
        }
        Ok(())
    }
}

macro_rules! stream_writer_methods {
    ($($t:ty => $write:ident, $write_array:ident;)*) => {
        impl<W: Write + Seek> EndianWriter<W> {
            $(
                #[doc = concat!("Writes a `", stringify!($t), "` in the writer's byte order.")]
                pub fn $write(&mut self, value: $t) -> StreamResult<()> {
                    self.write_primitive(value)
                }

                #[doc = concat!("Writes a length-prefixed array of `", stringify!($t), "`.")]
                pub fn $write_array(&mut self, elements: &[$t]) -> StreamResult<()> {
                    self.write_array(elements)
                }
            )*
        }
    };
}

stream_writer_methods! {
    i16 => write_i16, write_i16_array;
    u16 => write_u16, write_u16_array;
    i32 => write_i32, write_i32_array;
    u32 => write_u32, write_u32_array;
    i64 => write_i64, write_i64_array;
    u64 => write_u64, write_u64_array;
    f16 => write_f16, write_f16_array;
    f32 => write_f32, write_f32_array;
    f64 => write_f64, write_f64_array;
    bool => write_bool, write_bool_array;
    WChar => write_wchar, write_wchar_array;
}

impl<W: Write + Seek> EndianWriter<W> {
    /// Writes a single `u8` value
    pub fn write_u8(&mut self, value: u8) -> StreamResult<()> {
        self.write_primitive(value)
    }

    /// Writes a single `i8` value
    pub fn write_i8(&mut self, value: i8) -> StreamResult<()> {
        self.write_primitive(value)
    }
}
