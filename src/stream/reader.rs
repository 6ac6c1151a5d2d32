use super::{aligned, truncated, EndianReadable, BUFFER_SIZE};
use crate::primitives::{self, wire_size, Primitive, WChar};
use crate::{ByteOrder, StreamError, StreamResult};
use half::f16;
use std::io::{self, Read, Seek, SeekFrom};
use zerocopy::{FromBytes, IntoBytes};

/// Decodes values from a seekable stream, in a byte order chosen by the caller.
///
/// Scalars are read in the host's byte order and then reversed if the reader's order differs.
/// Arrays are pulled through a fixed 4096-byte scratch buffer, so a large count never causes a
/// large allocation up front; the result grows only as data actually arrives.
pub struct EndianReader<R> {
    inner: R,
    order: ByteOrder,
    align_arrays: bool,
    buffer: Box<[u8]>,
}

/// Reads until `buf` is full, the stream ends, or the stream fails.
///
/// Returns the number of bytes read along with the error that stopped it, if any. The count is
/// returned either way, so that data read before a failure can still be used.
fn fill<R: Read>(inner: &mut R, buf: &mut [u8]) -> (usize, io::Result<()>) {
    let mut filled = 0;
    while filled < buf.len() {
        match inner.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return (filled, Err(e)),
        }
    }
    (filled, Ok(()))
}

fn unexpected_eof() -> StreamError {
    io::Error::from(io::ErrorKind::UnexpectedEof).into()
}

impl<R: Read + Seek> EndianReader<R> {
    /// Creates a reader that aligns the stream after every array.
    pub fn new(inner: R, order: ByteOrder) -> Self {
        Self::with_alignment(inner, order, true)
    }

    /// Creates a reader, choosing whether arrays are followed by alignment padding.
    pub fn with_alignment(inner: R, order: ByteOrder, align_arrays: bool) -> Self {
        Self {
            inner,
            order,
            align_arrays,
            buffer: vec![0; BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Extracts the inner stream
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Accesses the inner stream
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// The byte order used for multi-byte values.
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order used by subsequent reads.
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

    /// Reads any [`Primitive`] type in the reader's byte order.
    ///
    /// A type that does not set [`Primitive::SUPPORTED`] reads as its default value, and nothing
    /// is consumed from the stream.
    pub fn read_primitive<T: Primitive>(&mut self) -> StreamResult<T> {
        if !T::SUPPORTED {
            return Ok(T::default());
        }
        let mut bytes = T::Bytes::default();
        self.inner.read_exact(bytes.as_mut_bytes())?;
        let value = T::from_ne_bytes(bytes);
        if self.order.is_native() {
            Ok(value)
        } else {
            Ok(primitives::reverse_endianness(value))
        }
    }

    /// Fills `buffer` completely from the stream.
    pub fn read_bytes_exact_into(&mut self, buffer: &mut [u8]) -> StreamResult<()> {
        Ok(self.inner.read_exact(buffer)?)
    }

    fn read_count(&mut self) -> StreamResult<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| StreamError::OutOfRange {
            count: count.into(),
        })
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

    /// Reads a length-prefixed array of any [`Primitive`] type.
    ///
    /// If the stream ends early, this fails with [`StreamError::TruncatedArray`], which records
    /// how many elements were decoded.
    pub fn read_array<T: Primitive>(&mut self) -> StreamResult<Vec<T>> {
        self.read_array_aligned(self.align_arrays)
    }

    /// Like [`read_array`](Self::read_array), but `align` overrides the reader's alignment
    /// setting for this one array.
    pub fn read_array_aligned<T: Primitive>(&mut self, align: bool) -> StreamResult<Vec<T>> {
        let count = self.read_count()?;
        let mut array = Vec::new();

        let size = wire_size::<T>();
        if size == 0 {
            array.resize(count, T::default());
        }

        let per_chunk = BUFFER_SIZE / size.max(1);
        while array.len() < count {
            let want = (count - array.len()).min(per_chunk) * size;
            let (got, status) = fill(&mut self.inner, &mut self.buffer[..want]);

            let whole = got - got % size;
            for chunk in self.buffer[..whole].chunks_exact(size) {
                if let Some(value) = primitives::try_read::<T>(chunk, self.order) {
                    array.push(value);
                }
            }

            status.map_err(|e| truncated(array.len(), count, e.into()))?;
            if got < want {
                return Err(truncated(array.len(), count, unexpected_eof()));
            }
        }

        self.finish_array_with(align)?;
        Ok(array)
    }

    // Single-byte elements need no conversion, so they are read straight into the result.
    fn read_byte_array<T>(&mut self) -> StreamResult<Vec<T>>
    where
        T: FromBytes + IntoBytes + Copy + Default,
    {
        let count = self.read_count()?;
        let mut array: Vec<T> = Vec::new();

        while array.len() < count {
            let start = array.len();
            let take = (count - start).min(BUFFER_SIZE);
            array.resize(start + take, T::default());
            let (got, status) = fill(&mut self.inner, array[start..].as_mut_bytes());
            array.truncate(start + got);
            status.map_err(|e| truncated(array.len(), count, e.into()))?;
            if got < take {
                return Err(truncated(array.len(), count, unexpected_eof()));
            }
        }

        self.finish_array()?;
        Ok(array)
    }

    /// Reads a length-prefixed array of `u8`.
    pub fn read_u8_array(&mut self) -> StreamResult<Vec<u8>> {
        self.read_byte_array()
    }

    /// Reads a length-prefixed array of `i8`.
    pub fn read_i8_array(&mut self) -> StreamResult<Vec<i8>> {
        self.read_byte_array()
    }

    /// Reads a string encoded as an `i32` byte length followed by UTF-8.
    ///
    /// This does not align the stream.
    pub fn read_utf8_string(&mut self) -> StreamResult<String> {
        let len = self.read_count()?;
        let mut bytes = Vec::new();
        (&mut self.inner).take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() < len {
            return Err(unexpected_eof());
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Reads UTF-8 bytes up to and including a zero byte, and returns the bytes before it.
    ///
    /// Fails with [`StreamError::Malformed`] if the stream ends first.
    pub fn read_null_terminated_string(&mut self) -> StreamResult<String> {
        let mut bytes = Vec::new();
        loop {
            match self.read_u8() {
                Ok(0) => break,
                Ok(b) => bytes.push(b),
                Err(StreamError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(StreamError::Malformed);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(String::from_utf8(bytes)?)
    }

    /// Reads a length-prefixed array of length-prefixed strings.
    pub fn read_utf8_string_array(&mut self) -> StreamResult<Vec<String>> {
        let count = self.read_count()?;
        let mut array = Vec::new();
        while array.len() < count {
            let value = self
                .read_utf8_string()
                .map_err(|e| truncated(array.len(), count, e))?;
            array.push(value);
        }
        self.finish_array()?;
        Ok(array)
    }

    /// Decodes one value of a type that knows how to read itself.
    pub fn read_endian<T: EndianReadable>(&mut self) -> StreamResult<T> {
        T::read_from(self)
    }

    /// Reads a length-prefixed array of values that know how to read themselves.
    pub fn read_endian_array<T: EndianReadable>(&mut self) -> StreamResult<Vec<T>> {
        let count = self.read_count()?;
        let mut array = Vec::new();
        while array.len() < count {
            let value = T::read_from(self).map_err(|e| truncated(array.len(), count, e))?;
            array.push(value);
        }
        self.finish_array()?;
        Ok(array)
    }

    /// Reads a length-prefixed array of arrays, each read by
    /// [`read_endian_array`](Self::read_endian_array).
    pub fn read_endian_array_array<T: EndianReadable>(&mut self) -> StreamResult<Vec<Vec<T>>> {
        let count = self.read_count()?;
        let mut array = Vec::new();
        while array.len() < count {
            let inner = self
                .read_endian_array()
                .map_err(|e| truncated(array.len(), count, e))?;
            array.push(inner);
        }
        self.finish_array()?;
        Ok(array)
    }

    /// Seeks forward to the next multiple of 4. Does nothing if the position is already aligned.
    pub fn align_stream(&mut self) -> StreamResult<()> {
        let position = self.inner.stream_position()?;
        let target = aligned(position);
        if target != position {
            self.inner.seek(SeekFrom::Start(target))?;
        }
        Ok(())
    }
}

macro_rules! stream_reader_methods {
    ($($t:ty => $read:ident, $read_array:ident;)*) => {
        impl<R: Read + Seek> EndianReader<R> {
            $(
                #[doc = concat!("Reads a `", stringify!($t), "` in the reader's byte order.")]
                pub fn $read(&mut self) -> StreamResult<$t> {
                    self.read_primitive()
                }

                #[doc = concat!("Reads a length-prefixed array of `", stringify!($t), "`.")]
                pub fn $read_array(&mut self) -> StreamResult<Vec<$t>> {
                    self.read_array()
                }
            )*
        }
    };
}

stream_reader_methods! {
    i16 => read_i16, read_i16_array;
    u16 => read_u16, read_u16_array;
    i32 => read_i32, read_i32_array;
    u32 => read_u32, read_u32_array;
    i64 => read_i64, read_i64_array;
    u64 => read_u64, read_u64_array;
    f16 => read_f16, read_f16_array;
    f32 => read_f32, read_f32_array;
    f64 => read_f64, read_f64_array;
    bool => read_bool, read_bool_array;
    WChar => read_wchar, read_wchar_array;
}

impl<R: Read + Seek> EndianReader<R> {
    /// Reads a `u8`.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        self.read_primitive()
    }

    /// Reads an `i8`.
    pub fn read_i8(&mut self) -> StreamResult<i8> {
        self.read_primitive()
    }
}
