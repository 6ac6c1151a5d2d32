use crate::primitives::{self, wire_size, Primitive, WChar};
use crate::{ByteOrder, Error, Result};
use alloc::vec::Vec;
use half::f16;

/// Reads values from a slice of bytes, in a byte order chosen by the caller.
///
/// The reader never copies the slice. It keeps a position into it, which advances with every
/// read. The position can also be set directly, which allows random access. Setting it is never
/// validated; a position past the end simply makes the next read fail.
///
/// Each operation picks one of three ways to deal with running out of data:
///
/// * `read_*` methods return `Err(Error::EndOfData)`.
/// * `try_read_*` methods return `None` and leave the position unchanged.
/// * [`read_bytes`](Self::read_bytes) and [`read_bytes_into`](Self::read_bytes_into) return
///   fewer bytes than requested.
///
/// Strings come in two encodings. A length-prefixed string is an `i32` length, in the reader's
/// byte order, followed by that many bytes of UTF-8. A null-terminated string is UTF-8 followed by
/// a single zero byte. Neither encoding is padded; call [`align`](Self::align) when the format
/// requires it.
#[derive(Clone, Debug)]
pub struct EndianSpanReader<'a> {
    data: &'a [u8],
    position: usize,
    order: ByteOrder,
}

impl<'a> EndianSpanReader<'a> {
    /// Constructor
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            position: 0,
            order,
        }
    }

    /// The byte order used for multi-byte values.
    #[inline(always)]
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Changes the byte order used by subsequent reads.
    #[inline(always)]
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// The total length of the underlying slice.
    #[inline(always)]
    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// The current offset into the underlying slice.
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor. The new position is not checked against the length.
    #[inline(always)]
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// The number of bytes between the position and the end of the slice. This is zero if the
    /// position is past the end.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// The unread part of the slice.
    #[inline(always)]
    pub fn remaining_data(&self) -> &'a [u8] {
        self.data.get(self.position..).unwrap_or_default()
    }

    #[inline(always)]
    fn end_of_data(&self, needed: usize) -> Error {
        Error::EndOfData {
            needed,
            remaining: self.remaining(),
        }
    }

    /// Reads any [`Primitive`] type in the reader's byte order.
    ///
    /// For a type that does not set [`Primitive::SUPPORTED`], this returns the type's default
    /// value and leaves the position where it is.
    #[inline(always)]
    pub fn read_primitive<T: Primitive>(&mut self) -> Result<T> {
        match self.try_read_primitive() {
            Some(value) => Ok(value),
            None => Err(self.end_of_data(wire_size::<T>())),
        }
    }

    /// Reads any [`Primitive`] type, or returns `None` if fewer than `wire_size::<T>()` bytes
    /// remain.
    #[inline(always)]
    pub fn try_read_primitive<T: Primitive>(&mut self) -> Option<T> {
        let value = primitives::try_read::<T>(self.remaining_data(), self.order)?;
        self.position += wire_size::<T>();
        Some(value)
    }

    /// Reads a slice of bytes whose length is `count`. This function returns a slice reference
    /// to the bytes; it does not copy them.
    #[inline(always)]
    pub fn read_bytes_exact(&mut self, count: usize) -> Result<&'a [u8]> {
        match self.try_read_bytes_exact(count) {
            Some(bytes) => Ok(bytes),
            None => Err(self.end_of_data(count)),
        }
    }

    /// Reads a slice of bytes whose length is `count`, or returns `None` if fewer remain.
    #[inline(always)]
    pub fn try_read_bytes_exact(&mut self, count: usize) -> Option<&'a [u8]> {
        let bytes = self.remaining_data().get(..count)?;
        self.position += count;
        Some(bytes)
    }

    /// Fills `buffer` completely, or fails without moving the position.
    pub fn read_bytes_exact_into(&mut self, buffer: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes_exact(buffer.len())?;
        buffer.copy_from_slice(bytes);
        Ok(())
    }

    /// Fills `buffer` completely. Returns `false`, without moving the position, if fewer than
    /// `buffer.len()` bytes remain.
    pub fn try_read_bytes_exact_into(&mut self, buffer: &mut [u8]) -> bool {
        match self.try_read_bytes_exact(buffer.len()) {
            Some(bytes) => {
                buffer.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Reads a small array of bytes, with a constant length.
    #[inline(always)]
    pub fn read_cbytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut bytes = [0u8; N];
        self.read_bytes_exact_into(&mut bytes)?;
        Ok(bytes)
    }

    /// Copies up to `count` bytes into a new vector.
    ///
    /// This never fails. If fewer than `count` bytes remain, it returns all of them (possibly
    /// none) and the position moves to the end of the slice.
    pub fn read_bytes(&mut self, count: usize) -> Vec<u8> {
        let len = count.min(self.remaining());
        let mut result = Vec::with_capacity(len);
        if len != 0 {
            result.extend_from_slice(&self.data[self.position..self.position + len]);
            self.position += len;
        }
        result
    }

    /// Copies up to `buffer.len()` bytes into `buffer` and returns how many were copied.
    pub fn read_bytes_into(&mut self, buffer: &mut [u8]) -> usize {
        let len = buffer.len().min(self.remaining());
        if len != 0 {
            buffer[..len].copy_from_slice(&self.data[self.position..self.position + len]);
            self.position += len;
        }
        len
    }

    /// Reads a length-prefixed string and returns its bytes without copying them.
    ///
    /// The prefix is an `i32` in the reader's byte order. A negative prefix fails with
    /// `Error::OutOfRange`. This does not call [`align`](Self::align). If the payload is
    /// truncated, the prefix has already been consumed when the error is returned.
    pub fn read_utf8_bytes(&mut self) -> Result<&'a [u8]> {
        let len_i32 = self.read_i32()?;
        let Ok(len_usize) = usize::try_from(len_i32) else {
            return Err(Error::OutOfRange {
                count: len_i32.into(),
            });
        };
        self.read_bytes_exact(len_usize)
    }

    /// Reads a length-prefixed string, or returns `None` if either the prefix or the payload is
    /// missing or the prefix is negative. On `None` the position is unchanged.
    pub fn try_read_utf8_bytes(&mut self) -> Option<&'a [u8]> {
        let start = self.position;
        let bytes = self
            .try_read_i32()
            .and_then(|len| usize::try_from(len).ok())
            .and_then(|len| self.try_read_bytes_exact(len));
        if bytes.is_none() {
            self.position = start;
        }
        bytes
    }

    /// Reads a length-prefixed string and validates it as UTF-8.
    pub fn read_utf8_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_utf8_bytes()?;
        core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a length-prefixed string, or returns `None` if it is truncated or not valid UTF-8.
    /// On `None` the position is unchanged.
    pub fn try_read_utf8_str(&mut self) -> Option<&'a str> {
        let start = self.position;
        let s = self
            .try_read_utf8_bytes()
            .and_then(|bytes| core::str::from_utf8(bytes).ok());
        if s.is_none() {
            self.position = start;
        }
        s
    }

    /// Reads a length-prefixed string as a `bstr::BStr`.
    ///
    /// The caller must handle validating that the string is well-formed UTF-8, if necessary.
    #[cfg(feature = "bstr")]
    pub fn read_utf8_bstr(&mut self) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_utf8_bytes()?))
    }

    /// Reads a null-terminated string, or returns `None` if no zero byte remains.
    ///
    /// On success the position moves past the terminator. On `None` the position is unchanged.
    pub fn try_read_null_terminated_bytes(&mut self) -> Option<&'a [u8]> {
        let rest = self.remaining_data();
        let len = rest.iter().position(|&b| b == 0)?;
        self.position += len + 1;
        Some(&rest[..len])
    }

    /// Reads a null-terminated string. Fails with `Error::Malformed`, without moving the
    /// position, if no zero byte remains.
    pub fn read_null_terminated_bytes(&mut self) -> Result<&'a [u8]> {
        self.try_read_null_terminated_bytes().ok_or(Error::Malformed)
    }

    /// Reads a null-terminated string and validates it as UTF-8.
    ///
    /// If the bytes are not UTF-8, the string has been consumed when the error is returned.
    pub fn read_null_terminated_str(&mut self) -> Result<&'a str> {
        let bytes = self.read_null_terminated_bytes()?;
        core::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Reads a null-terminated string, or returns `None` if there is no terminator or the
    /// bytes are not UTF-8. On `None` the position is unchanged.
    pub fn try_read_null_terminated_str(&mut self) -> Option<&'a str> {
        let start = self.position;
        let s = self
            .try_read_null_terminated_bytes()
            .and_then(|bytes| core::str::from_utf8(bytes).ok());
        if s.is_none() {
            self.position = start;
        }
        s
    }

    /// Reads a null-terminated string as a `bstr::BStr`.
    #[cfg(feature = "bstr")]
    pub fn read_null_terminated_bstr(&mut self) -> Result<&'a bstr::BStr> {
        Ok(bstr::BStr::new(self.read_null_terminated_bytes()?))
    }

    /// Moves the position up to the next multiple of 4. Does nothing if it is already aligned.
    ///
    /// The new position is not checked against the length. A position so large that the next
    /// multiple of 4 does not fit in `usize` becomes `usize::MAX`.
    #[inline(always)]
    pub fn align(&mut self) {
        self.position = primitives::align4(self.position);
    }
}

macro_rules! span_reader_methods {
    ($($t:ty => $read:ident, $try_read:ident;)*) => {
        impl<'a> EndianSpanReader<'a> {
            $(
                #[doc = concat!("Reads a `", stringify!($t), "` in the reader's byte order.")]
                #[inline(always)]
                pub fn $read(&mut self) -> Result<$t> {
                    self.read_primitive()
                }

                #[doc = concat!("Reads a `", stringify!($t), "`, or returns `None` if not enough bytes remain.")]
                #[inline(always)]
                pub fn $try_read(&mut self) -> Option<$t> {
                    self.try_read_primitive()
                }
            )*
        }
    };
}

span_reader_methods! {
    i16 => read_i16, try_read_i16;
    u16 => read_u16, try_read_u16;
    i32 => read_i32, try_read_i32;
    u32 => read_u32, try_read_u32;
    i64 => read_i64, try_read_i64;
    u64 => read_u64, try_read_u64;
    f16 => read_f16, try_read_f16;
    f32 => read_f32, try_read_f32;
    f64 => read_f64, try_read_f64;
    bool => read_bool, try_read_bool;
    u8 => read_u8, try_read_u8;
    i8 => read_i8, try_read_i8;
    WChar => read_wchar, try_read_wchar;
}
