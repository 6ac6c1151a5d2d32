use crate::primitives::{self, wire_size, Primitive, WChar};
use crate::{ByteOrder, Error, Result};
use half::f16;

/// Encodes values into a caller-owned, fixed-size slice of bytes, in a byte order chosen by the
/// caller.
///
/// This mirrors [`EndianSpanReader`](crate::EndianSpanReader): a write encodes at the current
/// position and advances it. A write that does not fit leaves both the slice and the position
/// unchanged.
#[derive(Debug)]
pub struct EndianSpanWriter<'a> {
    data: &'a mut [u8],
    position: usize,
    order: ByteOrder,
}

impl<'a> EndianSpanWriter<'a> {
    /// Constructor
    pub fn new(data: &'a mut [u8], order: ByteOrder) -> Self {
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

    /// Changes the byte order used by subsequent writes.
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

    /// The number of bytes that can still be written.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// The part of the slice that has been written so far, up to the position.
    pub fn written(&self) -> &[u8] {
        &self.data[..self.position.min(self.data.len())]
    }

    #[inline(always)]
    fn tail(&mut self) -> &mut [u8] {
        let position = self.position;
        self.data.get_mut(position..).unwrap_or_default()
    }

    /// Writes any [`Primitive`] type in the writer's byte order.
    #[inline(always)]
    pub fn write_primitive<T: Primitive>(&mut self, value: T) -> Result<()> {
        if self.try_write_primitive(value) {
            Ok(())
        } else {
            Err(Error::EndOfData {
                needed: wire_size::<T>(),
                remaining: self.remaining(),
            })
        }
    }

    /// Writes any [`Primitive`] type. Returns `false` if fewer than `wire_size::<T>()` bytes
    /// remain. A type that does not set [`Primitive::SUPPORTED`] writes nothing.
    #[inline(always)]
    pub fn try_write_primitive<T: Primitive>(&mut self, value: T) -> bool {
        let order = self.order;
        if primitives::try_write(self.tail(), value, order) {
            self.position += wire_size::<T>();
            true
        } else {
            false
        }
    }

    /// Writes `bytes` at the position.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if primitives::store(self.tail(), bytes) {
            self.position += bytes.len();
            Ok(())
        } else {
            Err(Error::EndOfData {
                needed: bytes.len(),
                remaining: self.remaining(),
            })
        }
    }

    /// Writes a small, fixed-size array of bytes.
    pub fn write_cbytes<const N: usize>(&mut self, value: [u8; N]) -> Result<()> {
        self.write_bytes(&value)
    }

    /// Moves the position up to the next multiple of 4. Does nothing if it is already aligned.
    ///
    /// The skipped bytes are left as they are; nothing is zeroed. Like the reader's `align`,
    /// this saturates at `usize::MAX` instead of wrapping.
    #[inline(always)]
    pub fn align(&mut self) {
        self.position = primitives::align4(self.position);
    }
}

macro_rules! span_writer_methods {
    ($($t:ty => $write:ident, $try_write:ident;)*) => {
        impl<'a> EndianSpanWriter<'a> {
            $(
                #[doc = concat!("Writes a `", stringify!($t), "` in the writer's byte order.")]
                #[inline(always)]
                pub fn $write(&mut self, value: $t) -> Result<()> {
                    self.write_primitive(value)
                }

                #[doc = concat!("Writes a `", stringify!($t), "`, or returns `false` if it does not fit.")]
                #[inline(always)]
                pub fn $try_write(&mut self, value: $t) -> bool {
                    self.try_write_primitive(value)
                }
            )*
        }
    };
}

span_writer_methods! {
    i16 => write_i16, try_write_i16;
    u16 => write_u16, try_write_u16;
    i32 => write_i32, try_write_i32;
    u32 => write_u32, try_write_u32;
    i64 => write_i64, try_write_i64;
    u64 => write_u64, try_write_u64;
    f16 => write_f16, try_write_f16;
    f32 => write_f32, try_write_f32;
    f64 => write_f64, try_write_f64;
    bool => write_bool, try_write_bool;
    u8 => write_u8, try_write_u8;
    i8 => write_i8, try_write_i8;
    WChar => write_wchar, try_write_wchar;
}
