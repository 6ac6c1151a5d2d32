//! Conversions between fixed-size scalar values and their byte representations.
//!
//! The [`Primitive`] trait is implemented once for each scalar type the cursors know how to
//! encode: `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `i64`, `u64`, [`f16`], `f32`, `f64`, `bool`
//! and [`WChar`]. Every `read_*` / `write_*` method on the cursors funnels through it, so the
//! choice of byte order is resolved by the type parameter at compile time.
//!
//! Floating-point values are encoded by reinterpreting their bits as the unsigned integer of the
//! same width. Round trips are bit-exact, including NaN payloads and negative zero.

use crate::{ByteOrder, Error, Result};
use half::f16;
use zerocopy::{FromBytes, Immutable, IntoBytes};

/// A fixed-size scalar that can be encoded in either byte order.
///
/// The provided methods are fallbacks. A type that supplies only `Bytes` leaves `SUPPORTED` as
/// `false`, and every cursor treats it as having no encoding: reads return `Self::default()`
/// without consuming input, and writes do nothing. This lets generic code call
/// [`read_primitive`](crate::EndianSpanReader::read_primitive) for a type outside the supported
/// set and get a zero value back, rather than failing. The check is on an associated constant, so
/// it is resolved at compile time.
pub trait Primitive: Copy + Default {
    /// Byte array holding the encoded form, e.g. `[u8; 4]` for `u32`.
    type Bytes: Copy + Default + FromBytes + IntoBytes + Immutable;

    /// Whether this type has a byte encoding. Only the built-in scalar types set this.
    const SUPPORTED: bool = false;

    /// Decodes a value stored most significant byte first.
    #[inline(always)]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        let _ = bytes;
        Self::default()
    }

    /// Decodes a value stored least significant byte first.
    #[inline(always)]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        let _ = bytes;
        Self::default()
    }

    /// Encodes a value most significant byte first.
    #[inline(always)]
    fn to_be_bytes(self) -> Self::Bytes {
        Self::Bytes::default()
    }

    /// Encodes a value least significant byte first.
    #[inline(always)]
    fn to_le_bytes(self) -> Self::Bytes {
        Self::Bytes::default()
    }

    /// Reverses the byte order of the value. Single-byte types return the value unchanged.
    #[inline(always)]
    fn reverse_endianness(self) -> Self {
        self
    }

    /// Decodes a value stored in `order`.
    #[inline(always)]
    fn from_bytes(bytes: Self::Bytes, order: ByteOrder) -> Self {
        match order {
            ByteOrder::BigEndian => Self::from_be_bytes(bytes),
            ByteOrder::LittleEndian => Self::from_le_bytes(bytes),
        }
    }

    /// Encodes a value in `order`.
    #[inline(always)]
    fn to_bytes(self, order: ByteOrder) -> Self::Bytes {
        match order {
            ByteOrder::BigEndian => self.to_be_bytes(),
            ByteOrder::LittleEndian => self.to_le_bytes(),
        }
    }

    /// Decodes a value stored in the host's byte order.
    #[inline(always)]
    fn from_ne_bytes(bytes: Self::Bytes) -> Self {
        Self::from_bytes(bytes, ByteOrder::NATIVE)
    }

    /// Encodes a value in the host's byte order.
    #[inline(always)]
    fn to_ne_bytes(self) -> Self::Bytes {
        self.to_bytes(ByteOrder::NATIVE)
    }
}

macro_rules! int_primitive {
    ($($t:ty),*) => {
        $(
            impl Primitive for $t {
                type Bytes = [u8; core::mem::size_of::<$t>()];
                const SUPPORTED: bool = true;

                #[inline(always)]
                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_be_bytes(bytes)
                }

                #[inline(always)]
                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_le_bytes(bytes)
                }

                #[inline(always)]
                fn to_be_bytes(self) -> Self::Bytes {
                    <$t>::to_be_bytes(self)
                }

                #[inline(always)]
                fn to_le_bytes(self) -> Self::Bytes {
                    <$t>::to_le_bytes(self)
                }

                #[inline(always)]
                fn reverse_endianness(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

int_primitive!(i8, u8, i16, u16, i32, u32, i64, u64);

// Floats go through the unsigned integer of the same width.
macro_rules! float_primitive {
    ($($t:ty => $bits:ty),*) => {
        $(
            impl Primitive for $t {
                type Bytes = [u8; core::mem::size_of::<$bits>()];
                const SUPPORTED: bool = true;

                #[inline(always)]
                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_bits(<$bits>::from_be_bytes(bytes))
                }

                #[inline(always)]
                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_bits(<$bits>::from_le_bytes(bytes))
                }

                #[inline(always)]
                fn to_be_bytes(self) -> Self::Bytes {
                    self.to_bits().to_be_bytes()
                }

                #[inline(always)]
                fn to_le_bytes(self) -> Self::Bytes {
                    self.to_bits().to_le_bytes()
                }

                #[inline(always)]
                fn reverse_endianness(self) -> Self {
                    <$t>::from_bits(self.to_bits().swap_bytes())
                }
            }
        )*
    };
}

float_primitive!(f16 => u16, f32 => u32, f64 => u64);

impl Primitive for bool {
    type Bytes = [u8; 1];
    const SUPPORTED: bool = true;

    #[inline(always)]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }

    #[inline(always)]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        bytes[0] != 0
    }

    #[inline(always)]
    fn to_be_bytes(self) -> Self::Bytes {
        [self as u8]
    }

    #[inline(always)]
    fn to_le_bytes(self) -> Self::Bytes {
        [self as u8]
    }
}

/// A single UTF-16 code unit.
///
/// This is a separate type from `u16` so that generic code can tell a character apart from a
/// number. Code units are not validated; a lone surrogate round-trips unchanged.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[repr(transparent)]
pub struct WChar(pub u16);

impl WChar {
    /// Converts a `char` in the Basic Multilingual Plane to a code unit. Returns `None` for
    /// characters that need a surrogate pair.
    pub fn from_char(c: char) -> Option<Self> {
        u16::try_from(u32::from(c)).ok().map(WChar)
    }

    /// Converts the code unit to a `char`. Returns `None` for surrogates.
    pub fn to_char(self) -> Option<char> {
        char::from_u32(u32::from(self.0))
    }
}

impl From<u16> for WChar {
    fn from(value: u16) -> Self {
        WChar(value)
    }
}

impl From<WChar> for u16 {
    fn from(value: WChar) -> Self {
        value.0
    }
}

impl Primitive for WChar {
    type Bytes = [u8; 2];
    const SUPPORTED: bool = true;

    #[inline(always)]
    fn from_be_bytes(bytes: Self::Bytes) -> Self {
        WChar(u16::from_be_bytes(bytes))
    }

    #[inline(always)]
    fn from_le_bytes(bytes: Self::Bytes) -> Self {
        WChar(u16::from_le_bytes(bytes))
    }

    #[inline(always)]
    fn to_be_bytes(self) -> Self::Bytes {
        self.0.to_be_bytes()
    }

    #[inline(always)]
    fn to_le_bytes(self) -> Self::Bytes {
        self.0.to_le_bytes()
    }

    #[inline(always)]
    fn reverse_endianness(self) -> Self {
        WChar(self.0.swap_bytes())
    }
}

/// The number of bytes a `T` occupies when encoded.
///
/// This is the size of `T::Bytes`, or zero for a type that does not set
/// [`Primitive::SUPPORTED`].
#[inline(always)]
pub const fn wire_size<T: Primitive>() -> usize {
    if T::SUPPORTED {
        core::mem::size_of::<T::Bytes>()
    } else {
        0
    }
}

/// Rounds `position` up to a multiple of 4, or to `usize::MAX` if that would overflow.
#[inline(always)]
pub(crate) fn align4(position: usize) -> usize {
    match position.checked_add(3) {
        Some(p) => p & !3,
        None => usize::MAX,
    }
}

/// Copies the leading `wire_size::<T>()` bytes of `src` into a `T::Bytes`.
#[inline(always)]
pub(crate) fn load<T: Primitive>(src: &[u8]) -> Option<T::Bytes> {
    <T::Bytes as FromBytes>::read_from_prefix(src).ok().map(|(bytes, _)| bytes)
}

/// Copies `bytes` into the leading bytes of `dest`. Returns `false`, without modifying `dest`,
/// if `dest` is too short.
#[inline(always)]
pub(crate) fn store(dest: &mut [u8], bytes: &[u8]) -> bool {
    match dest.get_mut(..bytes.len()) {
        Some(dst) => {
            dst.copy_from_slice(bytes);
            true
        }
        None => false,
    }
}

#[inline(always)]
fn end_of_data<T: Primitive>(remaining: usize) -> Error {
    Error::EndOfData {
        needed: wire_size::<T>(),
        remaining,
    }
}

/// Decodes a `T` from the start of `src` in the given byte order.
///
/// For a type without an encoding this returns `Some(T::default())` whatever `src` holds.
#[inline(always)]
pub fn try_read<T: Primitive>(src: &[u8], order: ByteOrder) -> Option<T> {
    if !T::SUPPORTED {
        return Some(T::default());
    }
    load::<T>(src).map(|bytes| T::from_bytes(bytes, order))
}

/// Decodes a `T` from the start of `src` in the given byte order.
#[inline(always)]
pub fn read<T: Primitive>(src: &[u8], order: ByteOrder) -> Result<T> {
    try_read(src, order).ok_or_else(|| end_of_data::<T>(src.len()))
}

/// Encodes `value` into the start of `dest` in the given byte order.
///
/// For a type without an encoding this writes nothing and returns `true`.
#[inline(always)]
pub fn try_write<T: Primitive>(dest: &mut [u8], value: T, order: ByteOrder) -> bool {
    if !T::SUPPORTED {
        return true;
    }
    store(dest, value.to_bytes(order).as_bytes())
}

/// Encodes `value` into the start of `dest` in the given byte order.
#[inline(always)]
pub fn write<T: Primitive>(dest: &mut [u8], value: T, order: ByteOrder) -> Result<()> {
    if try_write(dest, value, order) {
        Ok(())
    } else {
        Err(end_of_data::<T>(dest.len()))
    }
}

/// Decodes a big-endian `T` from the start of `src`.
#[inline(always)]
pub fn read_big_endian<T: Primitive>(src: &[u8]) -> Result<T> {
    read(src, ByteOrder::BigEndian)
}

/// Decodes a little-endian `T` from the start of `src`.
#[inline(always)]
pub fn read_little_endian<T: Primitive>(src: &[u8]) -> Result<T> {
    read(src, ByteOrder::LittleEndian)
}

/// Decodes a big-endian `T` from the start of `src`, or `None` if `src` is too short.
#[inline(always)]
pub fn try_read_big_endian<T: Primitive>(src: &[u8]) -> Option<T> {
    try_read(src, ByteOrder::BigEndian)
}

/// Decodes a little-endian `T` from the start of `src`, or `None` if `src` is too short.
#[inline(always)]
pub fn try_read_little_endian<T: Primitive>(src: &[u8]) -> Option<T> {
    try_read(src, ByteOrder::LittleEndian)
}

/// Encodes `value` big-endian into the start of `dest`.
#[inline(always)]
pub fn write_big_endian<T: Primitive>(dest: &mut [u8], value: T) -> Result<()> {
    write(dest, value, ByteOrder::BigEndian)
}

/// Encodes `value` little-endian into the start of `dest`.
#[inline(always)]
pub fn write_little_endian<T: Primitive>(dest: &mut [u8], value: T) -> Result<()> {
    write(dest, value, ByteOrder::LittleEndian)
}

/// Encodes `value` big-endian into the start of `dest`. Returns `false` if `dest` is too short.
#[inline(always)]
pub fn try_write_big_endian<T: Primitive>(dest: &mut [u8], value: T) -> bool {
    try_write(dest, value, ByteOrder::BigEndian)
}

/// Encodes `value` little-endian into the start of `dest`. Returns `false` if `dest` is too
/// short.
#[inline(always)]
pub fn try_write_little_endian<T: Primitive>(dest: &mut [u8], value: T) -> bool {
    try_write(dest, value, ByteOrder::LittleEndian)
}

/// Reverses the byte order of `value`.
#[inline(always)]
pub fn reverse_endianness<T: Primitive>(value: T) -> T {
    value.reverse_endianness()
}
