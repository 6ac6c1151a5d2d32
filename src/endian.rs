/// The order in which the bytes of a multi-byte value are stored.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ByteOrder {
    /// Least significant byte first.
    #[default]
    LittleEndian,
    /// Most significant byte first.
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the machine this code is running on.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;

    /// The byte order of the machine this code is running on.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Returns `true` for [`ByteOrder::BigEndian`].
    #[inline(always)]
    pub fn is_big_endian(self) -> bool {
        self == ByteOrder::BigEndian
    }

    /// Returns `true` for [`ByteOrder::LittleEndian`].
    #[inline(always)]
    pub fn is_little_endian(self) -> bool {
        self == ByteOrder::LittleEndian
    }

    /// Returns the opposite byte order.
    #[inline(always)]
    pub fn swapped(self) -> Self {
        match self {
            ByteOrder::LittleEndian => ByteOrder::BigEndian,
            ByteOrder::BigEndian => ByteOrder::LittleEndian,
        }
    }

    /// Returns `true` if this is the host's byte order.
    #[inline(always)]
    pub fn is_native(self) -> bool {
        self == Self::NATIVE
    }
}
