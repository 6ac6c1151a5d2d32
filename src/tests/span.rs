use crate::*;
use pretty_hex::PrettyHex;

const LE: ByteOrder = ByteOrder::LittleEndian;
const BE: ByteOrder = ByteOrder::BigEndian;

#[test]
fn basic_u8() {
    let mut r = EndianSpanReader::new(&[42, 43, 44], LE);
    assert_eq!(r.read_u8(), Ok(42));
    assert_eq!(r.position(), 1);
    assert_eq!(r.remaining_data(), &[43, 44]);
}

#[test]
fn basic_u16() {
    let mut r = EndianSpanReader::new(&[], LE);
    assert_eq!(
        r.read_u16(),
        Err(Error::EndOfData {
            needed: 2,
            remaining: 0
        })
    );

    let data = [0xaa, 0x55, 0x33, 0x44];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.read_u16(), Ok(0x55aa));
    r.set_byte_order(BE);
    assert_eq!(r.read_u16(), Ok(0x3344));
    assert_eq!(r.position(), 4);
}

#[test]
fn length_never_changes() {
    let data = [0u8; 7];
    let mut r = EndianSpanReader::new(&data, BE);
    assert_eq!(r.length(), 7);
    r.read_u32().unwrap();
    assert!(r.read_u64().is_err());
    assert_eq!(r.length(), 7);
    assert_eq!(r.position(), 4);
}

#[test]
fn try_read_short_buffer() {
    let data = [1, 2, 3];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_u32(), None);
    assert_eq!(r.try_read_f32(), None);
    assert_eq!(r.position(), 0);

    let data = [1, 2, 3, 4, 5, 6, 7];
    let mut r = EndianSpanReader::new(&data, BE);
    assert_eq!(r.try_read_i64(), None);
    assert_eq!(r.try_read_f64(), None);
    assert_eq!(r.position(), 0);

    let mut r = EndianSpanReader::new(&data[..1], BE);
    assert_eq!(r.try_read_wchar(), None);
    assert_eq!(r.try_read_f16(), None);
    assert_eq!(r.position(), 0);
}

#[test]
fn try_read_empty_buffer() {
    let mut r = EndianSpanReader::new(&[], LE);
    assert_eq!(r.try_read_u8(), None);
    assert_eq!(r.try_read_i8(), None);
    assert_eq!(r.try_read_bool(), None);
    assert_eq!(r.position(), 0);
}

#[test]
fn read_bool() {
    let mut r = EndianSpanReader::new(&[0, 1, 0xff], BE);
    assert_eq!(r.read_bool(), Ok(false));
    assert_eq!(r.read_bool(), Ok(true));
    assert_eq!(r.try_read_bool(), Some(true));
    assert_eq!(r.try_read_bool(), None);
}

#[test]
fn read_cbytes_zero_len() {
    let mut r = EndianSpanReader::new(&[0x33, 0x44], LE);
    let _empty: [u8; 0] = r.read_cbytes().unwrap();
    assert_eq!(r.position(), 0);
}

#[test]
fn read_cbytes_not_enough() {
    let mut r = EndianSpanReader::new(&[0x33, 0x44, 0x55], LE);
    assert_eq!(
        r.read_cbytes::<5>(),
        Err(Error::EndOfData {
            needed: 5,
            remaining: 3
        })
    );
    assert_eq!(r.position(), 0);
}

#[test]
fn read_cbytes_some() {
    let mut r = EndianSpanReader::new(&[0x33, 0x44, 0x55], LE);
    assert_eq!(r.read_cbytes(), Ok([0x33, 0x44]));
    assert_eq!(r.remaining_data(), [0x55]);
}

#[test]
fn read_bytes_clamps() {
    let data = [1, 2, 3];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(1);
    assert_eq!(r.read_bytes(10), [2, 3]);
    assert_eq!(r.position(), 3);
    assert!(r.read_bytes(5).is_empty());
    assert_eq!(r.position(), 3);

    r.set_position(10);
    assert!(r.read_bytes(1).is_empty());
    assert_eq!(r.position(), 10);
}

#[test]
fn read_bytes_into_clamps() {
    let data = [1, 2, 3];
    let mut r = EndianSpanReader::new(&data, LE);
    let mut buf = [0u8; 2];
    assert_eq!(r.read_bytes_into(&mut buf), 2);
    assert_eq!(buf, [1, 2]);
    assert_eq!(r.read_bytes_into(&mut buf), 1);
    assert_eq!(buf, [3, 2]);
    assert_eq!(r.read_bytes_into(&mut buf), 0);
}

#[test]
fn read_bytes_exact_is_zero_copy() {
    let data = [1, 2, 3, 4];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(1);
    let bytes = r.read_bytes_exact(2).unwrap();
    assert_eq!(bytes, [2, 3]);
    assert_eq!(bytes.as_ptr(), data[1..].as_ptr());
    assert_eq!(r.position(), 3);

    assert_eq!(
        r.read_bytes_exact(2),
        Err(Error::EndOfData {
            needed: 2,
            remaining: 1
        })
    );
    assert_eq!(r.try_read_bytes_exact(2), None);
    assert_eq!(r.position(), 3);
}

#[test]
fn read_bytes_exact_into() {
    let data = [1, 2, 3];
    let mut r = EndianSpanReader::new(&data, LE);
    let mut buf = [0u8; 2];
    r.read_bytes_exact_into(&mut buf).unwrap();
    assert_eq!(buf, [1, 2]);
    assert!(!r.try_read_bytes_exact_into(&mut buf));
    assert_eq!(buf, [1, 2]);
    assert_eq!(r.position(), 2);
}

#[test]
fn position_past_end() {
    let data = [1, 2, 3];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(100);
    assert_eq!(r.remaining(), 0);
    assert!(r.remaining_data().is_empty());
    assert_eq!(r.try_read_bytes_exact(0), Some(&[][..]));
    assert_eq!(r.try_read_u8(), None);
    assert_eq!(r.try_read_null_terminated_bytes(), None);
    assert_eq!(r.position(), 100);
}

#[test]
fn utf8_hello_big_endian() {
    let data = hex::decode("0000000568656c6c6f").unwrap();
    let mut r = EndianSpanReader::new(&data, BE);
    assert_eq!(r.read_utf8_str(), Ok("hello"));
    assert_eq!(r.position(), 9);

    let mut buf = [0u8; 9];
    let mut w = EndianSpanWriter::new(&mut buf, BE);
    w.write_i32(5).unwrap();
    w.write_bytes(b"hello").unwrap();
    assert_eq!(w.position(), 9);
    assert_eq!(buf.as_slice(), data.as_slice());
}

#[test]
fn utf8_hello_little_endian() {
    let data = hex::decode("0500000068656c6c6f").unwrap();
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_utf8_str(), Some("hello"));
    assert_eq!(r.position(), 9);
}

#[test]
fn utf8_negative_length() {
    let data = [0xff, 0xff, 0xff, 0xff, b'a'];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_utf8_bytes(), None);
    assert_eq!(r.position(), 0);
    assert_eq!(r.read_utf8_bytes(), Err(Error::OutOfRange { count: -1 }));
}

#[test]
fn utf8_truncated_payload() {
    let data = [10, 0, 0, 0, b'a', b'b'];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_utf8_str(), None);
    assert_eq!(r.position(), 0);
    assert_eq!(
        r.read_utf8_bytes(),
        Err(Error::EndOfData {
            needed: 10,
            remaining: 2
        })
    );
}

#[test]
fn utf8_missing_length() {
    let mut r = EndianSpanReader::new(&[1, 0], LE);
    assert_eq!(r.try_read_utf8_bytes(), None);
    assert_eq!(r.position(), 0);
    assert!(r.read_utf8_str().is_err());
}

#[test]
fn utf8_invalid() {
    let data = [2, 0, 0, 0, 0xc3, 0x28];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_utf8_str(), None);
    assert_eq!(r.position(), 0);
    assert_eq!(r.read_utf8_bytes(), Ok(&[0xc3, 0x28][..]));
    r.set_position(0);
    assert_eq!(r.read_utf8_str(), Err(Error::InvalidUtf8));
}

#[cfg(feature = "bstr")]
#[test]
fn utf8_bstr() {
    let data = [0, 0, 0, 2, 0xc3, 0x28, b'x', 0];
    let mut r = EndianSpanReader::new(&data, BE);
    assert_eq!(r.read_utf8_bstr().unwrap(), bstr::BStr::new(b"\xc3\x28"));
    assert_eq!(r.read_null_terminated_bstr().unwrap(), "x");
}

#[test]
fn null_terminated() {
    let data = [0x41, 0x42, 0x00];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.read_null_terminated_str(), Ok("AB"));
    assert_eq!(r.position(), 3);
}

#[test]
fn null_terminated_missing() {
    let data = [0x41, 0x42];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.read_null_terminated_str(), Err(Error::Malformed));
    assert_eq!(r.position(), 0);
    assert_eq!(r.try_read_null_terminated_str(), None);
    assert_eq!(r.position(), 0);
}

#[test]
fn null_terminated_empty_and_consecutive() {
    let data = [0x00, 0x61, 0x00, 0x62];
    let mut r = EndianSpanReader::new(&data, LE);
    assert_eq!(r.try_read_null_terminated_bytes(), Some(&[][..]));
    assert_eq!(r.position(), 1);
    assert_eq!(r.try_read_null_terminated_str(), Some("a"));
    assert_eq!(r.position(), 3);
    assert_eq!(r.read_null_terminated_bytes(), Err(Error::Malformed));
    assert_eq!(r.position(), 3);
}

#[test]
fn align() {
    let data = [0u8; 16];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(5);
    r.align();
    assert_eq!(r.position(), 8);
    r.align();
    assert_eq!(r.position(), 8);
    r.set_position(0);
    r.align();
    assert_eq!(r.position(), 0);
}

#[test]
fn align_past_end_fails_on_next_read() {
    let data = [0u8; 5];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(5);
    r.align();
    assert_eq!(r.position(), 8);
    assert_eq!(
        r.read_u8(),
        Err(Error::EndOfData {
            needed: 1,
            remaining: 0
        })
    );
    assert_eq!(r.position(), 8);
}

#[test]
fn align_near_usize_max_saturates() {
    let data = [0u8; 4];
    let mut r = EndianSpanReader::new(&data, LE);
    r.set_position(usize::MAX - 1);
    r.align();
    assert_eq!(r.position(), usize::MAX);
    assert_eq!(
        r.read_u8(),
        Err(Error::EndOfData {
            needed: 1,
            remaining: 0
        })
    );
    assert_eq!(r.try_read_u32(), None);
    assert!(r.read_bytes(2).is_empty());

    r.set_position(usize::MAX - 3);
    r.align();
    assert_eq!(r.position(), usize::MAX - 3);

    let mut buf = [0u8; 4];
    let mut w = EndianSpanWriter::new(&mut buf, LE);
    w.set_position(usize::MAX - 2);
    w.align();
    assert_eq!(w.position(), usize::MAX);
    assert!(!w.try_write_u8(1));
    assert_eq!(w.written(), [0, 0, 0, 0]);
}

#[test]
fn writer_align_skips_without_zeroing() {
    let mut buf = [0xaa; 8];
    let mut w = EndianSpanWriter::new(&mut buf, LE);
    w.write_u8(1).unwrap();
    w.align();
    assert_eq!(w.position(), 4);
    w.write_u8(2).unwrap();
    assert_eq!(w.written(), [1, 0xaa, 0xaa, 0xaa, 2]);
}

#[test]
fn writer_full() {
    let mut buf = [0u8; 5];
    let mut w = EndianSpanWriter::new(&mut buf, BE);
    assert_eq!(w.length(), 5);
    w.write_u32(0x01020304).unwrap();
    assert!(!w.try_write_u16(0xffff));
    assert_eq!(
        w.write_u16(0xffff),
        Err(Error::EndOfData {
            needed: 2,
            remaining: 1
        })
    );
    assert!(w.write_bytes(&[9, 9]).is_err());
    assert_eq!(w.position(), 4);
    assert!(w.try_write_bool(true));
    assert!(!w.try_write_i8(0));
    assert_eq!(w.position(), 5);
    assert_eq!(buf, [1, 2, 3, 4, 1]);
}

#[test]
fn writer_switches_order() {
    let mut buf = [0u8; 4];
    let mut w = EndianSpanWriter::new(&mut buf, LE);
    w.write_u16(0x0102).unwrap();
    w.set_byte_order(BE);
    assert_eq!(w.byte_order(), BE);
    w.write_u16(0x0102).unwrap();
    assert_eq!(buf, [0x02, 0x01, 0x01, 0x02]);
}

#[test]
fn writer_cbytes_and_wchar() {
    let mut buf = [0u8; 6];
    let mut w = EndianSpanWriter::new(&mut buf, BE);
    w.write_cbytes([0xde, 0xad]).unwrap();
    w.write_wchar(WChar::from_char('é').unwrap()).unwrap();
    w.write_f16(f16::from_f32(-2.0)).unwrap();
    assert_eq!(buf, [0xde, 0xad, 0x00, 0xe9, 0xc0, 0x00]);

    let mut r = EndianSpanReader::new(&buf, BE);
    assert_eq!(r.read_cbytes(), Ok([0xde, 0xad]));
    assert_eq!(r.read_wchar().map(WChar::to_char), Ok(Some('é')));
    assert_eq!(r.read_f16(), Ok(f16::from_f32(-2.0)));
}

#[test]
fn mixed() {
    let mut buf = [0u8; 32];
    let mut w = EndianSpanWriter::new(&mut buf, BE);
    w.write_u8(42).unwrap();
    w.write_u16(0x0102).unwrap();
    w.write_i32(13).unwrap();
    w.write_bytes(b"Hello, world!").unwrap();
    w.write_i32(-33).unwrap();
    w.write_f64(0.5).unwrap();
    let len = w.position();
    assert_eq!(len, 1 + 2 + 4 + 13 + 4 + 8);

    let written = &buf[..len];
    println!("{}", written.hex_dump());

    let mut r = EndianSpanReader::new(written, BE);
    assert_eq!(r.read_u8(), Ok(42));
    assert_eq!(r.read_u16(), Ok(0x0102));
    assert_eq!(r.read_utf8_str(), Ok("Hello, world!"));
    assert_eq!(r.read_i32(), Ok(-33));
    assert_eq!(r.read_f64(), Ok(0.5));
    assert_eq!(r.remaining(), 0);
}
