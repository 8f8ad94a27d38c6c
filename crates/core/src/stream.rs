//! Binary object stream used for document persistence
//!
//! Values are little-endian and each one carries a two-byte marker (`_`
//! followed by a kind character) so a reader can detect a stream that is out
//! of step with the expected layout:
//!
//! | kind   | marker | payload                                   |
//! |--------|--------|-------------------------------------------|
//! | int    | `_i`   | `i32`                                     |
//! | double | `_d`   | `f64`                                     |
//! | string | `_s`   | `i32` length + UTF-8 bytes                |
//! | data   | `_b`   | `i32` count + `i32` record size + bytes   |
//! | object | `_{`   | `i32` tag length + tag bytes              |
//! | end    | `_}`   |                                           |

use crate::error::{StreamError, StreamResult};

const MARKER: u8 = b'_';
const KIND_INT: u8 = b'i';
const KIND_DOUBLE: u8 = b'd';
const KIND_STRING: u8 = b's';
const KIND_DATA: u8 = b'b';
const KIND_OBJECT: u8 = b'{';
const KIND_END: u8 = b'}';

/// Write half of the object stream
#[derive(Debug, Default)]
pub struct ObjectOutputStream {
    buf: Vec<u8>,
}

impl ObjectOutputStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_object(&mut self, tag: &str) -> StreamResult<()> {
        let len = len_to_i32(tag.len())?;
        self.marker(KIND_OBJECT);
        self.raw_str(len, tag);
        Ok(())
    }

    pub fn end_object(&mut self) {
        self.marker(KIND_END);
    }

    pub fn write_int(&mut self, value: i32) {
        self.marker(KIND_INT);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_double(&mut self, value: f64) {
        self.marker(KIND_DOUBLE);
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_string(&mut self, value: &str) -> StreamResult<()> {
        let len = len_to_i32(value.len())?;
        self.marker(KIND_STRING);
        self.raw_str(len, value);
        Ok(())
    }

    /// Write `count` fixed-size records stored contiguously in `bytes`
    ///
    /// Nothing is written when a length does not fit the header.
    pub fn write_data(&mut self, bytes: &[u8], count: usize, record_size: usize) -> StreamResult<()> {
        debug_assert_eq!(Some(bytes.len()), count.checked_mul(record_size));
        let count = len_to_i32(count)?;
        let record_size = len_to_i32(record_size)?;
        self.marker(KIND_DATA);
        self.buf.extend_from_slice(&count.to_le_bytes());
        self.buf.extend_from_slice(&record_size.to_le_bytes());
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn marker(&mut self, kind: u8) {
        self.buf.push(MARKER);
        self.buf.push(kind);
    }

    fn raw_str(&mut self, len: i32, value: &str) {
        self.buf.extend_from_slice(&len.to_le_bytes());
        self.buf.extend_from_slice(value.as_bytes());
    }
}

/// Lengths are stored as i32
pub(crate) fn len_to_i32(len: usize) -> StreamResult<i32> {
    i32::try_from(len).map_err(|_| StreamError::TooLong(len))
}

/// Read half of the object stream
#[derive(Debug)]
pub struct ObjectInputStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ObjectInputStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Read an object header and check its tag
    pub fn read_object(&mut self, expected: &str) -> StreamResult<()> {
        let found = self.read_any_object()?;
        if found != expected {
            return Err(StreamError::UnexpectedObject { expected: expected.to_string(), found });
        }
        Ok(())
    }

    /// Read an object header, returning whatever tag it carries
    pub fn read_any_object(&mut self) -> StreamResult<String> {
        self.expect_marker(KIND_OBJECT)?;
        self.raw_string()
    }

    /// Tag of the next object without consuming it
    pub fn peek_object(&self) -> StreamResult<String> {
        let mut probe = ObjectInputStream { data: self.data, pos: self.pos };
        probe.read_any_object()
    }

    pub fn end_object(&mut self) -> StreamResult<()> {
        self.expect_marker(KIND_END)
    }

    pub fn read_int(&mut self) -> StreamResult<i32> {
        self.expect_marker(KIND_INT)?;
        self.raw_i32()
    }

    pub fn read_double(&mut self) -> StreamResult<f64> {
        self.expect_marker(KIND_DOUBLE)?;
        let bytes = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Ok(f64::from_le_bytes(raw))
    }

    pub fn read_string(&mut self) -> StreamResult<String> {
        self.expect_marker(KIND_STRING)?;
        self.raw_string()
    }

    /// Read a data blob whose records must be `record_size` bytes each
    ///
    /// Returns the record count and the raw record bytes.
    pub fn read_data(&mut self, record_size: usize) -> StreamResult<(usize, &'a [u8])> {
        self.expect_marker(KIND_DATA)?;
        let count = self.raw_len()?;
        let found = self.raw_len()?;
        if found != record_size && count > 0 {
            return Err(StreamError::RecordSize { expected: record_size, found });
        }
        let total = count
            .checked_mul(record_size)
            .ok_or(StreamError::InvalidLength(count as i64))?;
        let bytes = self.take(total)?;
        Ok((count, bytes))
    }

    fn expect_marker(&mut self, kind: u8) -> StreamResult<()> {
        let bytes = self.take(2)?;
        if bytes[0] != MARKER || bytes[1] != kind {
            return Err(StreamError::UnexpectedType {
                expected: kind as char,
                found: bytes[1] as char,
            });
        }
        Ok(())
    }

    fn raw_i32(&mut self) -> StreamResult<i32> {
        let bytes = self.take(4)?;
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(i32::from_le_bytes(raw))
    }

    fn raw_len(&mut self) -> StreamResult<usize> {
        let value = self.raw_i32()?;
        usize::try_from(value).map_err(|_| StreamError::InvalidLength(i64::from(value)))
    }

    fn raw_string(&mut self) -> StreamResult<String> {
        let len = self.raw_len()?;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| StreamError::InvalidUtf8)
    }

    fn take(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(StreamError::UnexpectedEof);
        }
        let data = self.data;
        let slice = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_read_back_in_order() {
        let mut out = ObjectOutputStream::new();
        out.write_object("Thing").unwrap();
        out.write_int(-7);
        out.write_double(1.25);
        out.write_string("hello").unwrap();
        out.write_data(&[1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        out.end_object();

        let bytes = out.into_bytes();
        let mut input = ObjectInputStream::new(&bytes);
        input.read_object("Thing").unwrap();
        assert_eq!(input.read_int().unwrap(), -7);
        assert_eq!(input.read_double().unwrap(), 1.25);
        assert_eq!(input.read_string().unwrap(), "hello");
        let (count, data) = input.read_data(2).unwrap();
        assert_eq!(count, 3);
        assert_eq!(data, &[1, 2, 3, 4, 5, 6]);
        input.end_object().unwrap();
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn wrong_tag_is_rejected() {
        let mut out = ObjectOutputStream::new();
        out.write_object("Text").unwrap();
        let bytes = out.into_bytes();

        let err = ObjectInputStream::new(&bytes).read_object("Stroke").unwrap_err();
        assert_eq!(
            err,
            StreamError::UnexpectedObject { expected: "Stroke".into(), found: "Text".into() }
        );
    }

    #[test]
    fn wrong_kind_is_rejected() {
        let mut out = ObjectOutputStream::new();
        out.write_double(3.0);
        let bytes = out.into_bytes();

        let err = ObjectInputStream::new(&bytes).read_int().unwrap_err();
        assert_eq!(err, StreamError::UnexpectedType { expected: 'i', found: 'd' });
    }

    #[test]
    fn truncated_input_is_eof() {
        let mut out = ObjectOutputStream::new();
        out.write_double(3.0);
        let bytes = out.into_bytes();

        let err = ObjectInputStream::new(&bytes[..5]).read_double().unwrap_err();
        assert_eq!(err, StreamError::UnexpectedEof);
    }

    #[test]
    fn data_with_foreign_record_size_is_rejected() {
        let mut out = ObjectOutputStream::new();
        out.write_data(&[0; 16], 2, 8).unwrap();
        let bytes = out.into_bytes();

        let err = ObjectInputStream::new(&bytes).read_data(24).unwrap_err();
        assert_eq!(err, StreamError::RecordSize { expected: 24, found: 8 });
    }

    #[test]
    fn oversized_count_is_not_written() {
        let too_long = i32::MAX as usize + 1;
        assert_eq!(len_to_i32(i32::MAX as usize), Ok(i32::MAX));
        assert_eq!(len_to_i32(too_long), Err(StreamError::TooLong(too_long)));

        let mut out = ObjectOutputStream::new();
        out.write_int(1);
        let err = out.write_data(&[], too_long, 0).unwrap_err();
        assert_eq!(err, StreamError::TooLong(too_long));
        // Only the int is left; no header disagreeing with its payload
        assert_eq!(out.as_bytes().len(), 6);
    }

    #[test]
    fn negative_length_is_rejected() {
        let mut bytes = vec![b'_', b's'];
        bytes.extend_from_slice(&(-3i32).to_le_bytes());

        let err = ObjectInputStream::new(&bytes).read_string().unwrap_err();
        assert_eq!(err, StreamError::InvalidLength(-3));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut out = ObjectOutputStream::new();
        out.write_object("Stroke").unwrap();
        let bytes = out.into_bytes();

        let mut input = ObjectInputStream::new(&bytes);
        assert_eq!(input.peek_object().unwrap(), "Stroke");
        input.read_object("Stroke").unwrap();
    }
}
