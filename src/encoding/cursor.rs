//! # Sequential Byte Cursors
//!
//! This module provides `WriteCursor` for producing the canonical binary form
//! of a record and `ReadCursor` for consuming it. Both are single-use,
//! position-tracking views: a writer appends to an owned buffer, a reader
//! walks a borrowed slice exactly once.
//!
//! ## Integer Encoding
//!
//! All fixed-width integers are big-endian. There is no alignment and no
//! padding; values are packed back to back.
//!
//! ## Variable-Length Prefix Format
//!
//! Variable-length byte runs carry a 1-3 byte length prefix chosen by the
//! length of the payload:
//!
//! | Payload Length | Prefix Bytes | Format |
//! |----------------|--------------|--------|
//! | 0 - 192 | 1 | `[len]` |
//! | 193 - 12480 | 2 | `[193 + (len-193)>>8, (len-193)&FF]` |
//! | 12481 - 918744 | 3 | `[241 + (len-12481)>>16, (len-12481)>>8 &FF, (len-12481)&FF]` |
//!
//! A leading prefix byte of 255 never occurs in valid data. Payloads longer
//! than [`MAX_VL_LEN`] cannot be encoded and are rejected.
//!
//! ## Boundary Values
//!
//! Key boundary values for testing:
//!
//! - 192: maximum 1-byte prefix
//! - 193: minimum 2-byte prefix
//! - 12480: maximum 2-byte prefix
//! - 12481: minimum 3-byte prefix
//! - 918744: maximum encodable length
//!
//! ## Error Handling
//!
//! Every `ReadCursor` getter checks bounds before reading and fails with
//! `RecordError::MalformedRecord` when the input is exhausted or a length
//! prefix is invalid. Readers never panic and never read past the end.

use eyre::Result;

use crate::error::RecordError;

/// Longest byte run the variable-length prefix format can describe.
pub const MAX_VL_LEN: usize = 918744;

/// Append-only writer producing the canonical byte form.
#[derive(Debug, Default)]
pub struct WriteCursor {
    buf: Vec<u8>,
}

impl WriteCursor {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn put_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_slice(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Writes a length prefix followed by the payload bytes.
    pub fn put_vl(&mut self, data: &[u8]) -> Result<()> {
        let len = data.len();
        if len <= 192 {
            self.buf.push(len as u8);
        } else if len <= 12480 {
            let v = len - 193;
            self.buf.push((193 + (v >> 8)) as u8);
            self.buf.push((v & 0xFF) as u8);
        } else if len <= MAX_VL_LEN {
            let v = len - 12481;
            self.buf.push((241 + (v >> 16)) as u8);
            self.buf.push(((v >> 8) & 0xFF) as u8);
            self.buf.push((v & 0xFF) as u8);
        } else {
            return Err(RecordError::MalformedRecord(format!(
                "variable-length run of {} bytes exceeds the {} byte limit",
                len, MAX_VL_LEN
            ))
            .into());
        }
        self.buf.extend_from_slice(data);
        Ok(())
    }
}

/// Sequential reader over a borrowed byte slice.
#[derive(Debug)]
pub struct ReadCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(RecordError::MalformedRecord(format!(
                "unexpected end of input: need {} bytes at offset {}, have {}",
                count,
                self.pos,
                self.remaining()
            ))
            .into());
        }
        let slice = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(slice)
    }

    pub fn get_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn get_u16(&mut self) -> Result<u16> {
        let bytes: [u8; 2] = self.take(2)?.try_into().unwrap();
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().unwrap();
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn get_u64(&mut self) -> Result<u64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().unwrap();
        Ok(u64::from_be_bytes(bytes))
    }

    pub fn get_slice(&mut self, count: usize) -> Result<&'a [u8]> {
        self.take(count)
    }

    /// Reads a length prefix and returns the payload it describes.
    pub fn get_vl(&mut self) -> Result<&'a [u8]> {
        let b0 = self.get_u8()? as usize;
        let len = if b0 <= 192 {
            b0
        } else if b0 <= 240 {
            let b1 = self.get_u8()? as usize;
            193 + ((b0 - 193) << 8) + b1
        } else if b0 <= 254 {
            let b1 = self.get_u8()? as usize;
            let b2 = self.get_u8()? as usize;
            12481 + ((b0 - 241) << 16) + (b1 << 8) + b2
        } else {
            return Err(RecordError::MalformedRecord(
                "invalid variable-length prefix byte 255".to_string(),
            )
            .into());
        };
        if len > MAX_VL_LEN {
            return Err(RecordError::MalformedRecord(format!(
                "variable-length prefix describes {} bytes, above the {} byte limit",
                len, MAX_VL_LEN
            ))
            .into());
        }
        self.take(len)
    }
}
