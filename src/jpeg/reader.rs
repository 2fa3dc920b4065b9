// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Byte-level reading for marker segments.
//!
//! Provides [`Cursor`], the forward-only read position shared by every
//! segment decoder during one pass, and [`Endian`]-aware scalar readers used
//! by the EXIF/TIFF decoder. Cursor reads fail with
//! [`JpegError::TruncatedStream`]; the offset-based scalar readers return
//! `None` when the field does not fit, since TIFF offsets are soft failures.

use std::fmt::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::error::{JpegError, Result};

/// Byte order of multi-byte fields.
///
/// JPEG marker segments are always big-endian; EXIF payloads pick their own
/// order in the TIFF header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endian {
    /// "MM" (Motorola) order.
    Big,
    /// "II" (Intel) order.
    Little,
}

impl Endian {
    /// Read a `u16` at `pos`.
    pub fn read_u16(self, data: &[u8], pos: usize) -> Option<u16> {
        let bytes = field(data, pos, 2)?;
        Some(match self {
            Endian::Big => BigEndian::read_u16(bytes),
            Endian::Little => LittleEndian::read_u16(bytes),
        })
    }

    /// Read a `u32` at `pos`.
    pub fn read_u32(self, data: &[u8], pos: usize) -> Option<u32> {
        let bytes = field(data, pos, 4)?;
        Some(match self {
            Endian::Big => BigEndian::read_u32(bytes),
            Endian::Little => LittleEndian::read_u32(bytes),
        })
    }

    /// Read an `i32` at `pos`.
    pub fn read_i32(self, data: &[u8], pos: usize) -> Option<i32> {
        let bytes = field(data, pos, 4)?;
        Some(match self {
            Endian::Big => BigEndian::read_i32(bytes),
            Endian::Little => LittleEndian::read_i32(bytes),
        })
    }
}

fn field(data: &[u8], pos: usize, len: usize) -> Option<&[u8]> {
    data.get(pos..pos.checked_add(len)?)
}

/// Read a single byte at `pos`.
pub fn read_u8(data: &[u8], pos: usize) -> Option<u8> {
    data.get(pos).copied()
}

/// Render bytes as lowercase hex, two digits per byte, no prefix.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{b:02x}");
    }
    out
}

/// Decode bytes as single-byte text (each byte maps to the same code point).
pub fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Decode bytes as UTF-8, replacing invalid sequences.
pub fn utf8_string(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Strip trailing NUL bytes.
pub fn trim_trailing_nul(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Forward-only read position over a JPEG byte stream.
///
/// Every read advances the position by exactly the bytes returned. The
/// position never exceeds the buffer length.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The whole underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the current position.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Consume `len` bytes and return them.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(self.truncated(len));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Consume `len` bytes without looking at them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    /// Consume everything up to the end of the buffer.
    pub fn skip_to_end(&mut self) {
        self.pos = self.data.len();
    }

    /// Move forward to an absolute offset at or after the current one.
    pub fn advance_to(&mut self, offset: usize) -> Result<()> {
        debug_assert!(offset >= self.pos);
        self.skip(offset.saturating_sub(self.pos))
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a big-endian `u16`.
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    /// Read a fixed-size byte array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn truncated(&self, needed: usize) -> JpegError {
        JpegError::TruncatedStream {
            offset: self.pos,
            needed,
            available: self.remaining(),
        }
    }
}
