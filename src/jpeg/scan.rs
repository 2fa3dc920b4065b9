// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Start of Scan (SOS) header parsing and entropy-coded span delimiting.
//!
//! The SOS header is followed directly by entropy-coded data, which has no
//! length field. Its end is found by scanning for the next real marker:
//! `0xFF00` (byte stuffing) and `0xFFD0`–`0xFFD7` (restart markers) belong to
//! the entropy-coded data, any other `0xFF xx` pair starts the next segment.
//! The data itself is never copied or decoded.

use std::ops::Range;

use super::error::Result;
use super::reader::Cursor;

/// Component selector for one scan component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanComponentSpec {
    /// Scan component selector (matches a frame component ID).
    pub selector: u8,
    /// DC entropy coding table (high nibble of the table selector byte).
    pub dc_table_id: u8,
    /// AC entropy coding table (low nibble of the table selector byte).
    pub ac_table_id: u8,
}

/// Byte range `[start, end)` of entropy-coded data in the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntropyCodedSegment {
    pub start: usize,
    pub end: usize,
}

impl EntropyCodedSegment {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The entropy-coded bytes within `data`, the buffer this segment was
    /// decoded from. Returns an empty slice for a buffer that is too short.
    pub fn bytes<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data.get(self.range()).unwrap_or(&[])
    }
}

/// A decoded SOS segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHeader {
    pub components: Vec<ScanComponentSpec>,
    /// Start of spectral selection (zig-zag index).
    pub start_of_spectral: u8,
    /// End of spectral selection (zig-zag index).
    pub end_of_spectral: u8,
    /// Packed successive approximation bits: Ah high nibble, Al low nibble.
    pub successive_approximation: u8,
    /// Entropy-coded data following the header, restart markers included.
    pub data: EntropyCodedSegment,
}

impl ScanHeader {
    /// Successive approximation high bit.
    pub fn ah(&self) -> u8 {
        self.successive_approximation >> 4
    }

    /// Successive approximation low bit (point transform).
    pub fn al(&self) -> u8 {
        self.successive_approximation & 0x0F
    }
}

/// Find the end of entropy-coded data starting at `start`.
///
/// Returns the offset of the `0xFF` byte that begins the next marker, or
/// `data.len()` when no marker follows.
pub fn find_scan_end(data: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < data.len() {
        if data[pos] != 0xFF {
            pos += 1;
            continue;
        }
        match data.get(pos + 1) {
            // Byte-stuffed 0xFF or restart marker: part of the scan.
            Some(0x00) | Some(0xD0..=0xD7) => pos += 2,
            Some(_) => return pos,
            None => break,
        }
    }
    data.len()
}

/// Decode an SOS segment at the cursor (positioned at the length field),
/// then consume the entropy-coded data that follows it.
pub fn decode_sos(cur: &mut Cursor<'_>) -> Result<ScanHeader> {
    let _length = cur.read_u16()?;
    let num_components = cur.read_u8()? as usize;

    let mut components = Vec::with_capacity(num_components);
    for _ in 0..num_components {
        let [selector, tables] = cur.read_array::<2>()?;
        components.push(ScanComponentSpec {
            selector,
            dc_table_id: tables >> 4,
            ac_table_id: tables & 0x0F,
        });
    }
    let [start_of_spectral, end_of_spectral, successive_approximation] = cur.read_array::<3>()?;

    let start = cur.position();
    let end = find_scan_end(cur.data(), start);
    cur.advance_to(end)?;

    Ok(ScanHeader {
        components,
        start_of_spectral,
        end_of_spectral,
        successive_approximation,
        data: EntropyCodedSegment { start, end },
    })
}
