// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Quantization (DQT) and arithmetic conditioning (DAC) table segments.
//!
//! Both are field-driven: the table count is derived from the segment
//! length, and the cursor advances by the tables actually read.

use super::error::Result;
use super::reader::Cursor;

/// Size of one 8-bit DQT table entry: id byte plus 64 coefficients.
const DQT_ENTRY_LEN: usize = 65;

/// One 8-bit quantization table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizationTable {
    /// Raw precision/id byte as stored (precision in the high nibble).
    pub id: u8,
    /// Coefficients in stored (zig-zag) order.
    pub coefficients: [u8; 64],
}

impl QuantizationTable {
    /// Table destination (low nibble of the id byte).
    pub fn destination(&self) -> u8 {
        self.id & 0x0F
    }
}

/// Decode a DQT segment at the cursor (positioned at the length field).
///
/// Reads `(length - 2) / 65` tables. 16-bit precision tables are not
/// supported and are read as if they were 8-bit.
pub fn decode_dqt(cur: &mut Cursor<'_>) -> Result<Vec<QuantizationTable>> {
    let length = cur.read_u16()? as usize;
    let count = length.saturating_sub(2) / DQT_ENTRY_LEN;

    let mut tables = Vec::with_capacity(count);
    for _ in 0..count {
        let id = cur.read_u8()?;
        let coefficients = cur.read_array::<64>()?;
        tables.push(QuantizationTable { id, coefficients });
    }
    Ok(tables)
}

/// One arithmetic-coding conditioning entry from a DAC segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditioningEntry {
    /// Table class and destination byte.
    pub identifier: u8,
    /// Conditioning value.
    pub value: u8,
}

/// Decode a DAC segment at the cursor (positioned at the length field).
pub fn decode_dac(cur: &mut Cursor<'_>) -> Result<Vec<ConditioningEntry>> {
    let length = cur.read_u16()? as usize;
    let count = length.saturating_sub(2) / 2;

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let [identifier, value] = cur.read_array::<2>()?;
        entries.push(ConditioningEntry { identifier, value });
    }
    Ok(entries)
}
