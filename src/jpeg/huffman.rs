// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Huffman table (DHT) decoding.
//!
//! A DHT segment holds one or more tables back to back. Each table is a
//! class/id byte, 16 per-length code counts and the symbols in order of
//! increasing code length. Codes are not stored: they are derived with the
//! canonical assignment of ITU-T T.81 Annex C and exposed as bit strings.

use std::collections::BTreeMap;

use tracing::warn;

use super::error::Result;
use super::reader::Cursor;

/// Table class from the high nibble of the class/id byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableClass {
    /// Class 0.
    Dc,
    /// Class 1.
    Ac,
    /// Any other nibble value, kept as stored.
    Other(u8),
}

impl TableClass {
    fn from_nibble(nibble: u8) -> Self {
        match nibble {
            0 => Self::Dc,
            1 => Self::Ac,
            n => Self::Other(n),
        }
    }
}

/// One Huffman table from a DHT segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTable {
    pub class: TableClass,
    /// Table identifier (0–3 in conforming files).
    pub id: u8,
    /// `counts[k]` = number of codes of length `k + 1`.
    pub counts: [u8; 16],
    /// Symbols in order of increasing code length.
    pub symbols: Vec<u8>,
    /// Canonical code bit string → symbol.
    pub codes: BTreeMap<String, u8>,
}

impl HuffmanTable {
    /// Build a table from stored counts and symbols.
    pub fn new(class: TableClass, id: u8, counts: [u8; 16], symbols: Vec<u8>) -> Self {
        let codes = canonical_codes(&counts, &symbols);
        Self {
            class,
            id,
            counts,
            symbols,
            codes,
        }
    }

    /// Look up the symbol for a code bit string such as `"0110"`.
    pub fn symbol(&self, code: &str) -> Option<u8> {
        self.codes.get(code).copied()
    }
}

/// Assign canonical codes to `symbols`.
///
/// Starting from code 0, each length in turn receives `counts[k]`
/// consecutive values; the running code is shifted left once per length,
/// including lengths with no codes.
pub fn canonical_codes(counts: &[u8; 16], symbols: &[u8]) -> BTreeMap<String, u8> {
    let mut codes = BTreeMap::new();
    let mut code: u32 = 0;
    let mut next = symbols.iter();

    for (k, &count) in counts.iter().enumerate() {
        let length = k + 1;
        for _ in 0..count {
            let Some(&symbol) = next.next() else {
                return codes;
            };
            codes.insert(format!("{code:0length$b}"), symbol);
            code += 1;
        }
        code <<= 1;
    }

    codes
}

/// Parse a DHT segment body (after the 2-byte length).
///
/// A table whose counts or symbols run past the end of the body ends the
/// parse; tables before it are kept.
pub fn parse_dht(body: &[u8]) -> Vec<HuffmanTable> {
    let mut tables = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let tc_th = body[pos];
        let Some(count_bytes) = body.get(pos + 1..pos + 17) else {
            warn!(offset = pos, "DHT table header runs past segment end");
            break;
        };
        let mut counts = [0u8; 16];
        counts.copy_from_slice(count_bytes);
        pos += 17;

        let total: usize = counts.iter().map(|&c| c as usize).sum();
        let Some(symbols) = body.get(pos..pos + total) else {
            warn!(offset = pos, total, "DHT symbols run past segment end");
            break;
        };
        pos += total;

        tables.push(HuffmanTable::new(
            TableClass::from_nibble(tc_th >> 4),
            tc_th & 0x0F,
            counts,
            symbols.to_vec(),
        ));
    }

    tables
}

/// Decode a DHT segment at the cursor (positioned at the length field).
pub fn decode_dht(cur: &mut Cursor<'_>) -> Result<Vec<HuffmanTable>> {
    let length = cur.read_u16()? as usize;
    let body = cur.take(length.saturating_sub(2))?;
    Ok(parse_dht(body))
}
