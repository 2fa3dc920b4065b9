// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Image File Directory traversal.
//!
//! All offsets are relative to the start of the TIFF header, which is also
//! the start of the slice held by [`TiffData`]. An IFD is a 16-bit entry
//! count followed by 12-byte entries: tag, format, component count and a
//! 4-byte field that holds the value itself when it fits in four bytes, or
//! the offset of the value otherwise.

use std::collections::BTreeMap;

use tracing::warn;

use crate::jpeg::reader::Endian;

use super::error::{ExifError, Result};
use super::tags::TagDictionary;
use super::value::{component_size, decode_value, ExifValue};

const ENTRY_LEN: usize = 12;

/// Decoded entries of one IFD, keyed by tag name.
pub type IfdTags = BTreeMap<String, ExifValue>;

/// One 12-byte IFD entry before value resolution.
#[derive(Debug, Clone, Copy)]
struct RawEntry<'a> {
    tag: u16,
    format: u16,
    count: u32,
    /// The 4-byte value/offset field.
    field: &'a [u8],
    /// The field read as an offset.
    offset: u32,
}

/// TIFF data of one EXIF segment together with its byte order.
#[derive(Debug, Clone, Copy)]
pub struct TiffData<'a> {
    data: &'a [u8],
    endian: Endian,
}

impl<'a> TiffData<'a> {
    /// `data` must start at the TIFF header.
    pub fn new(data: &'a [u8], endian: Endian) -> Self {
        Self { data, endian }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Offset of IFD0, stored right after the byte order mark and magic.
    pub fn first_ifd_offset(&self) -> Option<usize> {
        self.endian.read_u32(self.data, 4).map(|offset| offset as usize)
    }

    /// Decode the IFD at `offset`, naming tags through `dict`.
    ///
    /// Entries that cannot be read are skipped; an entry table cut short by
    /// the end of the data yields the entries read so far.
    pub fn read_ifd(&self, offset: usize, dict: &TagDictionary) -> IfdTags {
        let mut tags = IfdTags::new();
        let Some(declared) = self.endian.read_u16(self.data, offset) else {
            warn!(offset, "IFD entry count lies outside TIFF data");
            return tags;
        };
        let declared = declared as usize;

        for i in 0..declared {
            let pos = offset + 2 + i * ENTRY_LEN;
            let Some(entry) = self.raw_entry(pos) else {
                let err = ExifError::TruncatedIfd { offset, read: i, declared };
                warn!("{err}");
                break;
            };

            let name = tag_name(entry.tag, dict);
            let value = match self.value_bytes(&name, &entry) {
                Ok(raw) => decode_value(raw, entry.format, entry.count, self.endian)
                    .unwrap_or_else(|err| {
                        warn!(tag = %name, "{err}, keeping raw bytes");
                        ExifValue::hex(raw)
                    }),
                Err(err) => {
                    warn!("{err}");
                    continue;
                }
            };
            tags.insert(name, value);
        }

        tags
    }

    /// Decode a sub-IFD reached through the pointer tag `name`.
    pub fn read_sub_ifd(
        &self,
        name: &'static str,
        offset: usize,
        dict: &TagDictionary,
    ) -> Result<IfdTags> {
        if offset.checked_add(2).map_or(true, |end| end > self.data.len()) {
            return Err(ExifError::MissingSubIfd {
                name,
                offset,
                available: self.data.len(),
            });
        }
        Ok(self.read_ifd(offset, dict))
    }

    fn raw_entry(&self, pos: usize) -> Option<RawEntry<'a>> {
        let entry = self.data.get(pos..pos.checked_add(ENTRY_LEN)?)?;
        Some(RawEntry {
            tag: self.endian.read_u16(entry, 0)?,
            format: self.endian.read_u16(entry, 2)?,
            count: self.endian.read_u32(entry, 4)?,
            field: &entry[8..],
            offset: self.endian.read_u32(entry, 8)?,
        })
    }

    /// Resolve the bytes holding an entry's value.
    ///
    /// Values of up to four bytes sit in the entry field; longer ones live at
    /// the offset stored there. Formats of unknown size keep the raw field.
    /// An inline value is cut to `count * size` bytes, so padding in the rest
    /// of the field is never rendered.
    fn value_bytes(&self, name: &str, entry: &RawEntry<'a>) -> Result<&'a [u8]> {
        let Some(size) = component_size(entry.format) else {
            return Ok(entry.field);
        };
        let offset = entry.offset as usize;
        let out_of_range = |len| ExifError::ValueOutOfRange {
            tag: name.to_owned(),
            offset,
            len,
        };

        let len = (entry.count as usize)
            .checked_mul(size)
            .ok_or_else(|| out_of_range(usize::MAX))?;
        if len <= 4 {
            return Ok(&entry.field[..len]);
        }
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| out_of_range(len))
    }
}

/// Name for a tag id, falling back to the hex id for unknown tags.
fn tag_name(tag: u16, dict: &TagDictionary) -> String {
    let id = format!("{tag:04x}");
    match dict.name(&id) {
        Some(name) => name.to_owned(),
        None => id,
    }
}
