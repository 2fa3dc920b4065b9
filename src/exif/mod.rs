// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! EXIF (APP1) metadata decoding.
//!
//! An EXIF segment is a 6-byte identifier (`"Exif\0\0"`) followed by a TIFF
//! structure: byte order mark (`"MM"` or `"II"`), the magic number 42 and the
//! offset of IFD0. IFD0 may point to an Exif sub-IFD and a GPS sub-IFD, which
//! are decoded one level deep. Nothing in here fails a decode: broken
//! offsets produce empty or partial entry maps.

pub mod error;
pub mod ifd;
pub mod tags;
pub mod value;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::jpeg::error::Result;
use crate::jpeg::reader::{ascii_string, Cursor, Endian};

pub use error::ExifError;
pub use ifd::{IfdTags, TiffData};
pub use tags::{TagDictionaries, TagDictionary, EXIF_IFD_POINTER, GPS_INFO_IFD_POINTER};
pub use value::{ExifValue, Rational, SignedRational};

/// Identifier that opens an EXIF APP1 payload.
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

/// Size of the TIFF header: byte order, magic, IFD0 offset.
const TIFF_HEADER_LEN: usize = 8;

/// Decoded entries of an IFD plus its resolved sub-IFDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifEntries {
    pub tags: BTreeMap<String, ExifValue>,
    /// Entries of the IFD referenced by `exifIFDPointer`.
    pub sub_exif: Option<Box<ExifEntries>>,
    /// Entries of the IFD referenced by `gpsInfoIFDPointer`.
    pub gps_info: Option<Box<ExifEntries>>,
}

impl ExifEntries {
    pub fn get(&self, name: &str) -> Option<&ExifValue> {
        self.tags.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.sub_exif.is_none() && self.gps_info.is_none()
    }
}

impl From<IfdTags> for ExifEntries {
    fn from(tags: IfdTags) -> Self {
        Self {
            tags,
            ..Self::default()
        }
    }
}

/// A decoded APP1 segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifSegment {
    /// The 6-byte identifier as text.
    pub identifier: String,
    /// TIFF byte order; `None` when the payload is not EXIF.
    pub byte_order: Option<Endian>,
    pub entries: ExifEntries,
}

/// Decode an APP1 segment at the cursor (positioned at the length field).
///
/// The cursor always advances by the declared segment length.
pub fn decode_exif(cur: &mut Cursor<'_>, tags: &TagDictionaries) -> Result<ExifSegment> {
    let length = cur.read_u16()? as usize;
    let body = cur.take(length.saturating_sub(2))?;
    Ok(parse_exif(body, tags))
}

/// Decode an APP1 payload (after the length field).
pub fn parse_exif(body: &[u8], tags: &TagDictionaries) -> ExifSegment {
    let (identifier, tiff) = body.split_at(body.len().min(EXIF_IDENTIFIER.len()));
    let identifier_text = ascii_string(identifier);

    if identifier != EXIF_IDENTIFIER {
        debug!(identifier = %identifier_text.escape_debug(), "APP1 payload is not EXIF");
        return ExifSegment {
            identifier: identifier_text,
            byte_order: None,
            entries: ExifEntries::default(),
        };
    }

    let byte_order = if tiff.starts_with(b"MM") {
        Endian::Big
    } else {
        Endian::Little
    };

    ExifSegment {
        identifier: identifier_text,
        byte_order: Some(byte_order),
        entries: decode_tiff(TiffData::new(tiff, byte_order), tags),
    }
}

/// Walk IFD0 and its Exif/GPS sub-IFDs.
pub fn decode_tiff(tiff: TiffData<'_>, tags: &TagDictionaries) -> ExifEntries {
    if tiff.len() < TIFF_HEADER_LEN {
        warn!(len = tiff.len(), "TIFF header truncated");
        return ExifEntries::default();
    }
    let Some(ifd0) = tiff.first_ifd_offset() else {
        return ExifEntries::default();
    };
    if ifd0 > tiff.len() {
        warn!(offset = ifd0, len = tiff.len(), "IFD0 offset beyond EXIF data");
        return ExifEntries::default();
    }

    let mut entries = ExifEntries::from(tiff.read_ifd(ifd0, &tags.ifd));
    if let Some(offset) = pointer(&entries, EXIF_IFD_POINTER) {
        entries.sub_exif = Some(Box::new(sub_ifd(&tiff, EXIF_IFD_POINTER, offset, &tags.ifd)));
    }
    if let Some(offset) = pointer(&entries, GPS_INFO_IFD_POINTER) {
        entries.gps_info = Some(Box::new(sub_ifd(&tiff, GPS_INFO_IFD_POINTER, offset, &tags.gps)));
    }
    entries
}

/// Non-zero pointer value of a tag in IFD0.
fn pointer(entries: &ExifEntries, name: &str) -> Option<usize> {
    entries
        .get(name)
        .and_then(ExifValue::as_u32)
        .filter(|&offset| offset != 0)
        .map(|offset| offset as usize)
}

fn sub_ifd(tiff: &TiffData<'_>, name: &'static str, offset: usize, dict: &TagDictionary) -> ExifEntries {
    debug!(name, offset, "decoding sub-IFD");
    match tiff.read_sub_ifd(name, offset, dict) {
        Ok(tags) => ExifEntries::from(tags),
        Err(err) => {
            warn!("{err}");
            ExifEntries::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn short_identifier() {
        let segment = parse_exif(b"Ex", TagDictionaries::standard());
        assert_eq!(segment.identifier, "Ex");
        assert_eq!(segment.byte_order, None);
        assert!(segment.entries.is_empty());
    }

    #[test]
    fn byte_order_mark() {
        let mut body = EXIF_IDENTIFIER.to_vec();
        body.extend([b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0]);
        let segment = parse_exif(&body, TagDictionaries::standard());
        assert_eq!(segment.byte_order, Some(Endian::Little));
        assert!(segment.entries.is_empty());

        // Anything but "MM" reads as little-endian.
        body[6..8].copy_from_slice(b"XX");
        let segment = parse_exif(&body, TagDictionaries::standard());
        assert_eq!(segment.byte_order, Some(Endian::Little));
    }

    #[test]
    fn truncated_tiff_header() {
        let mut body = EXIF_IDENTIFIER.to_vec();
        body.extend(b"MM\0*");
        let segment = parse_exif(&body, TagDictionaries::standard());
        assert_eq!(segment.byte_order, Some(Endian::Big));
        assert!(segment.entries.is_empty());
    }

    #[test]
    fn decode_consumes_declared_length() {
        let mut data = vec![0x00, 0x0C];
        data.extend(EXIF_IDENTIFIER);
        data.extend(b"MM\0*");
        data.extend([0xFF, 0xD9]);
        let mut cur = Cursor::new(&data);
        decode_exif(&mut cur, TagDictionaries::standard()).unwrap();
        assert_eq!(cur.position(), 12);
    }
}
