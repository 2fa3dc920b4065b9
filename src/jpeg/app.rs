// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JFIF application header (APP0).

use super::error::Result;
use super::reader::{ascii_string, Cursor};

/// Fixed JFIF APP0 fields.
///
/// Exactly 14 bytes follow the length field. Thumbnail pixels are not read;
/// any bytes past the fixed fields are left for the next marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JfifHeader {
    /// Identifier, normally `"JFIF\0"`.
    pub identifier: String,
    /// Version, major in the high byte (e.g. `0x0102` for 1.02).
    pub version: u16,
    /// Density units: 0 = aspect ratio only, 1 = dots per inch, 2 = dots per cm.
    pub units: u8,
    pub x_density: u16,
    pub y_density: u16,
    pub thumbnail_width: u8,
    pub thumbnail_height: u8,
}

impl JfifHeader {
    pub fn major_version(&self) -> u8 {
        (self.version >> 8) as u8
    }

    pub fn minor_version(&self) -> u8 {
        self.version as u8
    }
}

/// Decode a JFIF APP0 segment at the cursor (positioned at the length field).
pub fn decode_jfif(cur: &mut Cursor<'_>) -> Result<JfifHeader> {
    let _length = cur.read_u16()?;
    let identifier = ascii_string(cur.take(5)?);
    let version = cur.read_u16()?;
    let units = cur.read_u8()?;
    let x_density = cur.read_u16()?;
    let y_density = cur.read_u16()?;
    let thumbnail_width = cur.read_u8()?;
    let thumbnail_height = cur.read_u8()?;

    Ok(JfifHeader {
        identifier,
        version,
        units,
        x_density,
        y_density,
        thumbnail_width,
        thumbnail_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn parse_jfif_102() {
        let data = [
            0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x02, 0x01, 0x00, 0x48, 0x00, 0x48,
            0x00, 0x00,
        ];
        let mut cur = Cursor::new(&data);
        let jfif = decode_jfif(&mut cur).unwrap();
        assert_eq!(jfif.identifier, "JFIF\0");
        assert_eq!(jfif.version, 0x0102);
        assert_eq!(jfif.major_version(), 1);
        assert_eq!(jfif.minor_version(), 2);
        assert_eq!(jfif.units, 1);
        assert_eq!(jfif.x_density, 72);
        assert_eq!(jfif.y_density, 72);
        assert_eq!(jfif.thumbnail_width, 0);
        assert!(cur.is_at_end());
    }

    #[test]
    fn thumbnail_bytes_are_not_consumed() {
        let mut data = vec![
            0x00, 0x16, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01,
            0x01, 0x02,
        ];
        data.extend([0xAA; 6]);
        let mut cur = Cursor::new(&data);
        let jfif = decode_jfif(&mut cur).unwrap();
        assert_eq!((jfif.thumbnail_width, jfif.thumbnail_height), (1, 2));
        assert_eq!(cur.position(), 16);
    }
}
