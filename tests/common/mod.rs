// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Builders for synthetic JPEG and EXIF byte streams.

#![allow(dead_code)]

/// Assembles a JPEG byte stream marker by marker. Starts with SOI.
pub struct JpegBuilder {
    bytes: Vec<u8>,
}

impl JpegBuilder {
    pub fn new() -> Self {
        Self {
            bytes: vec![0xFF, 0xD8],
        }
    }

    /// A stream that does not start with SOI.
    pub fn empty() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// A length-prefixed segment: code, `body.len() + 2`, body.
    pub fn segment(mut self, code: u16, body: &[u8]) -> Self {
        self.bytes.extend(code.to_be_bytes());
        self.bytes.extend((body.len() as u16 + 2).to_be_bytes());
        self.bytes.extend_from_slice(body);
        self
    }

    pub fn jfif(self) -> Self {
        self.segment(
            0xFFE0,
            &[b'J', b'F', b'I', b'F', 0, 1, 2, 1, 0, 72, 0, 72, 0, 0],
        )
    }

    pub fn exif(self, tiff: &[u8]) -> Self {
        let mut body = b"Exif\0\0".to_vec();
        body.extend_from_slice(tiff);
        self.segment(0xFFE1, &body)
    }

    /// One 8-bit quantization table with every coefficient set to `value`.
    pub fn dqt_uniform(self, id: u8, value: u8) -> Self {
        let mut body = vec![id];
        body.extend([value; 64]);
        self.segment(0xFFDB, &body)
    }

    /// SOF with 8-bit precision; components are `(id, sampling, quant table)`.
    pub fn sof(self, code: u16, width: u16, height: u16, components: &[(u8, u8, u8)]) -> Self {
        let mut body = vec![8];
        body.extend(height.to_be_bytes());
        body.extend(width.to_be_bytes());
        body.push(components.len() as u8);
        for &(id, sampling, qt) in components {
            body.extend([id, sampling, qt]);
        }
        self.segment(code, &body)
    }

    pub fn dht(self, class_and_id: u8, counts: [u8; 16], symbols: &[u8]) -> Self {
        let mut body = vec![class_and_id];
        body.extend(counts);
        body.extend_from_slice(symbols);
        self.segment(0xFFC4, &body)
    }

    pub fn dri(self, interval: u16) -> Self {
        self.segment(0xFFDD, &interval.to_be_bytes())
    }

    /// SOS header for `components` (`(selector, dc << 4 | ac)`), full
    /// spectrum, followed by `data` as entropy-coded bytes.
    pub fn sos(self, components: &[(u8, u8)], data: &[u8]) -> Self {
        let mut body = vec![components.len() as u8];
        for &(selector, tables) in components {
            body.extend([selector, tables]);
        }
        body.extend([0, 63, 0]);
        self.segment(0xFFDA, &body).raw(data)
    }

    pub fn eoi(self) -> Self {
        self.raw(&[0xFF, 0xD9])
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Writes TIFF structures in either byte order.
pub struct TiffWriter {
    big_endian: bool,
    bytes: Vec<u8>,
}

impl TiffWriter {
    /// Header with IFD0 at `ifd0`.
    pub fn new(big_endian: bool, ifd0: u32) -> Self {
        let mut writer = Self {
            big_endian,
            bytes: Vec::new(),
        };
        writer.bytes.extend(if big_endian { b"MM" } else { b"II" });
        writer.u16(42);
        writer.u32(ifd0);
        writer
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn u16(&mut self, v: u16) {
        let bytes = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.bytes.extend(bytes);
    }

    pub fn u32(&mut self, v: u32) {
        let bytes = if self.big_endian { v.to_be_bytes() } else { v.to_le_bytes() };
        self.bytes.extend(bytes);
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Entry whose value field holds a 32-bit number (a long or an offset).
    pub fn entry(&mut self, tag: u16, format: u16, count: u32, field: u32) {
        self.u16(tag);
        self.u16(format);
        self.u32(count);
        self.u32(field);
    }

    /// Entry with a single short stored inline.
    pub fn entry_short(&mut self, tag: u16, value: u16) {
        self.u16(tag);
        self.u16(3);
        self.u32(1);
        self.u16(value);
        self.u16(0);
    }

    /// Entry with up to four bytes stored inline as written.
    pub fn entry_inline(&mut self, tag: u16, format: u16, count: u32, field: [u8; 4]) {
        self.u16(tag);
        self.u16(format);
        self.u32(count);
        self.bytes(&field);
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Offsets used by [`camera_tiff`].
pub const MAKE_OFFSET: u32 = 62;
pub const EXIF_IFD_OFFSET: u32 = 68;
pub const EXPOSURE_OFFSET: u32 = 98;
pub const GPS_IFD_OFFSET: u32 = 106;

/// A small camera TIFF block:
///
/// - IFD0: make `"Canon"`, orientation 6, Exif and GPS pointers
/// - Exif IFD: exposure time 1/100, ISO 200
/// - GPS IFD: latitude ref `"N"`, version 2.3.0.0
pub fn camera_tiff(big_endian: bool) -> Vec<u8> {
    let mut w = TiffWriter::new(big_endian, 8);

    w.u16(4);
    w.entry(0x010F, 2, 6, MAKE_OFFSET);
    w.entry_short(0x0112, 6);
    w.entry(0x8769, 4, 1, EXIF_IFD_OFFSET);
    w.entry(0x8825, 4, 1, GPS_IFD_OFFSET);
    w.u32(0);
    assert_eq!(w.len(), MAKE_OFFSET as usize);
    w.bytes(b"Canon\0");

    assert_eq!(w.len(), EXIF_IFD_OFFSET as usize);
    w.u16(2);
    w.entry(0x829A, 5, 1, EXPOSURE_OFFSET);
    w.entry_short(0x8827, 200);
    w.u32(0);
    assert_eq!(w.len(), EXPOSURE_OFFSET as usize);
    w.u32(1);
    w.u32(100);

    assert_eq!(w.len(), GPS_IFD_OFFSET as usize);
    w.u16(2);
    w.entry_inline(0x0001, 2, 2, [b'N', 0, 0, 0]);
    w.entry_inline(0x0000, 1, 4, [2, 3, 0, 0]);
    w.u32(0);

    w.finish()
}

/// Huffman counts and symbols of the standard luminance DC table.
pub fn luminance_dc() -> ([u8; 16], Vec<u8>) {
    (
        [0, 1, 5, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0],
        (0..12).collect(),
    )
}

/// A baseline grayscale file with JFIF and EXIF headers.
pub fn baseline_jpeg(scan_data: &[u8]) -> Vec<u8> {
    let (counts, symbols) = luminance_dc();
    JpegBuilder::new()
        .jfif()
        .exif(&camera_tiff(true))
        .dqt_uniform(0, 0x10)
        .sof(0xFFC0, 16, 8, &[(1, 0x11, 0)])
        .dht(0x00, counts, &symbols)
        .sos(&[(1, 0x00)], scan_data)
        .eoi()
        .build()
}
