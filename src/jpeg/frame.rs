// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JPEG frame header (SOFn) parsing.
//!
//! Extracts precision, image dimensions and the per-component sampling and
//! quantization table assignments. All SOF variants (baseline, extended,
//! progressive, lossless, differential, arithmetic) share this layout.

use super::error::Result;
use super::reader::Cursor;

/// Information about one image component from SOF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameComponent {
    /// Component ID (typically 1=Y, 2=Cb, 3=Cr).
    pub id: u8,
    /// Packed sampling factors: horizontal in the high nibble, vertical in
    /// the low nibble.
    pub sampling_factors: u8,
    /// Quantization table ID.
    pub quantization_table_id: u8,
}

impl FrameComponent {
    /// Horizontal sampling factor.
    pub fn h_sampling(&self) -> u8 {
        self.sampling_factors >> 4
    }

    /// Vertical sampling factor.
    pub fn v_sampling(&self) -> u8 {
        self.sampling_factors & 0x0F
    }
}

/// Frame header parsed from a SOFn marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Sample precision in bits.
    pub precision: u8,
    /// Image height in pixels.
    pub height: u16,
    /// Image width in pixels.
    pub width: u16,
    /// Components in the frame, as many as the stored component count.
    pub components: Vec<FrameComponent>,
}

impl FrameHeader {
    /// Maximum horizontal sampling factor across all components.
    pub fn max_h_sampling(&self) -> u8 {
        self.components.iter().map(FrameComponent::h_sampling).max().unwrap_or(0)
    }

    /// Maximum vertical sampling factor across all components.
    pub fn max_v_sampling(&self) -> u8 {
        self.components.iter().map(FrameComponent::v_sampling).max().unwrap_or(0)
    }
}

/// Decode a SOF segment at the cursor (positioned at the length field).
///
/// The layout is read field by field; the length field is not checked
/// against the component count.
pub fn decode_sof(cur: &mut Cursor<'_>) -> Result<FrameHeader> {
    let _length = cur.read_u16()?;
    let precision = cur.read_u8()?;
    let height = cur.read_u16()?;
    let width = cur.read_u16()?;
    let num_components = cur.read_u8()? as usize;

    let mut components = Vec::with_capacity(num_components);
    for _ in 0..num_components {
        let [id, sampling_factors, quantization_table_id] = cur.read_array::<3>()?;
        components.push(FrameComponent {
            id,
            sampling_factors,
            quantization_table_id,
        });
    }

    Ok(FrameHeader {
        precision,
        height,
        width,
        components,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::error::JpegError;
    use test_log::test;

    #[test]
    fn parse_ycbcr_420() {
        // length=17, precision=8, height=480, width=640, 3 components
        let data = [
            0, 17, 8, 1, 0xE0, 2, 0x80, 3,
            1, 0x22, 0, // Y: 2x2, qt=0
            2, 0x11, 1, // Cb: 1x1, qt=1
            3, 0x11, 1, // Cr: 1x1, qt=1
        ];
        let mut cur = Cursor::new(&data);
        let fh = decode_sof(&mut cur).unwrap();
        assert_eq!(fh.precision, 8);
        assert_eq!(fh.height, 480);
        assert_eq!(fh.width, 640);
        assert_eq!(fh.components.len(), 3);
        assert_eq!(fh.components[0].h_sampling(), 2);
        assert_eq!(fh.components[0].v_sampling(), 2);
        assert_eq!(fh.components[2].quantization_table_id, 1);
        assert_eq!(fh.max_h_sampling(), 2);
        assert_eq!(fh.max_v_sampling(), 2);
        assert!(cur.is_at_end());
    }

    #[test]
    fn component_count_drives_consumption() {
        // Length claims 8 bytes but the header announces one component.
        let data = [0, 8, 8, 0, 8, 0, 8, 1, 1, 0x11, 0, 0xFF, 0xD9];
        let mut cur = Cursor::new(&data);
        let fh = decode_sof(&mut cur).unwrap();
        assert_eq!(fh.components.len(), 1);
        assert_eq!(cur.position(), 11);
    }

    #[test]
    fn missing_components_are_truncated() {
        let data = [0, 17, 8, 0, 8, 0, 8, 3, 1, 0x11, 0];
        let mut cur = Cursor::new(&data);
        assert!(matches!(
            decode_sof(&mut cur),
            Err(JpegError::TruncatedStream { .. })
        ));
    }
}
