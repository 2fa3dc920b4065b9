// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JPEG marker dispatch.
//!
//! Reads one 2-byte marker code at the cursor, hands the segment to the
//! decoder for its kind and wraps the result in a [`Marker`] carrying the
//! byte range it covers. Codes without a dedicated decoder keep their body
//! verbatim as [`Segment::Unknown`].

use std::ops::Range;

use tracing::debug;

use super::app::{decode_jfif, JfifHeader};
use super::error::Result;
use super::frame::{decode_sof, FrameHeader};
use super::huffman::{decode_dht, HuffmanTable};
use super::reader::Cursor;
use super::scan::{decode_sos, ScanHeader};
use super::tables::{decode_dac, decode_dqt, ConditioningEntry, QuantizationTable};
use crate::exif::{decode_exif, ExifSegment, TagDictionaries};

/// JPEG marker codes, including the 0xFF prefix.
pub const SOF0: u16 = 0xFFC0;
pub const SOF2: u16 = 0xFFC2;
pub const SOF15: u16 = 0xFFCF;
pub const DHT: u16 = 0xFFC4;
pub const DAC: u16 = 0xFFCC;
/// Reserved for JPEG extensions; inside the SOF range but not a frame.
pub const JPG: u16 = 0xFFC8;
pub const RST0: u16 = 0xFFD0;
pub const RST7: u16 = 0xFFD7;
pub const SOI: u16 = 0xFFD8;
pub const EOI: u16 = 0xFFD9;
pub const SOS: u16 = 0xFFDA;
pub const DQT: u16 = 0xFFDB;
pub const DRI: u16 = 0xFFDD;
pub const APP0: u16 = 0xFFE0;
pub const APP1: u16 = 0xFFE1;
pub const COM: u16 = 0xFFFE;

/// Decoded body of a marker segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    StartOfImage,
    /// End of image. `trailer` is the range of any bytes that followed it;
    /// they are skipped, not decoded.
    EndOfImage { trailer: Range<usize> },
    /// Any SOFn other than DHT, JPG and DAC.
    Frame(FrameHeader),
    HuffmanTables(Vec<HuffmanTable>),
    ArithmeticConditioning(Vec<ConditioningEntry>),
    /// Scan header together with the span of its entropy-coded data.
    Scan(ScanHeader),
    QuantizationTables(Vec<QuantizationTable>),
    RestartInterval(u16),
    Jfif(JfifHeader),
    Exif(ExifSegment),
    /// Segment body (after the length field) of a marker without a decoder.
    Unknown(Vec<u8>),
}

/// One marker record in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Marker code including the 0xFF prefix, e.g. `0xFFDB`.
    pub code: u16,
    /// Bytes consumed for this marker: code, length field, body and, for
    /// SOS, the entropy-coded data. Excludes an EOI trailer.
    pub span: Range<usize>,
    pub segment: Segment,
}

impl Marker {
    /// Short name of the marker kind, `None` for unknown segments.
    pub fn name(&self) -> Option<&'static str> {
        Some(match self.segment {
            Segment::StartOfImage => "SOI",
            Segment::EndOfImage { .. } => "EOI",
            Segment::Frame(_) => "SOF",
            Segment::HuffmanTables(_) => "DHT",
            Segment::ArithmeticConditioning(_) => "DAC",
            Segment::Scan(_) => "SOS",
            Segment::QuantizationTables(_) => "DQT",
            Segment::RestartInterval(_) => "DRI",
            Segment::Jfif(_) => "JFIF",
            Segment::Exif(_) => "EXIF",
            Segment::Unknown(_) => return None,
        })
    }

    /// True for the SOF markers of progressive DCT frames (SOF2, SOF6,
    /// SOF10, SOF14).
    pub fn is_progressive(&self) -> bool {
        matches!(self.segment, Segment::Frame(_)) && (self.code & 0x03) == 0x02
    }
}

/// Read the marker at the cursor.
///
/// APP1 segments are decoded as EXIF using `exif_tags`; with `None` their
/// body is kept raw like any other unknown segment.
pub fn read_marker(cur: &mut Cursor<'_>, exif_tags: Option<&TagDictionaries>) -> Result<Marker> {
    let start = cur.position();
    let code = cur.read_u16()?;

    let mut end = None;
    let segment = match code {
        SOI => Segment::StartOfImage,
        EOI => {
            let trailer = cur.position()..cur.data().len();
            end = Some(trailer.start);
            if !trailer.is_empty() {
                debug!(offset = trailer.start, len = trailer.len(), "skipping bytes after EOI");
            }
            cur.skip_to_end();
            Segment::EndOfImage { trailer }
        }
        DHT => Segment::HuffmanTables(decode_dht(cur)?),
        DAC => Segment::ArithmeticConditioning(decode_dac(cur)?),
        JPG => Segment::Unknown(read_raw(cur)?),
        SOF0..=SOF15 => Segment::Frame(decode_sof(cur)?),
        SOS => Segment::Scan(decode_sos(cur)?),
        DQT => Segment::QuantizationTables(decode_dqt(cur)?),
        DRI => Segment::RestartInterval(decode_dri(cur)?),
        APP0 => Segment::Jfif(decode_jfif(cur)?),
        APP1 => match exif_tags {
            Some(tags) => Segment::Exif(decode_exif(cur, tags)?),
            None => Segment::Unknown(read_raw(cur)?),
        },
        _ => Segment::Unknown(read_raw(cur)?),
    };

    let span = start..end.unwrap_or_else(|| cur.position());
    debug!(code = format_args!("{code:#06X}"), offset = start, len = span.len(), "marker");
    Ok(Marker { code, span, segment })
}

/// Decode a DRI body: the length field and the restart interval.
pub fn decode_dri(cur: &mut Cursor<'_>) -> Result<u16> {
    let _length = cur.read_u16()?;
    cur.read_u16()
}

/// Keep the `length - 2` body bytes of a segment verbatim.
fn read_raw(cur: &mut Cursor<'_>) -> Result<Vec<u8>> {
    let length = cur.read_u16()? as usize;
    Ok(cur.take(length.saturating_sub(2))?.to_vec())
}
