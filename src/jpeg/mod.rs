// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! JPEG marker-stream decoder.
//!
//! Walks a JPEG byte stream from the first byte to the last, turning every
//! marker segment into a [`Marker`] record. Nothing is validated: lengths
//! and counts are trusted as stored, and the only failure is running off the
//! end of the buffer. The decoded records keep:
//!
//! - Frame headers (all SOFn), scan headers with the offsets of their
//!   entropy-coded data
//! - Huffman tables with their canonical codes, quantization tables,
//!   arithmetic conditioning entries and the restart interval
//! - JFIF headers and EXIF metadata (APP0/APP1)
//! - Raw bodies of every other marker
//!
//! Pixel data is never decoded.

pub mod error;
pub mod reader;
pub mod tables;
pub mod huffman;
pub mod frame;
pub mod marker;
pub mod scan;
pub mod app;

use tracing::warn;

use crate::exif::TagDictionaries;
use error::Result;
use reader::Cursor;

pub use marker::{read_marker, Marker, Segment};

/// Runtime options for [`Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Decode APP1 segments as EXIF. When false they are kept as raw
    /// [`Segment::Unknown`] bodies.
    pub decode_exif: bool,
    /// On truncation, return the markers decoded so far instead of an error.
    pub recover_truncated: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            decode_exif: true,
            recover_truncated: true,
        }
    }
}

impl DecodeOptions {
    /// Options that report truncation as an error.
    pub fn strict() -> Self {
        Self {
            recover_truncated: false,
            ..Self::default()
        }
    }
}

/// Marker decoder bound to a set of EXIF tag dictionaries.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'t> {
    options: DecodeOptions,
    tags: &'t TagDictionaries,
}

impl Default for Decoder<'static> {
    fn default() -> Self {
        Self::new(TagDictionaries::standard())
    }
}

impl<'t> Decoder<'t> {
    pub fn new(tags: &'t TagDictionaries) -> Self {
        Self {
            options: DecodeOptions::default(),
            tags,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    pub fn tags(&self) -> &'t TagDictionaries {
        self.tags
    }

    /// Iterate over the markers of `data` one at a time.
    pub fn stream<'a>(&self, data: &'a [u8]) -> MarkerStream<'a, 't> {
        let exif_tags = self.options.decode_exif.then_some(self.tags);
        MarkerStream::new(data, exif_tags)
    }

    /// Decode every marker in `data`.
    ///
    /// With `recover_truncated` set this never fails; a truncated stream
    /// yields the markers read before the truncation.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<Marker>> {
        let mut markers = Vec::new();
        for marker in self.stream(data) {
            match marker {
                Ok(marker) => markers.push(marker),
                Err(err) if self.options.recover_truncated => {
                    warn!(decoded = markers.len(), "{err}, keeping markers read so far");
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(markers)
    }
}

/// Iterator over the markers of a byte stream.
///
/// Yields one `Result` per marker and stops after the first error or when
/// the input is exhausted.
#[derive(Debug, Clone)]
pub struct MarkerStream<'a, 't> {
    cur: Cursor<'a>,
    exif_tags: Option<&'t TagDictionaries>,
    failed: bool,
}

impl<'a, 't> MarkerStream<'a, 't> {
    /// APP1 segments are decoded as EXIF only when `exif_tags` is given.
    pub fn new(data: &'a [u8], exif_tags: Option<&'t TagDictionaries>) -> Self {
        Self {
            cur: Cursor::new(data),
            exif_tags,
            failed: false,
        }
    }

    /// Offset of the next marker.
    pub fn position(&self) -> usize {
        self.cur.position()
    }
}

impl Iterator for MarkerStream<'_, '_> {
    type Item = Result<Marker>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cur.is_at_end() {
            return None;
        }
        let marker = read_marker(&mut self.cur, self.exif_tags);
        self.failed = marker.is_err();
        Some(marker)
    }
}

impl std::iter::FusedIterator for MarkerStream<'_, '_> {}

/// Decode all markers with default options, recovering from truncation.
pub fn decode(data: &[u8]) -> Vec<Marker> {
    // Default options recover from truncation, so this never sees an error.
    Decoder::default().decode(data).unwrap_or_default()
}

/// Decode all markers, failing on a truncated stream.
pub fn decode_strict(data: &[u8]) -> Result<Vec<Marker>> {
    Decoder::default()
        .with_options(DecodeOptions::strict())
        .decode(data)
}
