// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # jpeg-markers
//!
//! Structural decoder for JPEG byte streams. Splits a file into its marker
//! segments and decodes each one into a typed record:
//!
//! - **Frame and scan headers** (SOFn, SOS), with the byte range of each
//!   scan's entropy-coded data
//! - **Tables**: Huffman tables with canonical codes (DHT), quantization
//!   tables (DQT), arithmetic conditioning (DAC), restart interval (DRI)
//! - **Metadata**: JFIF (APP0) and EXIF (APP1) including the Exif and GPS
//!   sub-IFDs, with tag names from injectable dictionaries
//!
//! Unknown markers keep their raw bodies. Nothing is validated and no pixel
//! data is decoded; a stream that ends mid-segment yields the markers read
//! up to that point.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use jpeg_markers::{decode, Segment};
//!
//! let data = std::fs::read("photo.jpg").unwrap();
//! for marker in decode(&data) {
//!     if let Segment::Exif(exif) = &marker.segment {
//!         println!("{:?}", exif.entries.get("model"));
//!     }
//! }
//! ```

pub mod exif;
pub mod jpeg;

pub use exif::{ExifEntries, ExifSegment, ExifValue, TagDictionaries, TagDictionary};
pub use jpeg::error::{JpegError, Result as JpegResult};
pub use jpeg::{decode, decode_strict, DecodeOptions, Decoder, Marker, MarkerStream, Segment};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Decode several independent buffers with default options.
///
/// With the `parallel` feature the buffers are decoded on the rayon thread
/// pool. Results are in input order either way.
pub fn decode_all(buffers: &[&[u8]]) -> Vec<Vec<Marker>> {
    #[cfg(feature = "parallel")]
    let markers = buffers.par_iter().map(|data| decode(data)).collect();
    #[cfg(not(feature = "parallel"))]
    let markers = buffers.iter().map(|data| decode(data)).collect();
    markers
}
