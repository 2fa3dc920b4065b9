// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for EXIF/TIFF decoding.
//!
//! None of these abort a decode. [`ExifError`] values are produced by the
//! IFD helpers and turned into a fallback (hex rendering, an empty or
//! partial entry map, a skipped entry) by the caller, which logs them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExifError {
    /// An IFD entry uses a data format code outside the known table.
    #[error("unrecognized EXIF data format {0}")]
    UnrecognizedFormat(u16),
    /// A sub-IFD pointer leads outside the TIFF data.
    #[error("{name} points to offset {offset}, outside {available} bytes of TIFF data")]
    MissingSubIfd {
        name: &'static str,
        offset: usize,
        available: usize,
    },
    /// An entry's out-of-line value lies outside the TIFF data.
    #[error("value of tag {tag} ({len} bytes at offset {offset}) is out of range")]
    ValueOutOfRange {
        tag: String,
        offset: usize,
        len: usize,
    },
    /// The IFD entry table stops before its declared entry count.
    #[error("IFD at offset {offset} ends after {read} of {declared} entries")]
    TruncatedIfd {
        offset: usize,
        read: usize,
        declared: usize,
    },
}

pub type Result<T> = std::result::Result<T, ExifError>;
