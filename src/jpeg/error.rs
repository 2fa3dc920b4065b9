// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for JPEG marker decoding.

use thiserror::Error;

/// Errors that can occur while walking the marker stream.
///
/// The decoder trusts lengths and offsets as given, so the only hard failure
/// is running off the end of the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JpegError {
    /// A fixed-size field or a declared segment length reaches past the end
    /// of the input.
    #[error("truncated stream: {needed} bytes needed at offset {offset}, {available} available")]
    TruncatedStream {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, JpegError>;
