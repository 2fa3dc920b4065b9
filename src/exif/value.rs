// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! TIFF data formats and decoded EXIF values.

use crate::jpeg::reader::{ascii_string, read_u8, to_hex, trim_trailing_nul, utf8_string, Endian};

use super::error::{ExifError, Result};

/// Unsigned byte.
pub const FORMAT_BYTE: u16 = 1;
/// NUL-terminated 7-bit text.
pub const FORMAT_ASCII: u16 = 2;
pub const FORMAT_SHORT: u16 = 3;
pub const FORMAT_LONG: u16 = 4;
/// Two unsigned longs: numerator, denominator.
pub const FORMAT_RATIONAL: u16 = 5;
pub const FORMAT_SBYTE: u16 = 6;
/// Opaque bytes.
pub const FORMAT_UNDEFINED: u16 = 7;
pub const FORMAT_SSHORT: u16 = 8;
pub const FORMAT_SLONG: u16 = 9;
/// Two signed longs: numerator, denominator.
pub const FORMAT_SRATIONAL: u16 = 10;
pub const FORMAT_FLOAT: u16 = 11;
pub const FORMAT_DOUBLE: u16 = 12;
/// Vendor extension: NUL-terminated UTF-8 text.
pub const FORMAT_UTF8: u16 = 129;

/// Bytes per component for a data format, `None` when the format is unknown.
pub fn component_size(format: u16) -> Option<usize> {
    match format {
        FORMAT_BYTE | FORMAT_ASCII | FORMAT_SBYTE | FORMAT_UNDEFINED | FORMAT_UTF8 => Some(1),
        FORMAT_SHORT | FORMAT_SSHORT => Some(2),
        FORMAT_LONG | FORMAT_SLONG | FORMAT_FLOAT => Some(4),
        FORMAT_RATIONAL | FORMAT_SRATIONAL | FORMAT_DOUBLE => Some(8),
        _ => None,
    }
}

/// Unsigned rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    /// Quotient as a float (infinite or NaN for a zero denominator).
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Signed rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignedRational {
    pub numerator: i32,
    pub denominator: i32,
}

impl SignedRational {
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// A decoded IFD entry value.
///
/// Entries with a component count of one decode to a scalar; any other
/// count of a numeric format decodes to [`ExifValue::List`]. Text and opaque
/// formats always decode to a single value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExifValue {
    Byte(u8),
    Short(u16),
    Long(u32),
    SignedLong(i32),
    Rational(Rational),
    SignedRational(SignedRational),
    /// ASCII or UTF-8 text with trailing NULs removed.
    Text(String),
    /// Opaque bytes rendered as `0x`-prefixed lowercase hex.
    Hex(String),
    List(Vec<ExifValue>),
}

impl ExifValue {
    /// Render raw bytes as an opaque value.
    pub fn hex(raw: &[u8]) -> Self {
        Self::Hex(format!("0x{}", to_hex(raw)))
    }

    /// Integer value of an unsigned scalar, used for IFD pointers.
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Self::Byte(v) => Some(v.into()),
            Self::Short(v) => Some(v.into()),
            Self::Long(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value of a scalar, rationals included.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Byte(v) => Some(v.into()),
            Self::Short(v) => Some(v.into()),
            Self::Long(v) => Some(v.into()),
            Self::SignedLong(v) => Some(v.into()),
            Self::Rational(r) => Some(r.to_f64()),
            Self::SignedRational(r) => Some(r.to_f64()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Hex(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ExifValue]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

/// Decode the raw bytes of an entry.
///
/// `raw` holds exactly `count` components of `format` for known formats.
/// Formats outside the table yield [`ExifError::UnrecognizedFormat`]; the
/// caller renders those as hex.
pub fn decode_value(raw: &[u8], format: u16, count: u32, endian: Endian) -> Result<ExifValue> {
    match format {
        FORMAT_ASCII => Ok(ExifValue::Text(ascii_string(trim_trailing_nul(raw)))),
        FORMAT_UTF8 => Ok(ExifValue::Text(utf8_string(trim_trailing_nul(raw)))),
        FORMAT_UNDEFINED => Ok(ExifValue::hex(raw)),
        FORMAT_BYTE | FORMAT_SHORT | FORMAT_LONG | FORMAT_RATIONAL | FORMAT_SLONG
        | FORMAT_SRATIONAL => {
            let size = component_size(format).ok_or(ExifError::UnrecognizedFormat(format))?;
            let mut values = (0..count as usize)
                .map(|i| decode_component(raw, format, i * size, endian))
                .collect::<Option<Vec<_>>>()
                .unwrap_or_default();
            if count == 1 && values.len() == 1 {
                Ok(values.remove(0))
            } else {
                Ok(ExifValue::List(values))
            }
        }
        _ => Err(ExifError::UnrecognizedFormat(format)),
    }
}

fn decode_component(raw: &[u8], format: u16, pos: usize, endian: Endian) -> Option<ExifValue> {
    Some(match format {
        FORMAT_BYTE => ExifValue::Byte(read_u8(raw, pos)?),
        FORMAT_SHORT => ExifValue::Short(endian.read_u16(raw, pos)?),
        FORMAT_LONG => ExifValue::Long(endian.read_u32(raw, pos)?),
        FORMAT_RATIONAL => ExifValue::Rational(Rational {
            numerator: endian.read_u32(raw, pos)?,
            denominator: endian.read_u32(raw, pos + 4)?,
        }),
        FORMAT_SLONG => ExifValue::SignedLong(endian.read_i32(raw, pos)?),
        FORMAT_SRATIONAL => ExifValue::SignedRational(SignedRational {
            numerator: endian.read_i32(raw, pos)?,
            denominator: endian.read_i32(raw, pos + 4)?,
        }),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn component_sizes() {
        assert_eq!(component_size(FORMAT_BYTE), Some(1));
        assert_eq!(component_size(FORMAT_SSHORT), Some(2));
        assert_eq!(component_size(FORMAT_FLOAT), Some(4));
        assert_eq!(component_size(FORMAT_SRATIONAL), Some(8));
        assert_eq!(component_size(0), None);
        assert_eq!(component_size(13), None);
    }

    #[test]
    fn scalar_vs_list() {
        let raw = [0x00, 0x03, 0x00, 0x04];
        assert_eq!(
            decode_value(&raw[..2], FORMAT_SHORT, 1, Endian::Big),
            Ok(ExifValue::Short(3))
        );
        assert_eq!(
            decode_value(&raw, FORMAT_SHORT, 2, Endian::Big),
            Ok(ExifValue::List(vec![ExifValue::Short(3), ExifValue::Short(4)]))
        );
        assert_eq!(
            decode_value(&[], FORMAT_LONG, 0, Endian::Big),
            Ok(ExifValue::List(vec![]))
        );
    }

    #[test]
    fn rationals() {
        let raw = [0, 0, 0, 1, 0, 0, 0, 100];
        let v = decode_value(&raw, FORMAT_RATIONAL, 1, Endian::Big).unwrap();
        assert_eq!(v, ExifValue::Rational(Rational { numerator: 1, denominator: 100 }));
        assert_eq!(v.as_f64(), Some(0.01));

        let raw = [0xFF, 0xFF, 0xFF, 0xFF, 0x02, 0x00, 0x00, 0x00];
        let v = decode_value(&raw, FORMAT_SRATIONAL, 1, Endian::Little).unwrap();
        assert_eq!(v.as_f64(), Some(-1.0 / 2.0));
    }

    #[test]
    fn text_formats_strip_nul() {
        assert_eq!(
            decode_value(b"Canon\0\0", FORMAT_ASCII, 7, Endian::Big),
            Ok(ExifValue::Text("Canon".into()))
        );
        assert_eq!(
            decode_value("żółw\0".as_bytes(), FORMAT_UTF8, 8, Endian::Little),
            Ok(ExifValue::Text("żółw".into()))
        );
    }

    #[test]
    fn opaque_and_unknown_formats() {
        assert_eq!(
            decode_value(b"0231", FORMAT_UNDEFINED, 4, Endian::Big),
            Ok(ExifValue::Hex("0x30323331".into()))
        );
        assert_eq!(
            decode_value(&[1, 2], FORMAT_SSHORT, 1, Endian::Big),
            Err(ExifError::UnrecognizedFormat(FORMAT_SSHORT))
        );
        assert_eq!(
            decode_value(&[1, 2, 3, 4], 42, 1, Endian::Big),
            Err(ExifError::UnrecognizedFormat(42))
        );
    }

    #[test]
    fn signed_long() {
        let v = decode_value(&[0xFF, 0xFF, 0xFF, 0xFE], FORMAT_SLONG, 1, Endian::Big).unwrap();
        assert_eq!(v, ExifValue::SignedLong(-2));
        assert_eq!(v.as_u32(), None);
    }
}
