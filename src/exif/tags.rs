// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Tag-name dictionaries for the primary/Exif IFDs and the GPS IFD.
//!
//! Dictionaries are keyed by the tag id as four lowercase hex digits
//! (`"8769"`, `"a002"`). The decoder only reads them, so one set can be
//! shared across threads.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Read-only mapping from hex tag id to tag name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDictionary {
    names: HashMap<String, String>,
}

impl TagDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.names.insert(id.into(), name.into());
    }

    /// Look up a tag name by its hex id.
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Self::new();
        for (id, name) in iter {
            dict.insert(id, name);
        }
        dict
    }
}

/// The two dictionary namespaces used by the EXIF decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDictionaries {
    /// Names for IFD0 and the Exif sub-IFD.
    pub ifd: TagDictionary,
    /// Names for the GPS sub-IFD.
    pub gps: TagDictionary,
}

impl TagDictionaries {
    pub fn new(ifd: TagDictionary, gps: TagDictionary) -> Self {
        Self { ifd, gps }
    }

    /// The built-in dictionaries, created on first use.
    pub fn standard() -> &'static TagDictionaries {
        static STANDARD: OnceLock<TagDictionaries> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            ifd: IFD_TAGS.iter().copied().collect(),
            gps: GPS_TAGS.iter().copied().collect(),
        })
    }
}

/// Tag name of the pointer to the Exif sub-IFD.
pub const EXIF_IFD_POINTER: &str = "exifIFDPointer";
/// Tag name of the pointer to the GPS sub-IFD.
pub const GPS_INFO_IFD_POINTER: &str = "gpsInfoIFDPointer";

/// TIFF/Exif tags for IFD0 and the Exif sub-IFD.
pub const IFD_TAGS: &[(&str, &str)] = &[
    ("0100", "imageWidth"),
    ("0101", "imageHeight"),
    ("0102", "bitsPerSample"),
    ("0103", "compression"),
    ("0106", "photometricInterpretation"),
    ("010e", "imageDescription"),
    ("010f", "make"),
    ("0110", "model"),
    ("0111", "stripOffsets"),
    ("0112", "orientation"),
    ("0115", "samplesPerPixel"),
    ("0116", "rowsPerStrip"),
    ("0117", "stripByteCounts"),
    ("011a", "xResolution"),
    ("011b", "yResolution"),
    ("011c", "planarConfiguration"),
    ("0128", "resolutionUnit"),
    ("012d", "transferFunction"),
    ("0131", "software"),
    ("0132", "dateTime"),
    ("013b", "artist"),
    ("013e", "whitePoint"),
    ("013f", "primaryChromaticities"),
    ("0201", "jpegInterchangeFormat"),
    ("0202", "jpegInterchangeFormatLength"),
    ("0211", "ycbCrCoefficients"),
    ("0212", "ycbCrSubSampling"),
    ("0213", "ycbCrPositioning"),
    ("0214", "referenceBlackWhite"),
    ("8298", "copyright"),
    ("829a", "exposureTime"),
    ("829d", "fNumber"),
    ("8769", EXIF_IFD_POINTER),
    ("8822", "exposureProgram"),
    ("8824", "spectralSensitivity"),
    ("8825", GPS_INFO_IFD_POINTER),
    ("8827", "photographicSensitivity"),
    ("8828", "oecf"),
    ("8830", "sensitivityType"),
    ("8831", "standardOutputSensitivity"),
    ("8832", "recommendedExposureIndex"),
    ("8833", "isoSpeed"),
    ("8834", "isoSpeedLatitudeyyy"),
    ("8835", "isoSpeedLatitudezzz"),
    ("9000", "exifVersion"),
    ("9003", "dateTimeOriginal"),
    ("9004", "dateTimeDigitized"),
    ("9101", "componentsConfiguration"),
    ("9102", "compressedBitsPerPixel"),
    ("9201", "shutterSpeedValue"),
    ("9202", "apertureValue"),
    ("9203", "brightnessValue"),
    ("9204", "exposureBiasValue"),
    ("9205", "maxApertureValue"),
    ("9206", "subjectDistance"),
    ("9207", "meteringMode"),
    ("9208", "lightSource"),
    ("9209", "flash"),
    ("920a", "focalLength"),
    ("9214", "subjectArea"),
    ("927c", "makerNote"),
    ("9286", "userComment"),
    ("9290", "subSecTime"),
    ("9291", "subSecTimeOriginal"),
    ("9292", "subSecTimeDigitized"),
    ("a000", "flashpixVersion"),
    ("a001", "colorSpace"),
    ("a002", "pixelXDimension"),
    ("a003", "pixelYDimension"),
    ("a004", "relatedSoundFile"),
    ("a005", "interoperabilityIFDPointer"),
    ("a20b", "flashEnergy"),
    ("a20c", "spatialFrequencyResponse"),
    ("a20e", "focalPlaneXResolution"),
    ("a20f", "focalPlaneYResolution"),
    ("a210", "focalPlaneResolutionUnit"),
    ("a214", "subjectLocation"),
    ("a215", "exposureIndex"),
    ("a217", "sensingMethod"),
    ("a300", "fileSource"),
    ("a301", "sceneType"),
    ("a302", "cfaPattern"),
    ("a401", "customRendered"),
    ("a402", "exposureMode"),
    ("a403", "whiteBalance"),
    ("a404", "digitalZoomRatio"),
    ("a405", "focalLengthIn35mmFilm"),
    ("a406", "sceneCaptureType"),
    ("a407", "gainControl"),
    ("a408", "contrast"),
    ("a409", "saturation"),
    ("a40a", "sharpness"),
    ("a40b", "deviceSettingDescription"),
    ("a40c", "subjectDistanceRange"),
    ("a420", "imageUniqueID"),
    ("a430", "cameraOwnerName"),
    ("a431", "bodySerialNumber"),
    ("a432", "lensSpecification"),
    ("a433", "lensMake"),
    ("a434", "lensModel"),
    ("a435", "lensSerialNumber"),
    ("a500", "gamma"),
];

/// GPS sub-IFD tags.
pub const GPS_TAGS: &[(&str, &str)] = &[
    ("0000", "gpsVersionID"),
    ("0001", "gpsLatitudeRef"),
    ("0002", "gpsLatitude"),
    ("0003", "gpsLongitudeRef"),
    ("0004", "gpsLongitude"),
    ("0005", "gpsAltitudeRef"),
    ("0006", "gpsAltitude"),
    ("0007", "gpsTimeStamp"),
    ("0008", "gpsSatellites"),
    ("0009", "gpsStatus"),
    ("000a", "gpsMeasureMode"),
    ("000b", "gpsDOP"),
    ("000c", "gpsSpeedRef"),
    ("000d", "gpsSpeed"),
    ("000e", "gpsTrackRef"),
    ("000f", "gpsTrack"),
    ("0010", "gpsImgDirectionRef"),
    ("0011", "gpsImgDirection"),
    ("0012", "gpsMapDatum"),
    ("0013", "gpsDestLatitudeRef"),
    ("0014", "gpsDestLatitude"),
    ("0015", "gpsDestLongitudeRef"),
    ("0016", "gpsDestLongitude"),
    ("0017", "gpsDestBearingRef"),
    ("0018", "gpsDestBearing"),
    ("0019", "gpsDestDistanceRef"),
    ("001a", "gpsDestDistance"),
    ("001b", "gpsProcessingMethod"),
    ("001c", "gpsAreaInformation"),
    ("001d", "gpsDateStamp"),
    ("001e", "gpsDifferential"),
    ("001f", "gpsHPositioningError"),
];
