/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image decoding, processing and encoding
use std::fmt::{Debug, Display, Formatter};

use tinct_core::errors::ColorErrors;
use tinct_png::error::{PngDecodeErrors, PngEncodeErrors};
use tinct_ppm::{PnmDecodeErrors, PnmEncodeErrors};

/// The broad category of an error
///
/// Callers that only need to know what went wrong, not where,
/// can match on this instead of the full error.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Malformed magic bytes, headers or tokens
    Format,
    /// Checksum mismatches and truncated data
    CorruptData,
    /// Valid input using something this library does not implement
    UnsupportedFeature,
    /// A component or coordinate out of bounds
    Range,
    /// A colour the working space cannot represent
    UnsupportedValue,
    /// Failures of the underlying reader or writer
    Io
}

/// All possible image errors that can occur.
///
/// This is the grandfather of image errors and contains
/// all decoding, processing and encoding errors possible
pub enum ImageErrors {
    PngDecodeErrors(PngDecodeErrors),
    PngEncodeErrors(PngEncodeErrors),
    PnmDecodeErrors(PnmDecodeErrors),
    PnmEncodeErrors(PnmEncodeErrors),
    ColorErrors(ColorErrors),
    /// x, y, width and height
    PixelOutOfBounds(usize, usize, usize, usize),
    /// A channel index greater than two
    ChannelOutOfBounds(usize),
    ZeroDimensions(usize, usize),
    /// Expected and found number of pixels
    DimensionsMisMatch(usize, usize),
    /// The stream is neither a PNM nor a PNG file
    UnknownFormat,
    /// An operation got a parameter it cannot work with
    InvalidParameter(&'static str, String),
    IoErrors(std::io::Error)
}

impl ImageErrors {
    /// Return the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PngDecodeErrors(err) => match err {
                PngDecodeErrors::BadCrc(..)
                | PngDecodeErrors::CorruptData(_)
                | PngDecodeErrors::ZlibDecodeErrors(_) => ErrorKind::CorruptData,
                PngDecodeErrors::Unsupported(_) => ErrorKind::UnsupportedFeature,
                _ => ErrorKind::Format
            },
            Self::PnmDecodeErrors(err) => match err {
                PnmDecodeErrors::Truncated(_) => ErrorKind::CorruptData,
                PnmDecodeErrors::UnsupportedVersion(_) => ErrorKind::UnsupportedFeature,
                _ => ErrorKind::Format
            },
            Self::PngEncodeErrors(PngEncodeErrors::IoErrors(_))
            | Self::PnmEncodeErrors(PnmEncodeErrors::IoErrors(_))
            | Self::IoErrors(_) => ErrorKind::Io,
            Self::PngEncodeErrors(_) | Self::PnmEncodeErrors(_) => ErrorKind::Range,
            Self::ColorErrors(err) => match err {
                ColorErrors::OutOfRange(_) => ErrorKind::Range,
                ColorErrors::UnsupportedValue(..) => ErrorKind::UnsupportedValue,
                ColorErrors::Malformed(_) => ErrorKind::Format
            },
            Self::PixelOutOfBounds(..)
            | Self::ChannelOutOfBounds(_)
            | Self::ZeroDimensions(..)
            | Self::DimensionsMisMatch(..)
            | Self::InvalidParameter(..) => ErrorKind::Range,
            Self::UnknownFormat => ErrorKind::Format
        }
    }
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PngDecodeErrors(ref error) => writeln!(f, "Png decoding failed: {error:?}"),
            Self::PngEncodeErrors(ref error) => writeln!(f, "Png encoding failed: {error:?}"),
            Self::PnmDecodeErrors(ref error) => writeln!(f, "Pnm decoding failed: {error:?}"),
            Self::PnmEncodeErrors(ref error) => writeln!(f, "Pnm encoding failed: {error:?}"),
            Self::ColorErrors(ref error) => writeln!(f, "{error:?}"),
            Self::PixelOutOfBounds(x, y, width, height) => writeln!(
                f,
                "Pixel ({x},{y}) is outside an image of dimensions {width}x{height}"
            ),
            Self::ChannelOutOfBounds(index) => {
                writeln!(f, "Channel {index} does not exist, channels are 0, 1 and 2")
            }
            Self::ZeroDimensions(width, height) => {
                writeln!(f, "Dimensions {width}x{height} contain a zero")
            }
            Self::DimensionsMisMatch(expected, found) => writeln!(
                f,
                "Dimensions mismatch, expected {expected} pixels but found {found}"
            ),
            Self::UnknownFormat => writeln!(f, "Unknown image format"),
            Self::InvalidParameter(operation, reason) => {
                writeln!(f, "Invalid parameter for {operation}: {reason}")
            }
            Self::IoErrors(ref error) => writeln!(f, "{error}")
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}

impl From<PngDecodeErrors> for ImageErrors {
    fn from(from: PngDecodeErrors) -> Self {
        ImageErrors::PngDecodeErrors(from)
    }
}

impl From<PngEncodeErrors> for ImageErrors {
    fn from(from: PngEncodeErrors) -> Self {
        ImageErrors::PngEncodeErrors(from)
    }
}

impl From<PnmDecodeErrors> for ImageErrors {
    fn from(from: PnmDecodeErrors) -> Self {
        ImageErrors::PnmDecodeErrors(from)
    }
}

impl From<PnmEncodeErrors> for ImageErrors {
    fn from(from: PnmEncodeErrors) -> Self {
        ImageErrors::PnmEncodeErrors(from)
    }
}

impl From<ColorErrors> for ImageErrors {
    fn from(from: ColorErrors) -> Self {
        ImageErrors::ColorErrors(from)
    }
}

impl From<std::io::Error> for ImageErrors {
    fn from(from: std::io::Error) -> Self {
        ImageErrors::IoErrors(from)
    }
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;
    use tinct_core::errors::ColorErrors;
    use tinct_core::triple::ColorTriple;
    use tinct_png::error::PngDecodeErrors;
    use tinct_ppm::PnmDecodeErrors;

    use crate::errors::{ErrorKind, ImageErrors};

    #[test]
    fn test_kinds() {
        let cases = [
            (ImageErrors::from(PngDecodeErrors::BadCrc(1, 2)), ErrorKind::CorruptData),
            (ImageErrors::from(PngDecodeErrors::BadSignature), ErrorKind::Format),
            (ImageErrors::from(PngDecodeErrors::EmptyPalette), ErrorKind::Format),
            (
                ImageErrors::from(PngDecodeErrors::Unsupported("adam7".into())),
                ErrorKind::UnsupportedFeature
            ),
            (
                ImageErrors::from(PnmDecodeErrors::UnsupportedVersion(b'7')),
                ErrorKind::UnsupportedFeature
            ),
            (
                ImageErrors::from(PnmDecodeErrors::Truncated(String::new())),
                ErrorKind::CorruptData
            ),
            (ImageErrors::from(ColorErrors::OutOfRange(2.0)), ErrorKind::Range),
            (
                ImageErrors::from(ColorErrors::UnsupportedValue(
                    Converter::BlackAndWhite,
                    ColorTriple::BLACK
                )),
                ErrorKind::UnsupportedValue
            ),
            (ImageErrors::PixelOutOfBounds(5, 0, 2, 2), ErrorKind::Range),
            (ImageErrors::UnknownFormat, ErrorKind::Format)
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind, "{error}");
        }
    }
}
