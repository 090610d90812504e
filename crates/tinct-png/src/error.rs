/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during png operations
use std::fmt::{Debug, Display, Formatter};

use zune_inflate::errors::InflateDecodeErrors;

/// Errors possible during decoding
pub enum PngDecodeErrors {
    /// Image signature is not a valid png signature
    BadSignature,
    /// Stored crc, calculated crc
    BadCrc(u32, u32),
    /// Pixel data or a chunk ended early, or
    /// decoded data is inconsistent
    CorruptData(String),
    /// A valid png feature this decoder does not implement
    Unsupported(String),
    /// Malformed headers
    Generic(String),
    GenericStatic(&'static str),
    /// Kind, maximum, found
    TooLargeDimensions(&'static str, usize, usize),
    /// Palette image without a PLTE chunk
    EmptyPalette,
    /// Problems with the zlib stream
    ZlibDecodeErrors(InflateDecodeErrors)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::BadCrc(expected, found) => writeln!(
                f,
                "CRC does not match, expected {expected:08X} but found {found:08X}"
            ),
            Self::CorruptData(val) => writeln!(f, "Corrupt data: {val}"),
            Self::Unsupported(val) => writeln!(f, "Unsupported: {val}"),
            Self::Generic(val) => writeln!(f, "{val}"),
            Self::GenericStatic(val) => writeln!(f, "{val}"),
            Self::TooLargeDimensions(kind, max, found) => writeln!(
                f,
                "Too large {kind}, expected a value less than {max} but found {found}"
            ),
            Self::EmptyPalette => writeln!(f, "Empty palette but image is indexed"),
            Self::ZlibDecodeErrors(err) => writeln!(f, "Error decoding idat chunks {err:?}")
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PngDecodeErrors {}

impl From<InflateDecodeErrors> for PngDecodeErrors {
    fn from(err: InflateDecodeErrors) -> Self {
        PngDecodeErrors::ZlibDecodeErrors(err)
    }
}

/// Errors possible during encoding
pub enum PngEncodeErrors {
    /// Invalid dimensions or data size
    Static(&'static str),
    /// Data length, expected length
    WrongDataSize(usize, usize),
    IoErrors(std::io::Error)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(err) => writeln!(f, "{err}"),
            Self::WrongDataSize(found, expected) => writeln!(
                f,
                "Data length {found} does not match expected length {expected}"
            ),
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PngEncodeErrors {}

impl From<std::io::Error> for PngEncodeErrors {
    fn from(err: std::io::Error) -> Self {
        PngEncodeErrors::IoErrors(err)
    }
}
