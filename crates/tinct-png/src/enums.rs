/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

use tinct_core::colorspace::ColorSpace;
use tinct_core::options::RowFilter;

/// Chunk types the decoder understands, see
/// table 5.3 of https://www.w3.org/TR/2003/REC-PNG-20031110/
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    gAMA,
    unkn
}

impl PngChunkType {
    pub(crate) fn from_bytes(chunk: &[u8; 4]) -> PngChunkType {
        match chunk {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            b"gAMA" => PngChunkType::gAMA,
            _ => PngChunkType::unkn
        }
    }
}

/// Scanline filter types
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FilterMethod {
    #[default]
    None,
    Sub,
    Up,
    Average,
    Paeth,
    // First scanline, special
    PaethFirst,
    AvgFirst
}

impl FilterMethod {
    pub fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average | FilterMethod::AvgFirst => 3,
            FilterMethod::Paeth | FilterMethod::PaethFirst => 4
        }
    }

    /// The variant used for the first scanline, where
    /// the row above is all zeroes
    pub(crate) const fn first_row_variant(self) -> FilterMethod {
        match self {
            // up for the first row becomes a memcpy
            FilterMethod::Up => FilterMethod::None,
            FilterMethod::Average => FilterMethod::AvgFirst,
            FilterMethod::Paeth => FilterMethod::PaethFirst,
            other => other
        }
    }

    /// The fixed filter for an encoder strategy, `None` for adaptive
    pub(crate) const fn from_row_filter(filter: RowFilter) -> Option<FilterMethod> {
        match filter {
            RowFilter::None => Some(FilterMethod::None),
            RowFilter::Sub => Some(FilterMethod::Sub),
            RowFilter::Up => Some(FilterMethod::Up),
            RowFilter::Average => Some(FilterMethod::Average),
            RowFilter::Paeth => Some(FilterMethod::Paeth),
            RowFilter::Adaptive => None
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum InterlaceMethod {
    #[default]
    Standard,
    Adam7
}

impl InterlaceMethod {
    pub fn from_int(int: u8) -> Option<InterlaceMethod> {
        match int {
            0 => Some(Self::Standard),
            1 => Some(Self::Adam7),
            _ => None
        }
    }
}

/// Colour types as stored in IHDR
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PngColor {
    #[default]
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA
}

impl PngColor {
    pub(crate) const fn num_components(self) -> usize {
        match self {
            PngColor::Luma | PngColor::Palette => 1,
            PngColor::LumaA => 2,
            PngColor::RGB => 3,
            PngColor::RGBA => 4
        }
    }

    pub(crate) fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }

    pub(crate) const fn to_int(self) -> u8 {
        match self {
            PngColor::Luma => 0,
            PngColor::RGB => 2,
            PngColor::Palette => 3,
            PngColor::LumaA => 4,
            PngColor::RGBA => 6
        }
    }

    /// Layout of the decoded samples, palette images expand to RGB
    pub(crate) const fn output_colorspace(self) -> ColorSpace {
        match self {
            PngColor::Luma => ColorSpace::Luma,
            PngColor::LumaA => ColorSpace::LumaA,
            PngColor::RGB | PngColor::Palette => ColorSpace::RGB,
            PngColor::RGBA => ColorSpace::RGBA
        }
    }

    pub(crate) const fn from_colorspace(colorspace: ColorSpace) -> PngColor {
        match colorspace {
            ColorSpace::Luma => PngColor::Luma,
            ColorSpace::LumaA => PngColor::LumaA,
            ColorSpace::RGB => PngColor::RGB,
            ColorSpace::RGBA => PngColor::RGBA
        }
    }
}
