/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Raw sample layouts used by the codecs

/// Layout of interleaved raw samples
///
/// This describes bytes on the wire, the interpretation of decoded
/// colours is given by a [`Converter`](crate::converters::Converter).
#[allow(clippy::upper_case_acronyms)]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ColorSpace {
    /// Red, Green , Blue
    #[default]
    RGB,
    /// Red, Green, Blue, Alpha
    RGBA,
    /// Grayscale colorspace
    Luma,
    /// Grayscale with alpha colorspace
    LumaA
}

impl ColorSpace {
    /// Number of samples per pixel
    pub const fn num_components(&self) -> usize {
        match self {
            Self::RGB => 3,
            Self::RGBA => 4,
            Self::Luma => 1,
            Self::LumaA => 2
        }
    }

    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::RGBA | Self::LumaA)
    }

    pub const fn is_grayscale(&self) -> bool {
        matches!(self, Self::LumaA | Self::Luma)
    }
}
