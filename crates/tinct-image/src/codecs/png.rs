/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! PNG glue
use std::io::Write;

use tinct_core::colorspace::ColorSpace;
use tinct_core::converters::Converter;
use tinct_core::gamma::Gamma;
use tinct_core::options::{DecoderOptions, EncoderOptions};
use tinct_core::triple::ColorTriple;
use tinct_png::{PngDecoder, PngEncoder};

use crate::bitmap::PortableBitmap;
use crate::codecs::SampleLayout;
use crate::errors::ImageErrors;

/// Decode a PNG into a device RGB image, alpha is dropped
pub(crate) fn decode_png(bytes: &[u8], options: DecoderOptions) -> Result<PortableBitmap, ImageErrors> {
    let mut decoder = PngDecoder::new_with_options(bytes, options);
    let data = decoder.decode_raw()?;

    let (width, height) = decoder
        .get_dimensions()
        .ok_or(ImageErrors::UnknownFormat)?;
    let colorspace = decoder.get_colorspace().ok_or(ImageErrors::UnknownFormat)?;

    let pixels = data
        .chunks_exact(colorspace.num_components())
        .map(|px| match colorspace {
            ColorSpace::Luma | ColorSpace::LumaA => ColorTriple::from_bytes([px[0]; 3]),
            ColorSpace::RGB | ColorSpace::RGBA => ColorTriple::from_bytes([px[0], px[1], px[2]])
        })
        .collect();

    let mut image = PortableBitmap::from_pixels(width, height, pixels, Converter::Rgb)?;
    image.set_gamma(decoder.get_gamma());

    Ok(image)
}

impl PortableBitmap {
    /// Write the image as an 8 bit PNG with the given gamma tag
    ///
    /// Images that would be written as greyscale portable maps are
    /// written as greyscale PNGs, everything else as RGB.
    pub fn save_png<W: Write>(&self, writer: W, gamma: Gamma) -> Result<(), ImageErrors> {
        self.save_png_with_options(writer, gamma, EncoderOptions::default())
    }

    /// Write the image as a PNG, taking the row filter and compression
    /// effort from `options`
    ///
    /// Dimensions and colorspace of `options` are replaced by the image's.
    pub fn save_png_with_options<W: Write>(
        &self, writer: W, gamma: Gamma, options: EncoderOptions
    ) -> Result<(), ImageErrors> {
        let layout = self.sample_layout();

        let colorspace = match layout {
            SampleLayout::BiLevel | SampleLayout::Grey(_) => ColorSpace::Luma,
            SampleLayout::Rgb => ColorSpace::RGB
        };
        let (width, height) = self.dimensions();

        let options = options
            .set_width(width)
            .set_height(height)
            .set_colorspace(colorspace);

        let samples = self.encoded_samples(layout);

        let mut encoder = PngEncoder::new(&samples, options);
        encoder.set_gamma(gamma);
        encoder.encode(writer)?;

        Ok(())
    }
}
