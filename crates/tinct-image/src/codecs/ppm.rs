/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Portable map glue
use std::io::Write;

use log::trace;
use tinct_core::coefficient::Coefficient;
use tinct_core::converters::Converter;
use tinct_core::options::DecoderOptions;
use tinct_core::triple::ColorTriple;
use tinct_ppm::{PnmDecoder, PnmEncoder, PnmVersions};

use crate::bitmap::PortableBitmap;
use crate::codecs::SampleLayout;
use crate::errors::ImageErrors;

/// Decode a portable map into a device RGB image
pub(crate) fn decode_pnm(bytes: &[u8], options: DecoderOptions) -> Result<PortableBitmap, ImageErrors> {
    let mut decoder = PnmDecoder::new_with_options(options, bytes);
    let samples = decoder.decode()?;

    let (width, height) = decoder
        .get_dimensions()
        .ok_or(ImageErrors::UnknownFormat)?;
    let version = decoder.get_version().ok_or(ImageErrors::UnknownFormat)?;
    let max_value = decoder.get_max_value().unwrap_or(1);

    let coefficients: Vec<Coefficient> = samples
        .iter()
        .map(|x| Coefficient::from_sample(x, max_value))
        .collect();

    let pixels = match version.num_components() {
        3 => coefficients
            .chunks_exact(3)
            .map(|x| ColorTriple::from_coefficients([x[0], x[1], x[2]]))
            .collect(),
        _ => coefficients.into_iter().map(ColorTriple::splat).collect()
    };
    trace!("Decoded {version} image of {width}x{height}");

    PortableBitmap::from_pixels(width, height, pixels, Converter::Rgb)
}

impl PortableBitmap {
    fn save_pnm<W: Write>(&self, writer: W, binary: bool) -> Result<(), ImageErrors> {
        let layout = self.sample_layout();

        let version = match layout {
            SampleLayout::BiLevel => PnmVersions::P4,
            SampleLayout::Grey(_) => PnmVersions::P5,
            SampleLayout::Rgb => PnmVersions::P6
        };
        let version = if binary { version } else { version.to_plain() };

        let samples = self.encoded_samples(layout);
        let (width, height) = self.dimensions();

        PnmEncoder::new(version, width, height).encode(&samples, writer)?;

        Ok(())
    }

    /// Write the image as a binary portable map
    ///
    /// Black and white images are written as P4, images with one
    /// visible channel or a single channel converter as P5 and
    /// everything else as P6.
    pub fn save_pnm_binary<W: Write>(&self, writer: W) -> Result<(), ImageErrors> {
        self.save_pnm(writer, true)
    }

    /// Write the image as an ASCII portable map, P1, P2 or P3
    pub fn save_pnm_plain<W: Write>(&self, writer: W) -> Result<(), ImageErrors> {
        self.save_pnm(writer, false)
    }
}
