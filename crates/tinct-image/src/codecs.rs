/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for the codecs the library understands
//!
//! Decoding produces device RGB pixels which are then moved to the
//! requested working space. Encoding goes the other way, resolving hidden
//! channels first, so what is written is what [`PortableBitmap::get_pixel`]
//! returns.
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::trace;
use tinct_core::converters::Converter;
use tinct_core::options::DecoderOptions;

use crate::bitmap::PortableBitmap;
use crate::errors::ImageErrors;

pub mod png;
pub mod ppm;

/// PNG magic bytes
const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ImageFormat {
    /// Portable bitmap, graymap and pixmap, P1 to P6
    PPM,
    /// Portable Network Graphics
    PNG
}

impl ImageFormat {
    /// Guess the format of an encoded image from its first bytes
    ///
    /// A leading `P` is taken to be a portable map, anything else must start
    /// with the PNG signature.
    pub fn guess_format(bytes: &[u8]) -> Option<ImageFormat> {
        match bytes.first() {
            Some(b'P') => Some(ImageFormat::PPM),
            _ if bytes.starts_with(&PNG_SIGNATURE) => Some(ImageFormat::PNG),
            _ => None
        }
    }

    /// Map a file extension, without the dot, to a format
    pub fn from_extension<P: AsRef<str>>(extension: P) -> Option<ImageFormat> {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "ppm" | "pgm" | "pbm" | "pnm" => Some(ImageFormat::PPM),
            "png" => Some(ImageFormat::PNG),
            _ => None
        }
    }

    /// Map the extension of a path to a format
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
        path.as_ref()
            .extension()
            .and_then(|x| x.to_str())
            .and_then(ImageFormat::from_extension)
    }
}

/// How pixels are laid out when written
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SampleLayout {
    /// One bit per pixel, only for black and white images
    BiLevel,
    /// One sample per pixel taken from the given channel
    Grey(usize),
    Rgb
}

impl PortableBitmap {
    /// Decode an image held in memory, moving it to `converter`'s space
    ///
    /// # Errors
    /// - Unknown formats
    /// - Any decoding error
    /// - Colours the converter cannot represent
    pub fn decode(bytes: &[u8], converter: Converter) -> Result<PortableBitmap, ImageErrors> {
        PortableBitmap::decode_with_options(bytes, converter, DecoderOptions::default())
    }

    pub fn decode_with_options(
        bytes: &[u8], converter: Converter, options: DecoderOptions
    ) -> Result<PortableBitmap, ImageErrors> {
        let mut image = match ImageFormat::guess_format(bytes) {
            Some(ImageFormat::PPM) => ppm::decode_pnm(bytes, options)?,
            Some(ImageFormat::PNG) => png::decode_png(bytes, options)?,
            None => return Err(ImageErrors::UnknownFormat)
        };
        image.convert_to(converter)?;

        Ok(image)
    }

    /// Read an encoded image from a stream until its end
    pub fn read_from<R: Read>(mut reader: R, converter: Converter) -> Result<PortableBitmap, ImageErrors> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        PortableBitmap::decode(&bytes, converter)
    }

    /// Open and decode an image file
    pub fn open<P: AsRef<Path>>(path: P, converter: Converter) -> Result<PortableBitmap, ImageErrors> {
        trace!("Opening {:?}", path.as_ref());
        let bytes = std::fs::read(path)?;

        PortableBitmap::decode(&bytes, converter)
    }

    /// Save the image to a file, picking the format from the extension
    ///
    /// Portable maps are written in their binary forms, PNG files carry the
    /// image's gamma tag.
    ///
    /// # Errors
    /// - Unknown extensions
    /// - Encoding and I/O errors
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageErrors> {
        let format = ImageFormat::from_path(&path).ok_or(ImageErrors::UnknownFormat)?;

        let mut writer = BufWriter::new(File::create(path)?);

        match format {
            ImageFormat::PPM => self.save_pnm_binary(&mut writer)?,
            ImageFormat::PNG => self.save_png(&mut writer, self.gamma())?
        }
        writer.flush()?;

        Ok(())
    }

    pub(crate) fn sample_layout(&self) -> SampleLayout {
        let visible = self.visible_channels();

        if self.converter() == Converter::BlackAndWhite {
            SampleLayout::BiLevel
        } else if self.visible_count() == 1 {
            let index = visible.iter().position(|x| *x).unwrap_or(0);
            SampleLayout::Grey(index)
        } else if self.converter().is_single_channel() {
            SampleLayout::Grey(0)
        } else {
            SampleLayout::Rgb
        }
    }

    /// Samples to write for a layout, bi-level pixels are 0 or 255
    pub(crate) fn encoded_samples(&self, layout: SampleLayout) -> Vec<u8> {
        match layout {
            SampleLayout::BiLevel => self
                .pixels()
                .iter()
                .map(|x| if self.resolve(*x).first() >= 0.5 { 255 } else { 0 })
                .collect(),
            SampleLayout::Grey(index) => self
                .pixels()
                .iter()
                .map(|x| self.resolve(*x).get(index).denormalize())
                .collect(),
            SampleLayout::Rgb => self
                .to_rgb_pixels()
                .iter()
                .flat_map(|x| x.to_bytes())
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;

    use crate::bitmap::PortableBitmap;
    use crate::codecs::{ImageFormat, SampleLayout};

    #[test]
    fn test_guess_format() {
        assert_eq!(ImageFormat::guess_format(b"P6 1 1"), Some(ImageFormat::PPM));
        assert_eq!(
            ImageFormat::guess_format(&[137, 80, 78, 71, 13, 10, 26, 10, 0]),
            Some(ImageFormat::PNG)
        );
        assert_eq!(ImageFormat::guess_format(&[137, 80, 78]), None);
        assert_eq!(ImageFormat::guess_format(b"GIF89a"), None);
        assert_eq!(ImageFormat::guess_format(&[]), None);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ImageFormat::from_extension("PGM"), Some(ImageFormat::PPM));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::PNG));
        assert_eq!(ImageFormat::from_extension("jpg"), None);
        assert_eq!(ImageFormat::from_path("a/b.pbm"), Some(ImageFormat::PPM));
        assert_eq!(ImageFormat::from_path("noext"), None);
    }

    #[test]
    fn test_layouts() {
        let mut image = PortableBitmap::new(1, 1, Converter::Rgb).unwrap();
        assert_eq!(image.sample_layout(), SampleLayout::Rgb);

        image.toggle_first_channel();
        image.toggle_third_channel();
        assert_eq!(image.sample_layout(), SampleLayout::Grey(1));

        let image = PortableBitmap::new(1, 1, Converter::Greyscale).unwrap();
        assert_eq!(image.sample_layout(), SampleLayout::Grey(0));

        let image = PortableBitmap::new(1, 1, Converter::BlackAndWhite).unwrap();
        assert_eq!(image.sample_layout(), SampleLayout::BiLevel);
    }

    #[test]
    fn test_samples_follow_visibility() {
        let mut image = PortableBitmap::new(1, 1, Converter::Rgb).unwrap();
        image.set_pixel(0, 0, ColorTriple::from_bytes([10, 20, 30])).unwrap();

        assert_eq!(image.encoded_samples(SampleLayout::Rgb), [10, 20, 30]);
        image.toggle_second_channel();
        assert_eq!(image.encoded_samples(SampleLayout::Rgb), [10, 0, 30]);
        assert_eq!(image.encoded_samples(SampleLayout::Grey(2)), [30]);
    }

    #[test]
    fn test_unknown_input() {
        let err = PortableBitmap::decode(b"GIF89a", Converter::Rgb).unwrap_err();
        assert!(matches!(err, crate::errors::ImageErrors::UnknownFormat));
    }
}
