/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Calculate channel histogram statistics
//!
//! An image histogram counts the number of pixels at each intensity.
//! Stored components are quantized to 256 bins, the grey histogram bins
//! the grey value of every pixel as defined by the image's converter.
use std::cell::{BorrowError, Ref, RefCell};

use tinct_core::coefficient::Coefficient;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

/// Histograms of one image
#[derive(Clone, Debug, PartialEq)]
pub struct ImageHistogram {
    /// One histogram per stored component, in the image's working space
    pub channels: [[u32; 256]; 3],
    /// Histogram of grey values
    pub grey:     [u32; 256]
}

impl Default for ImageHistogram {
    fn default() -> Self {
        ImageHistogram {
            channels: [[0; 256]; 3],
            grey:     [0; 256]
        }
    }
}

/// A channel histogram instance
///
/// Statistics can be fetched via `.histogram()` after calling `execute`,
/// the image itself is left untouched.
///
/// # Example
/// ```rust
/// use tinct_core::converters::Converter;
/// use tinct_core::triple::ColorTriple;
/// use tinct_image::bitmap::PortableBitmap;
/// use tinct_image::traits::OperationsTrait;
/// use tinct_imageprocs::histogram::ChannelHistogram;
///
/// let mut image = PortableBitmap::new(10, 10, Converter::Rgb).unwrap();
/// image.fill(ColorTriple::from_bytes([100, 0, 255]));
///
/// let histogram = ChannelHistogram::new();
/// histogram.execute(&mut image).unwrap();
///
/// let values = histogram.histogram().unwrap();
/// assert_eq!(values.channels[0][100], 100);
/// assert_eq!(values.channels[2][255], 100);
/// ```
#[derive(Default)]
pub struct ChannelHistogram {
    histogram: RefCell<ImageHistogram>
}

impl ChannelHistogram {
    #[must_use]
    pub fn new() -> ChannelHistogram {
        ChannelHistogram::default()
    }

    /// Returns the histogram of the last image this was executed on
    ///
    /// # Returns
    /// - Ok(reference): A reference to the underlying result
    /// - Err(BorrowError): Indicates this filter has borrowed the reference
    pub fn histogram(&self) -> Result<Ref<'_, ImageHistogram>, BorrowError> {
        self.histogram.try_borrow()
    }
}

impl OperationsTrait for ChannelHistogram {
    fn name(&self) -> &'static str {
        "Channel Histogram"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *self.histogram.borrow_mut() = histogram(image);
        Ok(())
    }
}

/// Count stored components and grey values in a single pass
#[must_use]
pub fn histogram(image: &PortableBitmap) -> ImageHistogram {
    let converter = image.converter();
    let mut result = ImageHistogram::default();

    for pixel in image.pixels() {
        for (channel, value) in result.channels.iter_mut().zip(pixel.components()) {
            channel[usize::from(value.denormalize())] += 1;
        }
        let grey = Coefficient::clamped(converter.grey_value(*pixel)).denormalize();
        result.grey[usize::from(grey)] += 1;
    }
    result
}

/// Count grey values only
#[must_use]
pub fn grey_histogram(image: &PortableBitmap) -> [u32; 256] {
    let converter = image.converter();
    let mut result = [0_u32; 256];

    for pixel in image.pixels() {
        let grey = Coefficient::clamped(converter.grey_value(*pixel)).denormalize();
        result[usize::from(grey)] += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;
    use tinct_image::bitmap::PortableBitmap;

    use crate::histogram::{grey_histogram, histogram};

    #[test]
    fn test_counts_every_pixel() {
        let image = PortableBitmap::from_fn(16, 4, Converter::Rgb, |x, y| {
            ColorTriple::from_bytes([(x * 16) as u8, y as u8, 0])
        })
        .unwrap();

        let result = histogram(&image);

        for channel in &result.channels {
            assert_eq!(channel.iter().sum::<u32>(), 64);
        }
        assert_eq!(result.grey.iter().sum::<u32>(), 64);
        assert_eq!(result.channels[0][16], 4);
        assert_eq!(result.channels[1][3], 16);
        assert_eq!(result.channels[2][0], 64);
        assert_eq!(result.grey, grey_histogram(&image));
    }

    #[test]
    fn test_grey_follows_converter() {
        let image = PortableBitmap::from_pixels(
            1,
            1,
            vec![ColorTriple::from_bytes([128, 0, 0])],
            Converter::Greyscale
        )
        .unwrap();

        let result = histogram(&image);
        assert_eq!(result.grey[128], 1);
    }
}
