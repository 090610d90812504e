/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Box blur
//!
//! Every pixel becomes the mean of the `(2*radius+1)²` window centred on it,
//! windows crossing the border repeat the edge pixels.
use log::trace;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::convolve::convolve_separable;
use crate::utils::{clamp_radius, to_image, DevicePixels};

/// Perform a box blur
///
/// Radius is a measure of how many pixels to include in the box blur.
///
/// The greater the radius, the more pronounced the box blur.
#[derive(Copy, Clone, Debug)]
pub struct BoxBlur {
    radius: usize
}

impl BoxBlur {
    /// Create a new blur operation.
    ///
    /// # Arguments
    /// - radius: The window size will be `2*radius+1`
    #[must_use]
    pub fn new(radius: usize) -> BoxBlur {
        BoxBlur { radius }
    }
}

impl OperationsTrait for BoxBlur {
    fn name(&self) -> &'static str {
        "Box blur"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = box_blur(image, self.radius)?;
        Ok(())
    }
}

/// Return a box blurred copy of `image`, a radius of zero returns a copy
pub fn box_blur(image: &PortableBitmap, radius: usize) -> Result<PortableBitmap, ImageErrors> {
    if radius == 0 {
        return Ok(image.clone());
    }
    let source = DevicePixels::from_image(image);
    let radius = clamp_radius(radius, source.width, source.height);

    trace!("Box blur with radius {radius}");

    let diameter = 2 * radius + 1;
    let kernel = vec![1.0 / diameter as f32; diameter];

    let output = convolve_separable(&source, &kernel);

    to_image(image, source.width, source.height, &output)
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;
    use tinct_image::bitmap::PortableBitmap;
    use tinct_image::traits::OperationsTrait;

    use crate::box_blur::{box_blur, BoxBlur};

    #[test]
    fn test_mean_of_window() {
        let mut image = PortableBitmap::new(5, 5, Converter::Greyscale).unwrap();
        image.set_pixel(2, 2, ColorTriple::WHITE).unwrap();

        let output = box_blur(&image, 1).unwrap();

        let center = output.get_pixel(2, 2).unwrap().first();
        assert!((center - 1.0 / 9.0).abs() < 1e-6);

        let corner = output.get_pixel(1, 1).unwrap().first();
        assert!((corner - 1.0 / 9.0).abs() < 1e-6);

        assert_eq!(output.get_pixel(0, 0).unwrap().first(), 0.0);
    }

    #[test]
    fn test_flat_image_is_unchanged() {
        let color = ColorTriple::from_bytes([30, 140, 250]);
        let mut image = PortableBitmap::new(6, 4, Converter::Rgb).unwrap();
        image.fill(color);

        BoxBlur::new(3).execute(&mut image).unwrap();

        for pixel in image.pixels() {
            assert!(pixel.approx_eq(&color, 1e-5));
        }
    }

    #[test]
    fn test_radius_wider_than_image() {
        let color = ColorTriple::from_bytes([200, 100, 0]);
        let mut image = PortableBitmap::new(3, 3, Converter::Rgb).unwrap();
        image.fill(color);

        let output = box_blur(&image, usize::MAX).unwrap();

        for pixel in output.pixels() {
            assert!(pixel.approx_eq(&color, 1e-5));
        }
    }

    #[test]
    fn test_black_and_white_becomes_greyscale() {
        let image = PortableBitmap::from_fn(4, 4, Converter::BlackAndWhite, |x, _| {
            if x < 2 {
                ColorTriple::BLACK
            } else {
                ColorTriple::WHITE
            }
        })
        .unwrap();

        let output = box_blur(&image, 1).unwrap();
        assert_eq!(output.converter(), Converter::Greyscale);
    }
}
