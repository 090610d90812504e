/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gaussian blur
use log::trace;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::convolve::convolve_separable;
use crate::utils::{check_positive, clamp_radius, to_image, DevicePixels};

/// Perform a gaussian blur on the image
///
/// The kernel extends `ceil(3*sigma)` pixels on each side of the centre,
/// never more than the larger image dimension.
#[derive(Copy, Clone, Debug)]
pub struct GaussianBlur {
    sigma: f32
}

impl GaussianBlur {
    /// Create a new gaussian blur filter
    ///
    /// # Arguments
    /// - sigma: How much to blur by, must be greater than zero
    #[must_use]
    pub fn new(sigma: f32) -> GaussianBlur {
        GaussianBlur { sigma }
    }
}

impl OperationsTrait for GaussianBlur {
    fn name(&self) -> &'static str {
        "Gaussian blur"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = gaussian_blur(image, self.sigma)?;
        Ok(())
    }
}

/// Kernel radius used for a given sigma
#[must_use]
pub fn kernel_radius(sigma: f32) -> usize {
    (3.0 * sigma).ceil() as usize
}

/// Normalized one dimensional gaussian weights spanning `radius` taps on
/// each side of the centre
///
/// The normalized 2-D kernel is the outer product of this with itself.
#[must_use]
pub fn gaussian_kernel(sigma: f32, radius: usize) -> Vec<f32> {
    let radius = radius as isize;
    let denominator = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|x| (-((x * x) as f32) / denominator).exp())
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|x| *x /= sum);

    kernel
}

/// Return a blurred copy of `image`
///
/// # Errors
/// If sigma is not a positive finite number
pub fn gaussian_blur(image: &PortableBitmap, sigma: f32) -> Result<PortableBitmap, ImageErrors> {
    check_positive("gaussian blur", "sigma", sigma)?;

    let source = DevicePixels::from_image(image);

    let radius = clamp_radius(kernel_radius(sigma), source.width, source.height);
    let kernel = gaussian_kernel(sigma, radius);
    trace!("Gaussian blur sigma {sigma}, {} taps", kernel.len());

    let output = convolve_separable(&source, &kernel);

    to_image(image, source.width, source.height, &output)
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;
    use tinct_image::bitmap::PortableBitmap;
    use tinct_image::errors::ErrorKind;

    use crate::gaussian_blur::{gaussian_blur, gaussian_kernel, kernel_radius};

    #[test]
    fn test_kernel_shape() {
        assert_eq!(kernel_radius(1.0), 3);
        assert_eq!(kernel_radius(0.4), 2);

        let kernel = gaussian_kernel(1.5, kernel_radius(1.5));
        assert_eq!(kernel.len(), 11);
        assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert!(kernel[5] > kernel[4] && kernel[4] > kernel[3]);
        assert!((kernel[0] - kernel[10]).abs() < 1e-9);
    }

    #[test]
    fn test_matches_two_dimensional_kernel() {
        let sigma = 1.0_f32;
        let mut image = PortableBitmap::new(9, 9, Converter::Greyscale).unwrap();
        image.set_pixel(4, 4, ColorTriple::WHITE).unwrap();

        let output = gaussian_blur(&image, sigma).unwrap();

        // weights of the normalized 2-D kernel
        let radius = 3_i32;
        let weight = |x: i32, y: i32| (-((x * x + y * y) as f32) / (2.0 * sigma * sigma)).exp();
        let mut total = 0.0;
        for y in -radius..=radius {
            for x in -radius..=radius {
                total += weight(x, y);
            }
        }
        for (x, y) in [(4, 4), (5, 4), (6, 6), (2, 3)] {
            let expected = weight(x - 4, y - 4) / total;
            let found = output.get_pixel(x as usize, y as usize).unwrap().first();
            assert!((expected - found).abs() < 1e-5, "({x},{y}) {expected} {found}");
        }
    }

    #[test]
    fn test_huge_sigma_is_bounded() {
        assert_eq!(kernel_radius(f32::MAX), usize::MAX);

        let mut image = PortableBitmap::new(4, 3, Converter::Greyscale).unwrap();
        image.set_pixel(0, 0, ColorTriple::WHITE).unwrap();

        let output = gaussian_blur(&image, 1e30).unwrap();

        // every tap carries the same weight
        let total: f32 = output.pixels().iter().map(|x| x.first()).sum();
        assert!(total > 0.0 && total.is_finite());
        assert!(output.pixels().iter().all(|x| x.first() < 1.0));
    }

    #[test]
    fn test_invalid_sigma() {
        let image = PortableBitmap::new(2, 2, Converter::Rgb).unwrap();
        assert_eq!(gaussian_blur(&image, 0.0).unwrap_err().kind(), ErrorKind::Range);
        assert_eq!(gaussian_blur(&image, -1.0).unwrap_err().kind(), ErrorKind::Range);
    }
}
