/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Dithering
//!
//! Components are quantized to `levels` evenly spaced values in device RGB.
//! Ordered and random dithering add a bias before quantizing, error
//! diffusion pushes each pixel's quantization error to neighbours that have
//! not been visited yet, so pixels are processed in scan order.
//!
//! Greyscale and black and white images dithered to two levels come out as
//! [`BlackAndWhite`](Converter::BlackAndWhite) images, everything else keeps
//! its working space.
use log::trace;
use nanorand::{Rng, WyRand};
use tinct_core::converters::Converter;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{continuous, to_image_with, DevicePixels, Rgb};

/// 8x8 Bayer threshold matrix
#[rustfmt::skip]
const BAYER_8X8: [[u8; 8]; 8] = [
    [ 0, 32,  8, 40,  2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44,  4, 36, 14, 46,  6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [ 3, 35, 11, 43,  1, 33,  9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47,  7, 39, 13, 45,  5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21]
];

/// Floyd-Steinberg error weights as `(dx, dy, weight)`
const FLOYD_STEINBERG: [(isize, usize, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0)
];

/// Atkinson error weights, a quarter of the error is dropped
const ATKINSON: [(isize, usize, f32); 6] = [
    (1, 0, 1.0 / 8.0),
    (2, 0, 1.0 / 8.0),
    (-1, 1, 1.0 / 8.0),
    (0, 1, 1.0 / 8.0),
    (1, 1, 1.0 / 8.0),
    (0, 2, 1.0 / 8.0)
];

/// Dithering strategies
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DitherMethod {
    /// Bias from an 8x8 Bayer matrix
    Ordered,
    /// Uniform noise from a seeded generator, the same seed gives the
    /// same output
    Random(u64),
    FloydSteinberg,
    Atkinson
}

/// Reduce an image to `levels` values per component
#[derive(Copy, Clone, Debug)]
pub struct Dither {
    method: DitherMethod,
    levels: u8
}

impl Dither {
    #[must_use]
    pub fn new(method: DitherMethod, levels: u8) -> Dither {
        Dither { method, levels }
    }
}

impl OperationsTrait for Dither {
    fn name(&self) -> &'static str {
        "Dither"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = dither(image, self.method, self.levels)?;
        Ok(())
    }
}

#[inline]
fn quantize(value: f32, steps: f32) -> f32 {
    ((value * steps).round() / steps).clamp(0.0, 1.0)
}

/// Return a dithered copy of `image`
///
/// # Errors
/// If `levels` is less than two
pub fn dither(
    image: &PortableBitmap, method: DitherMethod, levels: u8
) -> Result<PortableBitmap, ImageErrors> {
    if levels < 2 {
        return Err(ImageErrors::InvalidParameter(
            "dither",
            format!("at least two levels are needed, found {levels}")
        ));
    }
    trace!("Dithering to {levels} levels using {method:?}");

    let mut source = DevicePixels::from_image(image);
    let steps = f32::from(levels - 1);

    match method {
        DitherMethod::Ordered => {
            let width = source.width;

            for (i, pixel) in source.pixels.iter_mut().enumerate() {
                let (x, y) = (i % width, i / width);
                let bias = (f32::from(BAYER_8X8[y % 8][x % 8]) + 0.5) / 64.0 - 0.5;

                *pixel = pixel.map(|v| quantize(v + bias / steps, steps));
            }
        }
        DitherMethod::Random(seed) => {
            let mut rand = WyRand::new_seed(seed);

            for pixel in &mut source.pixels {
                // 24 bits of noise in [-0.5, 0.5)
                let noise = (rand.generate::<u32>() >> 8) as f32 / (1 << 24) as f32 - 0.5;

                *pixel = pixel.map(|v| quantize(v + noise / steps, steps));
            }
        }
        DitherMethod::FloydSteinberg => diffuse(&mut source, steps, &FLOYD_STEINBERG),
        DitherMethod::Atkinson => diffuse(&mut source, steps, &ATKINSON)
    }

    let converter = if levels == 2 && image.converter().is_single_channel() {
        Converter::BlackAndWhite
    } else {
        continuous(image.converter())
    };

    to_image_with(image, source.width, source.height, &source.pixels, converter)
}

/// Error diffusion in scan order
fn diffuse(source: &mut DevicePixels, steps: f32, kernel: &[(isize, usize, f32)]) {
    let (width, height) = (source.width, source.height);

    for y in 0..height {
        for x in 0..width {
            let old: Rgb = source.get(x, y);
            let new = old.map(|v| quantize(v, steps));
            source.pixels[y * width + x] = new;

            let error = [old[0] - new[0], old[1] - new[1], old[2] - new[2]];

            for (dx, dy, weight) in kernel {
                let nx = x as isize + dx;
                let ny = y + dy;

                if nx < 0 || nx as usize >= width || ny >= height {
                    continue;
                }
                let neighbour = &mut source.pixels[ny * width + nx as usize];

                for (n, e) in neighbour.iter_mut().zip(error) {
                    *n += e * weight;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tinct_core::coefficient::Coefficient;
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;
    use tinct_image::bitmap::PortableBitmap;

    use crate::dither::{dither, DitherMethod};

    fn grey(width: usize, height: usize, value: f32) -> PortableBitmap {
        let mut image = PortableBitmap::new(width, height, Converter::Greyscale).unwrap();
        image.fill(ColorTriple::splat(Coefficient::clamped(value)));
        image
    }

    fn white_fraction(image: &PortableBitmap) -> f32 {
        let white = image
            .pixels()
            .iter()
            .filter(|x| **x == ColorTriple::WHITE)
            .count();
        white as f32 / image.pixels().len() as f32
    }

    #[test]
    fn test_two_levels_are_black_and_white() {
        let image = grey(16, 16, 0.4);

        for method in [
            DitherMethod::Ordered,
            DitherMethod::Random(42),
            DitherMethod::FloydSteinberg,
            DitherMethod::Atkinson
        ] {
            let output = dither(&image, method, 2).unwrap();
            assert_eq!(output.converter(), Converter::BlackAndWhite);

            let fraction = white_fraction(&output);
            assert!((fraction - 0.4).abs() < 0.1, "{method:?}: {fraction}");
        }
    }

    #[test]
    fn test_ordered_half_grey_is_half_white() {
        let output = dither(&grey(8, 8, 0.5), DitherMethod::Ordered, 2).unwrap();
        assert!((white_fraction(&output) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_floyd_steinberg_preserves_mean() {
        let image = grey(32, 32, 0.7);
        let output = dither(&image, DitherMethod::FloydSteinberg, 2).unwrap();

        assert!((white_fraction(&output) - 0.7).abs() < 0.02);
    }

    #[test]
    fn test_random_is_reproducible() {
        let image = grey(20, 20, 0.4);

        let a = dither(&image, DitherMethod::Random(9), 2).unwrap();
        let b = dither(&image, DitherMethod::Random(9), 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_levels() {
        let image = PortableBitmap::from_fn(8, 8, Converter::Rgb, |x, y| {
            ColorTriple::new(x as f32 / 7.0, y as f32 / 7.0, 0.5).unwrap()
        })
        .unwrap();

        let output = dither(&image, DitherMethod::Atkinson, 3).unwrap();
        assert_eq!(output.converter(), Converter::Rgb);

        for pixel in output.pixels() {
            for value in pixel.to_array() {
                assert!([0.0, 0.5, 1.0].contains(&value), "{value}");
            }
        }
        assert!(dither(&image, DitherMethod::Ordered, 1).is_err());
    }
}
