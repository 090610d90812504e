/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
use tinct_core::coefficient::Coefficient;
use tinct_core::converters::Converter;
use tinct_core::triple::ColorTriple;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{clamp_index, compute_rows};

/// Perform a sobel image derivative.
///
/// This operation calculates the gradient of the image's grey values,
/// which represents how quickly intensity changes from one point to
/// another in both the horizontal and vertical directions.
/// The output is a greyscale image of the gradient magnitude, clamped to `[0,1]`.
///
/// The matrix for sobel is
///
/// Gx matrix
/// ```text
///   -1, 0, 1,
///   -2, 0, 2,
///   -1, 0, 1
/// ```
/// Gy matrix
/// ```text
/// -1,-2,-1,
///  0, 0, 0,
///  1, 2, 1
/// ```
///
/// The window is a 3x3 window.
#[derive(Default, Copy, Clone)]
pub struct Sobel;

impl Sobel {
    #[must_use]
    pub fn new() -> Sobel {
        Self
    }
}

impl OperationsTrait for Sobel {
    fn name(&self) -> &'static str {
        "Sobel"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = sobel(image)?;
        Ok(())
    }
}

const GX: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const GY: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Return the gradient magnitude of `image` as a greyscale image
pub fn sobel(image: &PortableBitmap) -> Result<PortableBitmap, ImageErrors> {
    let converter = image.converter();
    let (width, height) = image.dimensions();

    let grey: Vec<f32> = image
        .pixels()
        .iter()
        .map(|x| converter.grey_value(*x))
        .collect();

    let mut output = vec![ColorTriple::BLACK; width * height];

    compute_rows(&mut output, width, |x, y| {
        let mut gx = 0.0;
        let mut gy = 0.0;

        for (ky, (row_x, row_y)) in GX.iter().zip(GY.iter()).enumerate() {
            let sy = clamp_index(y as isize + ky as isize - 1, height);

            for (kx, (wx, wy)) in row_x.iter().zip(row_y).enumerate() {
                let sx = clamp_index(x as isize + kx as isize - 1, width);
                let value = grey[sy * width + sx];

                gx += wx * value;
                gy += wy * value;
            }
        }
        ColorTriple::splat(Coefficient::clamped((gx * gx + gy * gy).sqrt()))
    });

    let mut result = PortableBitmap::from_pixels(width, height, output, Converter::Greyscale)?;
    result.set_gamma(image.gamma());

    Ok(result)
}
