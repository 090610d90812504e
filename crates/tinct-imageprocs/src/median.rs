/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Median filter
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{clamp_radius, compute_rows_with, to_image, DevicePixels, Rgb};

/// Median returns a new image in which each pixel is the median of its neighbors.
///
/// The parameter radius corresponds to the radius of the neighbor area to be searched,
/// for example a radius of R will result in a search window length of 2R+1 for each dimension.
/// Each component is filtered on its own.
#[derive(Copy, Clone, Debug)]
pub struct Median {
    radius: usize
}

impl Median {
    #[must_use]
    pub fn new(radius: usize) -> Median {
        Median { radius }
    }
}

impl OperationsTrait for Median {
    fn name(&self) -> &'static str {
        "Median Filter"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = median(image, self.radius)?;
        Ok(())
    }
}

/// Return a median filtered copy of `image`
///
/// A radius of zero returns a copy, radii wider than the image are reduced
/// to its larger dimension.
pub fn median(image: &PortableBitmap, radius: usize) -> Result<PortableBitmap, ImageErrors> {
    if radius == 0 {
        return Ok(image.clone());
    }
    let source = DevicePixels::from_image(image);
    let (width, height) = (source.width, source.height);

    let radius = clamp_radius(radius, width, height);
    let window = 2 * radius + 1;
    let r = radius as isize;

    let mut output: Vec<Rgb> = vec![[0.0; 3]; width * height];

    compute_rows_with(
        &mut output,
        width,
        || vec![[0.0_f32; 3]; window * window],
        |scratch: &mut Vec<Rgb>, x, y| {
            let (x, y) = (x as isize, y as isize);
            let mut position = 0;

            for dy in -r..=r {
                for dx in -r..=r {
                    scratch[position] = source.get_clamped(x + dx, y + dy);
                    position += 1;
                }
            }
            let middle = scratch.len() / 2;
            let mut result = [0.0; 3];

            for (channel, value) in result.iter_mut().enumerate() {
                *value = select_median(scratch, channel, middle);
            }
            result
        }
    );

    to_image(image, width, height, &output)
}

fn select_median(window: &mut [Rgb], channel: usize, middle: usize) -> f32 {
    let (_, median, _) =
        window.select_nth_unstable_by(middle, |a, b| a[channel].total_cmp(&b[channel]));
    median[channel]
}
