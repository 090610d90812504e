/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Contrast adaptive sharpening
//!
//! Each component is sharpened using its 3x3 cross neighbourhood (up, left,
//! centre, right, down). The amount of sharpening drops where the
//! neighbourhood already spans most of the range, which keeps edges
//! from ringing.
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{check_unit, compute_rows, to_image, DevicePixels};

/// Sharpen an image, `sharpness` goes from 0 (least) to 1 (most)
#[derive(Copy, Clone, Debug)]
pub struct ContrastAdaptiveSharpen {
    sharpness: f32
}

impl ContrastAdaptiveSharpen {
    #[must_use]
    pub fn new(sharpness: f32) -> ContrastAdaptiveSharpen {
        ContrastAdaptiveSharpen { sharpness }
    }
}

impl OperationsTrait for ContrastAdaptiveSharpen {
    fn name(&self) -> &'static str {
        "Contrast adaptive sharpening"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = contrast_adaptive_sharpen(image, self.sharpness)?;
        Ok(())
    }
}

/// Sharpen one component given its cross neighbourhood
///
/// `peak` is the negative lobe weight, `-1/8` for the least and `-1/5`
/// for the most sharpening.
#[inline]
fn sharpen_component(up: f32, left: f32, center: f32, right: f32, down: f32, peak: f32) -> f32 {
    let min = up.min(left).min(center).min(right).min(down);
    let max = up.max(left).max(center).max(right).max(down);

    if max <= 0.0 {
        return center;
    }
    let amplitude = (min.min(1.0 - max) / max).clamp(0.0, 1.0).sqrt();
    let weight = amplitude * peak;

    ((up + left + right + down) * weight + center) / (1.0 + 4.0 * weight)
}

/// Return a sharpened copy of `image`
///
/// # Errors
/// If `sharpness` is outside `[0,1]`
pub fn contrast_adaptive_sharpen(
    image: &PortableBitmap, sharpness: f32
) -> Result<PortableBitmap, ImageErrors> {
    check_unit("contrast adaptive sharpening", "sharpness", sharpness)?;

    let peak = -1.0 / (8.0 - 3.0 * sharpness);
    let source = DevicePixels::from_image(image);
    let (width, height) = (source.width, source.height);

    let mut output = vec![[0.0; 3]; width * height];

    compute_rows(&mut output, width, |x, y| {
        let (x, y) = (x as isize, y as isize);

        let up = source.get_clamped(x, y - 1);
        let left = source.get_clamped(x - 1, y);
        let center = source.get_clamped(x, y);
        let right = source.get_clamped(x + 1, y);
        let down = source.get_clamped(x, y + 1);

        let mut result = [0.0; 3];
        for (c, value) in result.iter_mut().enumerate() {
            *value = sharpen_component(up[c], left[c], center[c], right[c], down[c], peak);
        }
        result
    });

    to_image(image, width, height, &output)
}
