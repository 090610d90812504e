/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable convolution with edge clamping
use crate::utils::{compute_rows, DevicePixels, Rgb};

/// Convolve rows and then columns of `source` with `kernel`
///
/// `kernel` has an odd length and is centred on its middle tap, the
/// result equals a 2-D convolution with the outer product of `kernel`
/// with itself.
pub(crate) fn convolve_separable(source: &DevicePixels, kernel: &[f32]) -> Vec<Rgb> {
    let (width, height) = (source.width, source.height);
    let radius = (kernel.len() / 2) as isize;

    let mut horizontal = DevicePixels {
        width,
        height,
        pixels: vec![[0.0; 3]; width * height]
    };

    compute_rows(&mut horizontal.pixels, width, |x, y| {
        let mut sum = [0.0; 3];
        for (tap, weight) in (-radius..=radius).zip(kernel) {
            let pixel = source.get_clamped(x as isize + tap, y as isize);
            add_weighted(&mut sum, pixel, *weight);
        }
        sum
    });

    let mut output = vec![[0.0; 3]; width * height];

    compute_rows(&mut output, width, |x, y| {
        let mut sum = [0.0; 3];
        for (tap, weight) in (-radius..=radius).zip(kernel) {
            let pixel = horizontal.get_clamped(x as isize, y as isize + tap);
            add_weighted(&mut sum, pixel, *weight);
        }
        sum
    });

    output
}

#[inline]
pub(crate) fn add_weighted(sum: &mut Rgb, pixel: Rgb, weight: f32) {
    for (s, p) in sum.iter_mut().zip(pixel) {
        *s += p * weight;
    }
}
