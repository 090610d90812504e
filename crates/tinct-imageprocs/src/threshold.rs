/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Binarize images
//!
//! Both routines compare the grey value of each pixel against a threshold
//! and produce a [`BlackAndWhite`](Converter::BlackAndWhite) image, pixels
//! above the threshold become white.
use log::trace;
use tinct_core::coefficient::Coefficient;
use tinct_core::converters::Converter;
use tinct_core::triple::ColorTriple;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::histogram::grey_histogram;
use crate::utils::check_unit;

/// Binarize with a fixed threshold in `[0,1]`
#[derive(Copy, Clone, Debug)]
pub struct Threshold {
    value: f32
}

impl Threshold {
    #[must_use]
    pub fn new(value: f32) -> Threshold {
        Threshold { value }
    }
}

impl OperationsTrait for Threshold {
    fn name(&self) -> &'static str {
        "Threshold"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = threshold(image, self.value)?;
        Ok(())
    }
}

/// Binarize with a threshold chosen by Otsu's method
#[derive(Copy, Clone, Debug, Default)]
pub struct Otsu;

impl Otsu {
    #[must_use]
    pub fn new() -> Otsu {
        Otsu
    }
}

impl OperationsTrait for Otsu {
    fn name(&self) -> &'static str {
        "Otsu threshold"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = otsu(image)?;
        Ok(())
    }
}

/// Return a black and white image where pixels whose grey value is greater
/// than `value` are white
///
/// # Errors
/// If `value` is outside `[0,1]`
pub fn threshold(image: &PortableBitmap, value: f32) -> Result<PortableBitmap, ImageErrors> {
    check_unit("threshold", "threshold", value)?;

    let converter = image.converter();

    binarize(image, |color| converter.grey_value(color) > value)
}

/// Binarize an image at the threshold [`otsu_threshold`] picks for its
/// 8 bit grey histogram
pub fn otsu(image: &PortableBitmap) -> Result<PortableBitmap, ImageErrors> {
    let threshold = otsu_threshold(&grey_histogram(image));
    trace!("Otsu threshold: {threshold}");

    let converter = image.converter();

    binarize(image, |color| {
        Coefficient::clamped(converter.grey_value(color)).denormalize() > threshold
    })
}

fn binarize<F>(image: &PortableBitmap, is_white: F) -> Result<PortableBitmap, ImageErrors>
where
    F: Fn(ColorTriple) -> bool
{
    let (width, height) = image.dimensions();

    let pixels = image
        .pixels()
        .iter()
        .map(|x| {
            if is_white(*x) {
                ColorTriple::WHITE
            } else {
                ColorTriple::BLACK
            }
        })
        .collect();

    PortableBitmap::from_pixels(width, height, pixels, Converter::BlackAndWhite)
}

/// Return the intensity that maximizes the between-class variance of
/// a 256 bin histogram
///
/// Intensities less than or equal to the result form the background.
/// Splits leaving one class empty are skipped, a histogram with a single
/// populated bin returns 0.
#[must_use]
pub fn otsu_threshold(histogram: &[u32; 256]) -> u8 {
    let total: u64 = histogram.iter().map(|x| u64::from(*x)).sum();
    let sum_all: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, count)| i as f64 * f64::from(*count))
        .sum();

    let mut background_weight = 0_u64;
    let mut background_sum = 0.0_f64;
    let mut max_variance = 0.0_f64;
    let mut threshold = 0_u8;

    for (intensity, count) in (0_u8..=255).zip(histogram.iter()) {
        background_weight += u64::from(*count);
        background_sum += f64::from(intensity) * f64::from(*count);

        let foreground_weight = total - background_weight;

        if background_weight == 0 {
            continue;
        }
        if foreground_weight == 0 {
            break;
        }
        let wb = background_weight as f64;
        let wf = foreground_weight as f64;

        let mean_background = background_sum / wb;
        let mean_foreground = (sum_all - background_sum) / wf;

        let variance = wb * wf * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            threshold = intensity;
        }
    }
    threshold
}
