/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Resampling
//!
//! Each destination pixel centre is mapped to a fractional source
//! coordinate and the source is sampled there with one of the
//! [`ResizeMethod`] kernels. Neighbourhoods crossing the border repeat
//! the edge pixels and results are clamped to `[0,1]`.
//!
//! For a scale `s`, focal point `(fx, fy)` and a destination canvas of
//! width `dw`, destination column `dx` samples source column
//!
//! ```text
//! fx * width + (dx + 0.5 - fx * dw) / s - 0.5
//! ```
//!
//! so the focal point of the source lands on the focal point of the canvas.
use log::trace;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::convolve::add_weighted;
use crate::utils::{check_positive, check_unit, compute_rows, to_image, DevicePixels, Rgb};

/// Interpolation kernels
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ResizeMethod {
    /// Nearest source pixel
    Nearest,
    /// Linear interpolation between the four closest pixels
    #[default]
    Bilinear,
    /// Windowed sinc over a 6x6 neighbourhood
    Lanczos3,
    /// Cubic B-spline over a 4x4 neighbourhood
    BSpline
}

impl ResizeMethod {
    /// Number of source pixels on each side of the sample the kernel reads
    const fn support(self) -> isize {
        match self {
            ResizeMethod::Nearest => 0,
            ResizeMethod::Bilinear => 1,
            ResizeMethod::BSpline => 2,
            ResizeMethod::Lanczos3 => 3
        }
    }

    fn weight(self, distance: f32) -> f32 {
        match self {
            ResizeMethod::Nearest => f32::from(u8::from(distance.abs() < 0.5)),
            ResizeMethod::Bilinear => (1.0 - distance.abs()).max(0.0),
            ResizeMethod::Lanczos3 => lanczos(distance, 3.0),
            ResizeMethod::BSpline => b_spline(distance)
        }
    }
}

fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        return 1.0;
    }
    let x = x * std::f32::consts::PI;
    x.sin() / x
}

fn lanczos(x: f32, a: f32) -> f32 {
    if x.abs() >= a {
        return 0.0;
    }
    sinc(x) * sinc(x / a)
}

fn b_spline(x: f32) -> f32 {
    let x = x.abs();

    if x < 1.0 {
        (4.0 - 6.0 * x * x + 3.0 * x * x * x) / 6.0
    } else if x < 2.0 {
        (2.0 - x).powi(3) / 6.0
    } else {
        0.0
    }
}

/// Resample an image by a scale factor around a focal point
///
/// By default the canvas has the scaled dimensions, set a canvas size to
/// crop or pad around the focal point instead.
#[derive(Copy, Clone, Debug)]
pub struct Resize {
    scale:  f32,
    method: ResizeMethod,
    focal:  (f32, f32),
    canvas: Option<(usize, usize)>
}

impl Resize {
    /// Create a new resize operation
    ///
    /// # Arguments
    /// - scale: Ratio between output and input size
    /// - method: Interpolation kernel
    #[must_use]
    pub fn new(scale: f32, method: ResizeMethod) -> Resize {
        Resize {
            scale,
            method,
            focal: (0.0, 0.0),
            canvas: None
        }
    }

    /// Set the normalized anchor point, `(0,0)` is the top left corner
    /// and `(1,1)` the bottom right
    #[must_use]
    pub fn set_focal_point(mut self, x: f32, y: f32) -> Self {
        self.focal = (x, y);
        self
    }

    /// Set the output dimensions instead of deriving them from the scale
    #[must_use]
    pub fn set_canvas(mut self, width: usize, height: usize) -> Self {
        self.canvas = Some((width, height));
        self
    }

    pub const fn get_scale(&self) -> f32 {
        self.scale
    }

    pub const fn get_focal_point(&self) -> (f32, f32) {
        self.focal
    }
}

impl OperationsTrait for Resize {
    fn name(&self) -> &'static str {
        "Resize"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        let (width, height) = match self.canvas {
            Some(canvas) => canvas,
            None => scaled_dimensions(image.dimensions(), self.scale)?
        };
        *image = resample(image, width, height, self.scale, self.focal, self.method)?;
        Ok(())
    }
}

/// Dimensions of an image scaled by `scale`, never less than one pixel
///
/// # Errors
/// If `scale` is not a positive finite number
pub fn scaled_dimensions(
    (width, height): (usize, usize), scale: f32
) -> Result<(usize, usize), ImageErrors> {
    check_positive("resize", "scale", scale)?;

    let scale_dimension = |x: usize| ((x as f32 * scale).round() as usize).max(1);

    Ok((scale_dimension(width), scale_dimension(height)))
}

/// Resize `image` to exactly `width` x `height`
///
/// # Errors
/// If either dimension is zero
pub fn resize(
    image: &PortableBitmap, width: usize, height: usize, method: ResizeMethod
) -> Result<PortableBitmap, ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::ZeroDimensions(width, height));
    }
    let scale_x = width as f32 / image.width() as f32;
    let scale_y = height as f32 / image.height() as f32;

    resample_impl(image, (width, height), (scale_x, scale_y), (0.0, 0.0), method)
}

/// Scale `image` by `scale` around `focal` onto a `width` x `height` canvas
///
/// # Errors
/// - If either dimension is zero
/// - If `scale` is not a positive finite number
/// - If a focal coordinate is outside `[0,1]`
pub fn resample(
    image: &PortableBitmap, width: usize, height: usize, scale: f32, focal: (f32, f32),
    method: ResizeMethod
) -> Result<PortableBitmap, ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::ZeroDimensions(width, height));
    }
    check_positive("resize", "scale", scale)?;
    check_unit("resize", "focal point x", focal.0)?;
    check_unit("resize", "focal point y", focal.1)?;

    resample_impl(image, (width, height), (scale, scale), focal, method)
}

fn resample_impl(
    image: &PortableBitmap, (width, height): (usize, usize), (scale_x, scale_y): (f32, f32),
    (focal_x, focal_y): (f32, f32), method: ResizeMethod
) -> Result<PortableBitmap, ImageErrors> {
    trace!(
        "Resampling {}x{} to {width}x{height} using {method:?}",
        image.width(),
        image.height()
    );
    let source = DevicePixels::from_image(image);

    let map_x = |dx: usize| {
        focal_x * source.width as f32 + (dx as f32 + 0.5 - focal_x * width as f32) / scale_x - 0.5
    };
    let map_y = |dy: usize| {
        focal_y * source.height as f32 + (dy as f32 + 0.5 - focal_y * height as f32) / scale_y - 0.5
    };

    let mut output: Vec<Rgb> = vec![[0.0; 3]; width * height];

    compute_rows(&mut output, width, |x, y| {
        sample(&source, map_x(x), map_y(y), method)
    });

    to_image(image, width, height, &output)
}

fn sample(source: &DevicePixels, x: f32, y: f32, method: ResizeMethod) -> Rgb {
    if method == ResizeMethod::Nearest {
        return source.get_clamped(x.round() as isize, y.round() as isize);
    }
    let support = method.support();
    let (base_x, base_y) = (x.floor() as isize, y.floor() as isize);

    let mut sum = [0.0; 3];
    let mut total = 0.0;

    for sy in (base_y - support + 1)..=(base_y + support) {
        let wy = method.weight(y - sy as f32);
        if wy == 0.0 {
            continue;
        }
        for sx in (base_x - support + 1)..=(base_x + support) {
            let weight = wy * method.weight(x - sx as f32);
            if weight == 0.0 {
                continue;
            }
            add_weighted(&mut sum, source.get_clamped(sx, sy), weight);
            total += weight;
        }
    }
    if total != 0.0 {
        sum.iter_mut().for_each(|x| *x /= total);
    }
    sum.map(|x| x.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use nanorand::{Rng, WyRand};
    use tinct_core::converters::Converter;
    use tinct_core::triple::ColorTriple;
    use tinct_image::bitmap::PortableBitmap;
    use tinct_image::errors::ErrorKind;
    use tinct_image::traits::OperationsTrait;

    use crate::resize::{resample, resize, scaled_dimensions, Resize, ResizeMethod};

    fn random_image(width: usize, height: usize) -> PortableBitmap {
        let mut rand = WyRand::new_seed(7);

        PortableBitmap::from_fn(width, height, Converter::Rgb, |_, _| {
            ColorTriple::from_bytes([
                rand.generate_range(0_u8..=255),
                rand.generate_range(0_u8..=255),
                rand.generate_range(0_u8..=255)
            ])
        })
        .unwrap()
    }

    #[test]
    fn test_identity_scale() {
        let image = random_image(13, 9);

        let nearest = resample(&image, 13, 9, 1.0, (0.0, 0.0), ResizeMethod::Nearest).unwrap();
        assert_eq!(nearest, image);

        for method in [ResizeMethod::Bilinear, ResizeMethod::Lanczos3] {
            let output = resample(&image, 13, 9, 1.0, (0.0, 0.0), method).unwrap();

            for (a, b) in output.pixels().iter().zip(image.pixels()) {
                assert!(a.approx_eq(b, 1e-5), "{method:?}: {a} != {b}");
            }
        }
    }

    #[test]
    fn test_b_spline_smooths() {
        // the cubic B-spline does not interpolate, a single bright pixel spreads out
        let mut image = PortableBitmap::new(5, 5, Converter::Greyscale).unwrap();
        image.set_pixel(2, 2, ColorTriple::WHITE).unwrap();

        let output = resample(&image, 5, 5, 1.0, (0.0, 0.0), ResizeMethod::BSpline).unwrap();

        let center = output.get_pixel(2, 2).unwrap().first();
        let neighbour = output.get_pixel(1, 2).unwrap().first();
        assert!((center - 4.0 / 9.0).abs() < 1e-5);
        assert!(neighbour > 0.0 && neighbour < center);
    }

    #[test]
    fn test_upscale_nearest_repeats_pixels() {
        let image = random_image(3, 2);
        let output = resize(&image, 6, 4, ResizeMethod::Nearest).unwrap();

        for y in 0..4 {
            for x in 0..6 {
                assert_eq!(
                    output.get_pixel(x, y).unwrap(),
                    image.get_pixel(x / 2, y / 2).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_downscale_bilinear_averages() {
        let image = PortableBitmap::from_fn(4, 2, Converter::Greyscale, |x, _| {
            if x % 2 == 0 {
                ColorTriple::BLACK
            } else {
                ColorTriple::WHITE
            }
        })
        .unwrap();

        let output = resize(&image, 2, 1, ResizeMethod::Bilinear).unwrap();

        for pixel in output.pixels() {
            assert!((pixel.first() - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn test_focal_point_anchors_zoom() {
        let image = PortableBitmap::from_fn(4, 4, Converter::Greyscale, |x, y| {
            ColorTriple::from_bytes([(y * 4 + x) as u8 * 10; 3])
        })
        .unwrap();

        // zoom in twice on the bottom right corner, keeping the canvas size
        let output = resample(&image, 4, 4, 2.0, (1.0, 1.0), ResizeMethod::Nearest).unwrap();

        assert_eq!(output.get_pixel(3, 3).unwrap(), image.get_pixel(3, 3).unwrap());
        assert_eq!(output.get_pixel(0, 0).unwrap(), image.get_pixel(2, 2).unwrap());
    }

    #[test]
    fn test_operation_uses_scaled_dimensions() {
        let mut image = random_image(10, 7);
        Resize::new(0.5, ResizeMethod::Lanczos3)
            .execute(&mut image)
            .unwrap();

        assert_eq!(image.dimensions(), (5, 4));
        assert_eq!(scaled_dimensions((1, 1), 0.1).unwrap(), (1, 1));
    }

    #[test]
    fn test_invalid_parameters() {
        let image = random_image(2, 2);

        let error = resample(&image, 2, 2, 0.0, (0.0, 0.0), ResizeMethod::Nearest).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Range);

        let error = resample(&image, 2, 2, 1.0, (2.0, 0.0), ResizeMethod::Nearest).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Range);

        assert!(resize(&image, 0, 2, ResizeMethod::Bilinear).is_err());
    }
}
