/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Draw lines with a soft circular brush
//!
//! The line is walked with Bresenham's algorithm. At every step a disc of
//! diameter `thickness` is blended into a working copy of the image, its
//! opacity falls off linearly from `1 - transparency` at the centre to zero
//! at the rim. Overlapping steps blend on top of each other.
use log::trace;
use tinct_core::triple::ColorTriple;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{check_positive, check_unit, to_image, DevicePixels, Rgb};

/// Brush settings for [`draw_line`]
#[derive(Copy, Clone, Debug)]
pub struct Brush {
    /// Colour in the working space of the image drawn on
    pub color:        ColorTriple,
    /// Diameter of the brush in pixels
    pub thickness:    f32,
    /// 0 is opaque, 1 is invisible
    pub transparency: f32
}

impl Brush {
    #[must_use]
    pub fn new(color: ColorTriple, thickness: f32) -> Brush {
        Brush {
            color,
            thickness,
            transparency: 0.0
        }
    }

    #[must_use]
    pub fn set_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }
}

/// Draw a line between two points
#[derive(Copy, Clone, Debug)]
pub struct DrawLine {
    from:  (i64, i64),
    to:    (i64, i64),
    brush: Brush
}

impl DrawLine {
    #[must_use]
    pub fn new(from: (i64, i64), to: (i64, i64), brush: Brush) -> DrawLine {
        DrawLine { from, to, brush }
    }
}

impl OperationsTrait for DrawLine {
    fn name(&self) -> &'static str {
        "Draw line"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = draw_line(image, self.from, self.to, &self.brush)?;
        Ok(())
    }
}

/// Points visited walking from `from` to `to`, both ends included
#[must_use]
pub fn bresenham(from: (i64, i64), to: (i64, i64)) -> Vec<(i64, i64)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };

    let mut error = dx + dy;
    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);

    loop {
        points.push((x, y));

        if (x, y) == to {
            break;
        }
        let doubled = 2 * error;

        if doubled >= dy {
            error += dy;
            x += sx;
        }
        if doubled <= dx {
            error += dx;
            y += sy;
        }
    }
    points
}

/// Return a copy of `image` with a line drawn from `from` to `to`
///
/// Points may lie outside the image, only the visible part is drawn.
///
/// # Errors
/// - If the thickness is not a positive number
/// - If the transparency is outside `[0,1]`
pub fn draw_line(
    image: &PortableBitmap, from: (i64, i64), to: (i64, i64), brush: &Brush
) -> Result<PortableBitmap, ImageErrors> {
    check_positive("draw line", "thickness", brush.thickness)?;
    check_unit("draw line", "transparency", brush.transparency)?;

    let color = image.converter().to_rgb(brush.color).to_array();

    trace!("Drawing line from {from:?} to {to:?}");

    let mut canvas = DevicePixels::from_image(image);
    let radius = (brush.thickness / 2.0).max(0.5);
    let opacity = 1.0 - brush.transparency;

    for center in bresenham(from, to) {
        stamp(&mut canvas, center, radius, opacity, color);
    }

    to_image(image, canvas.width, canvas.height, &canvas.pixels)
}

fn stamp(canvas: &mut DevicePixels, (cx, cy): (i64, i64), radius: f32, opacity: f32, color: Rgb) {
    let reach = radius.ceil() as i64;
    let (width, height) = (canvas.width as i64, canvas.height as i64);

    for y in (cy - reach).max(0)..=(cy + reach).min(height - 1) {
        for x in (cx - reach).max(0)..=(cx + reach).min(width - 1) {
            let distance = (((x - cx).pow(2) + (y - cy).pow(2)) as f32).sqrt();

            if distance > radius {
                continue;
            }
            let alpha = opacity * (1.0 - distance / radius);
            let pixel = &mut canvas.pixels[(y * width + x) as usize];

            for (p, c) in pixel.iter_mut().zip(color) {
                *p = *p * (1.0 - alpha) + c * alpha;
            }
        }
    }
}
