/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Helpers shared by the processing routines
use tinct_core::converters::Converter;
use tinct_core::triple::ColorTriple;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;

/// A pixel in device RGB with unbounded components
pub(crate) type Rgb = [f32; 3];

/// Device RGB copy of an image's stored pixels
///
/// Reads outside the grid clamp to the nearest edge pixel.
pub(crate) struct DevicePixels {
    pub width:  usize,
    pub height: usize,
    pub pixels: Vec<Rgb>
}

impl DevicePixels {
    pub fn from_image(image: &PortableBitmap) -> DevicePixels {
        let converter = image.converter();
        let (width, height) = image.dimensions();

        let pixels = image
            .pixels()
            .iter()
            .map(|x| converter.to_rgb(*x).to_array())
            .collect();

        DevicePixels { width, height, pixels }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> Rgb {
        self.get(clamp_index(x, self.width), clamp_index(y, self.height))
    }
}

/// Clamp a possibly negative coordinate into `0..length`
#[inline]
pub(crate) fn clamp_index(position: isize, length: usize) -> usize {
    position.clamp(0, length as isize - 1) as usize
}

/// Bound a window radius by the image size
///
/// Windows are read with clamped coordinates, so wider windows only add
/// more copies of the border pixels.
#[inline]
pub(crate) fn clamp_radius(radius: usize, width: usize, height: usize) -> usize {
    radius.min(width.max(height))
}

/// The working space for images holding intermediate intensities
pub(crate) const fn continuous(converter: Converter) -> Converter {
    match converter {
        Converter::BlackAndWhite => Converter::Greyscale,
        other => other
    }
}

/// Build the output of a routine from device RGB pixels
///
/// Pixels are clamped to `[0,1]` and moved back to the continuous
/// form of the source's working space. Gamma tag and channel visibility
/// are kept.
pub(crate) fn to_image(
    source: &PortableBitmap, width: usize, height: usize, pixels: &[Rgb]
) -> Result<PortableBitmap, ImageErrors> {
    to_image_with(source, width, height, pixels, continuous(source.converter()))
}

pub(crate) fn to_image_with(
    source: &PortableBitmap, width: usize, height: usize, pixels: &[Rgb], converter: Converter
) -> Result<PortableBitmap, ImageErrors> {
    let pixels = pixels
        .iter()
        .map(|[r, g, b]| converter.from_rgb(ColorTriple::clamped(*r, *g, *b)))
        .collect::<Result<Vec<ColorTriple>, _>>()?;

    source.with_pixels(width, height, pixels, converter)
}

/// Fill `output` (row major, `width` pixels per row) by calling `func`
/// with the coordinates of every pixel
pub(crate) fn compute_rows<T, F>(output: &mut [T], width: usize, func: F)
where
    T: Send,
    F: Fn(usize, usize) -> T + Sync
{
    compute_rows_with(output, width, || (), |_, x, y| func(x, y));
}

/// Same as [`compute_rows`] but `func` also receives a scratch buffer
/// created by `scratch` once per run of rows
///
/// With the `threads` feature rows are split between scoped threads.
pub(crate) fn compute_rows_with<T, S, I, F>(output: &mut [T], width: usize, scratch: I, func: F)
where
    T: Send,
    I: Fn() -> S + Sync,
    F: Fn(&mut S, usize, usize) -> T + Sync
{
    #[cfg(feature = "threads")]
    {
        let height = output.len() / width;
        let workers = std::thread::available_parallelism()
            .map_or(1, std::num::NonZeroUsize::get)
            .min(height)
            .max(1);

        if workers > 1 {
            let rows_per_worker = height.div_ceil(workers);
            let (scratch, func) = (&scratch, &func);

            std::thread::scope(|s| {
                for (chunk_index, chunk) in output.chunks_mut(rows_per_worker * width).enumerate() {
                    s.spawn(move || {
                        fill_rows(chunk, width, chunk_index * rows_per_worker, &mut scratch(), func);
                    });
                }
            });
            return;
        }
    }
    fill_rows(output, width, 0, &mut scratch(), &func);
}

fn fill_rows<T, S, F>(output: &mut [T], width: usize, first_row: usize, scratch: &mut S, func: &F)
where
    F: Fn(&mut S, usize, usize) -> T
{
    for (y, row) in output.chunks_exact_mut(width).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = func(scratch, x, first_row + y);
        }
    }
}

pub(crate) fn check_unit(operation: &'static str, name: &str, value: f32) -> Result<(), ImageErrors> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ImageErrors::InvalidParameter(
            operation,
            format!("{name} should be between 0 and 1, found {value}")
        ));
    }
    Ok(())
}

pub(crate) fn check_positive(operation: &'static str, name: &str, value: f32) -> Result<(), ImageErrors> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ImageErrors::InvalidParameter(
            operation,
            format!("{name} should be a positive number, found {value}")
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::utils::{clamp_index, clamp_radius, compute_rows};

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-3, 5), 0);
        assert_eq!(clamp_index(2, 5), 2);
        assert_eq!(clamp_index(9, 5), 4);
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(2, 5, 3), 2);
        assert_eq!(clamp_radius(40, 5, 3), 5);
        assert_eq!(clamp_radius(usize::MAX, 1, 8), 8);
    }

    #[test]
    fn test_compute_rows_visits_every_pixel() {
        let (width, height) = (7, 13);
        let mut output = vec![(0, 0); width * height];

        compute_rows(&mut output, width, |x, y| (x, y));

        for (i, (x, y)) in output.iter().enumerate() {
            assert_eq!((*x, *y), (i % width, i / width));
        }
    }
}
