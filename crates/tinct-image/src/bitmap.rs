/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The pixel store
//!
//! An image is represented as
//!
//! - a grid of colour triples
//!     - in the working space of a converter
//!         - with a gamma tag
//!             - and three channel visibility flags
//!
//! Visibility flags do not touch stored values, hidden channels read as the
//! converter's default for that channel.
use log::trace;
use tinct_core::channel::ColorChannel;
use tinct_core::converters::Converter;
use tinct_core::gamma::Gamma;
use tinct_core::triple::ColorTriple;

use crate::errors::ImageErrors;

/// A width by height grid of colour triples
#[derive(Clone, Debug, PartialEq)]
pub struct PortableBitmap {
    width:     usize,
    height:    usize,
    pixels:    Vec<ColorTriple>,
    converter: Converter,
    gamma:     Gamma,
    visible:   [bool; 3]
}

impl PortableBitmap {
    /// Create an image where every pixel holds the converter's default value
    ///
    /// # Errors
    /// If either dimension is zero
    pub fn new(width: usize, height: usize, converter: Converter) -> Result<PortableBitmap, ImageErrors> {
        let pixels = vec![converter.default_value(); checked_size(width, height)?];

        Ok(PortableBitmap::from_parts(width, height, pixels, converter))
    }

    /// Create an image from pixels laid out in row major order
    ///
    /// # Errors
    /// - If either dimension is zero
    /// - If `pixels` does not hold `width*height` values
    pub fn from_pixels(
        width: usize, height: usize, pixels: Vec<ColorTriple>, converter: Converter
    ) -> Result<PortableBitmap, ImageErrors> {
        let size = checked_size(width, height)?;

        if pixels.len() != size {
            return Err(ImageErrors::DimensionsMisMatch(size, pixels.len()));
        }
        Ok(PortableBitmap::from_parts(width, height, pixels, converter))
    }

    /// Create an image by calling `func` with the coordinates of every pixel
    pub fn from_fn<F>(
        width: usize, height: usize, converter: Converter, mut func: F
    ) -> Result<PortableBitmap, ImageErrors>
    where
        F: FnMut(usize, usize) -> ColorTriple
    {
        checked_size(width, height)?;

        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| func(x, y))
            .collect();

        Ok(PortableBitmap::from_parts(width, height, pixels, converter))
    }

    /// Create an image from new pixels, carrying over this image's gamma tag
    /// and channel visibility
    ///
    /// # Errors
    /// Same as [`from_pixels`](PortableBitmap::from_pixels)
    pub fn with_pixels(
        &self, width: usize, height: usize, pixels: Vec<ColorTriple>, converter: Converter
    ) -> Result<PortableBitmap, ImageErrors> {
        let mut image = PortableBitmap::from_pixels(width, height, pixels, converter)?;
        image.gamma = self.gamma;
        image.visible = self.visible;

        Ok(image)
    }

    fn from_parts(
        width: usize, height: usize, pixels: Vec<ColorTriple>, converter: Converter
    ) -> PortableBitmap {
        PortableBitmap {
            width,
            height,
            pixels,
            converter,
            gamma: Gamma::Unspecified,
            visible: [true; 3]
        }
    }

    /// Get image dimensions as a tuple of (width,height)
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// The working space pixels are stored in
    pub const fn converter(&self) -> Converter {
        self.converter
    }

    pub const fn gamma(&self) -> Gamma {
        self.gamma
    }

    /// Record the transfer the stored values went through
    ///
    /// This only changes the tag, pixels are left as is
    pub fn set_gamma(&mut self, gamma: Gamma) {
        self.gamma = gamma;
    }

    /// All stored pixels in row major order, ignoring visibility
    pub fn pixels(&self) -> &[ColorTriple] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [ColorTriple] {
        &mut self.pixels
    }

    /// Iterate over rows of stored pixels
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[ColorTriple]> {
        self.pixels.chunks_exact(self.width)
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, ImageErrors> {
        if x >= self.width || y >= self.height {
            return Err(ImageErrors::PixelOutOfBounds(x, y, self.width, self.height));
        }
        Ok(y * self.width + x)
    }

    /// Return the pixel at `(x,y)` with hidden channels replaced by
    /// the converter's default
    ///
    /// # Errors
    /// If the coordinates are outside the image
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<ColorTriple, ImageErrors> {
        Ok(self.resolve(self.pixels[self.index(x, y)?]))
    }

    /// Return the stored pixel at `(x,y)`, ignoring visibility
    pub fn get_raw_pixel(&self, x: usize, y: usize) -> Result<ColorTriple, ImageErrors> {
        Ok(self.pixels[self.index(x, y)?])
    }

    /// Overwrite the pixel at `(x,y)`
    ///
    /// The triple is taken to be in the image's working space
    pub fn set_pixel(&mut self, x: usize, y: usize, color: ColorTriple) -> Result<(), ImageErrors> {
        let index = self.index(x, y)?;
        self.pixels[index] = color;
        Ok(())
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: ColorTriple) {
        self.pixels.fill(color);
    }

    /// Apply visibility flags to a stored triple
    pub(crate) fn resolve(&self, color: ColorTriple) -> ColorTriple {
        if self.visible == [true; 3] {
            return color;
        }
        let mut channels = ColorChannel::split(color);

        for (channel, visible) in channels.iter_mut().zip(self.visible) {
            channel.set_visible(visible);
        }
        ColorChannel::assemble(&channels, self.converter)
    }

    /// Visible pixels in device RGB, row major order
    pub fn to_rgb_pixels(&self) -> Vec<ColorTriple> {
        self.pixels
            .iter()
            .map(|x| self.converter.to_rgb(self.resolve(*x)))
            .collect()
    }

    /// Move all pixels to another working space
    ///
    /// Each pixel goes through device RGB. Converting to the current
    /// converter does nothing.
    ///
    /// # Errors
    /// If a colour cannot be represented in the new space, the image is
    /// left unchanged
    pub fn convert_to(&mut self, converter: Converter) -> Result<(), ImageErrors> {
        if converter == self.converter {
            return Ok(());
        }
        trace!("Converting image from {} to {}", self.converter, converter);

        let pixels = self
            .pixels
            .iter()
            .map(|x| converter.from_rgb(self.converter.to_rgb(*x)))
            .collect::<Result<Vec<ColorTriple>, _>>()?;

        self.pixels = pixels;
        self.converter = converter;

        Ok(())
    }

    /// Show or hide a channel, `index` is 0, 1 or 2
    pub fn set_channel_visible(&mut self, index: usize, visible: bool) -> Result<(), ImageErrors> {
        let flag = self
            .visible
            .get_mut(index)
            .ok_or(ImageErrors::ChannelOutOfBounds(index))?;
        *flag = visible;
        Ok(())
    }

    pub fn toggle_first_channel(&mut self) {
        self.visible[0] = !self.visible[0];
    }

    pub fn toggle_second_channel(&mut self) {
        self.visible[1] = !self.visible[1];
    }

    pub fn toggle_third_channel(&mut self) {
        self.visible[2] = !self.visible[2];
    }

    /// Visibility of the three channels
    pub const fn visible_channels(&self) -> [bool; 3] {
        self.visible
    }

    /// Number of visible channels
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|x| **x).count()
    }
}

fn checked_size(width: usize, height: usize) -> Result<usize, ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::ZeroDimensions(width, height));
    }
    width.checked_mul(height).ok_or_else(|| {
        ImageErrors::InvalidParameter("image", format!("dimensions {width}x{height} overflow"))
    })
}
