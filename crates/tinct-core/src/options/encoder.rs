/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::colorspace::ColorSpace;

/// How an encoder predicts scanlines before compression
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RowFilter {
    /// Store every row as is
    #[default]
    None,
    Sub,
    Up,
    Average,
    Paeth,
    /// Pick, per row, the filter with the smallest sum of absolute residuals
    Adaptive
}

/// Options shared by the encoders in
/// the `tinct` family of image crates
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace,
    effort:     u8,
    row_filter: RowFilter
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGB,
            effort:     6,
            row_filter: RowFilter::None
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    ///
    /// * `width`: Image width
    /// * `height`: Image height
    /// * `colorspace`: Image colorspace
    pub fn new(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            ..Default::default()
        }
    }

    /// Get the width for which the image will be encoded in
    pub const fn get_width(&self) -> usize {
        self.width
    }

    /// Get height for which the image will be encoded in
    pub const fn get_height(&self) -> usize {
        self.height
    }

    /// Get the colorspace for which the image will be encoded in
    pub const fn get_colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Get the compression effort, between 0 and 9
    pub const fn get_effort(&self) -> u8 {
        self.effort
    }

    /// Set width for the image to be encoded
    #[must_use]
    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set height for the image to be encoded
    #[must_use]
    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set colorspace for the image to be encoded
    #[must_use]
    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    /// Set compression effort
    ///
    /// Higher values spend more time making the file smaller,
    /// values above 9 are clamped
    #[must_use]
    pub fn set_effort(mut self, effort: u8) -> Self {
        self.effort = effort.min(9);
        self
    }
}

/// PNG options
impl EncoderOptions {
    pub const fn png_get_row_filter(&self) -> RowFilter {
        self.row_filter
    }

    /// Set the scanline filter used by the png encoder
    #[must_use]
    pub fn png_set_row_filter(mut self, filter: RowFilter) -> Self {
        self.row_filter = filter;
        self
    }
}
