/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for `tinct-image`
//!
//! Every routine takes a [`PortableBitmap`](tinct_image::bitmap::PortableBitmap)
//! by reference and returns a new one, the source is never touched.
//! Each one is also available as a struct implementing
//! [`OperationsTrait`](tinct_image::traits::OperationsTrait) which
//! replaces an image in place.
//!
//! Routines that produce intermediate intensities (blurs, resampling, dithering
//! to more than two levels) keep the image's working space, except for
//! [`BlackAndWhite`](tinct_core::converters::Converter::BlackAndWhite) images
//! which come out as greyscale.
//!
//! # Example
//! - Blur an image and then binarize it
//! ```
//! use tinct_core::converters::Converter;
//! use tinct_core::triple::ColorTriple;
//! use tinct_image::bitmap::PortableBitmap;
//! use tinct_image::traits::OperationsTrait;
//! use tinct_imageprocs::gaussian_blur::GaussianBlur;
//! use tinct_imageprocs::threshold::Otsu;
//!
//! let mut image = PortableBitmap::from_fn(8, 8, Converter::Rgb, |x, _| {
//!     if x < 4 { ColorTriple::BLACK } else { ColorTriple::WHITE }
//! })
//! .unwrap();
//!
//! GaussianBlur::new(0.8).execute(&mut image).unwrap();
//! Otsu::new().execute(&mut image).unwrap();
//!
//! assert_eq!(image.converter(), Converter::BlackAndWhite);
//! assert_eq!(image.get_pixel(0, 0).unwrap(), ColorTriple::BLACK);
//! assert_eq!(image.get_pixel(7, 7).unwrap(), ColorTriple::WHITE);
//! ```
//!
//! # Features
//! - `threads`: Compute rows of the neighbourhood filters and resampling on
//!   scoped threads. Dithering always runs in scan order.
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

pub use tinct_image;

pub mod box_blur;
mod convolve;
pub mod dither;
pub mod gamma;
pub mod gaussian_blur;
pub mod histogram;
pub mod line;
pub mod median;
pub mod resize;
pub mod sharpen;
pub mod sobel;
pub mod threshold;
mod utils;
