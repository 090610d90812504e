/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A colour space agnostic pixel store
//!
//! [`PortableBitmap`](bitmap::PortableBitmap) keeps a grid of colour triples in
//! the working space of a [`Converter`](tinct_core::converters::Converter), reads
//! PNM and PNG files into it and writes it back out.
//!
//! # Example
//! ```
//! use tinct_core::converters::Converter;
//! use tinct_core::triple::ColorTriple;
//! use tinct_image::bitmap::PortableBitmap;
//!
//! let mut image = PortableBitmap::new(4, 4, Converter::Rgb).unwrap();
//! image.set_pixel(1, 2, ColorTriple::WHITE).unwrap();
//!
//! image.convert_to(Converter::Hsv).unwrap();
//! assert_eq!(image.get_pixel(1, 2).unwrap().third(), 1.0);
//! ```
pub use tinct_core;

pub mod bitmap;
pub mod codecs;
pub mod errors;
mod serde;
pub mod traits;
