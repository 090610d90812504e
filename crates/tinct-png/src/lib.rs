/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder and encoder
//!
//! This features a small PNG reader and writer which supports non-interlaced
//! 8 bit images of every colour type.
//!
//! # Features
//! - CRC-32 confirmation of every chunk (can be turned off)
//! - Inflate via `zune-inflate`, deflate via `flate2`
//! - All five scanline filters on encode, including adaptive selection
//!
//! # Usage
//!
//! #### Decode to raw bytes.
//!
//! This returns interleaved 8 bit samples laid out as
//! described by [`PngDecoder::get_colorspace`], palette images are expanded
//! to RGB.
//!
//!```no_run
//! use tinct_png::PngDecoder;
//! let mut decoder = PngDecoder::new(&[]);
//!
//! let pixels = decoder.decode_raw();
//! ```
//!
//! #### Encode
//!
//! ```
//! use tinct_core::colorspace::ColorSpace;
//! use tinct_core::options::EncoderOptions;
//! use tinct_png::PngEncoder;
//!
//! let pixels = [0_u8; 4 * 4 * 3];
//! let options = EncoderOptions::new(4, 4, ColorSpace::RGB);
//! let mut sink = vec![];
//!
//! PngEncoder::new(&pixels, options).encode(&mut sink).unwrap();
//! ```
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
#![allow(clippy::op_ref, clippy::identity_op)]

pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::{FilterMethod, InterlaceMethod, PngColor};
pub use options::{default_chunk_handler, UnknownChunkHandler};
pub use tinct_core;

mod constants;
pub mod crc;
mod decoder;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod options;
