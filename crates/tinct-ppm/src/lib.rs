/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A decoder and encoder for the six netpbm portable map formats
//!
//! | Version | Contents  | Encoding |
//! |---------|-----------|----------|
//! | P1      | bi-level  | ASCII    |
//! | P2      | greyscale | ASCII    |
//! | P3      | RGB       | ASCII    |
//! | P4      | bi-level  | binary   |
//! | P5      | greyscale | binary   |
//! | P6      | RGB       | binary   |
//!
//! Samples with a maximum value above 255 are read as 16 bit big endian
//! values, the encoder always writes 8 bit samples.
//!
//! # Example
//! ```
//! use tinct_ppm::{PnmDecoder, PnmEncoder, PnmVersions};
//!
//! let pixels = [0, 255, 255, 0];
//! let mut encoded = vec![];
//! PnmEncoder::new(PnmVersions::P5, 2, 2)
//!     .encode(&pixels, &mut encoded)
//!     .unwrap();
//!
//! let mut decoder = PnmDecoder::new(&encoded);
//! let samples = decoder.decode().unwrap();
//! assert_eq!(samples.len(), 4);
//! ```
pub use decoder::{PnmDecodeErrors, PnmDecoder, PnmSamples};
pub use encoder::{PnmEncodeErrors, PnmEncoder};
pub use tinct_core;
pub use versions::PnmVersions;

mod decoder;
mod encoder;
mod versions;
