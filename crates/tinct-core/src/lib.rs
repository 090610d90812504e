/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all tinct libraries
//!
//! This crate provides the colour primitives and helpers shared
//! by the decoders, encoders and processing routines under the `tinct` umbrella
//!
//! It currently contains
//!
//! - Normalized colour values ([`Coefficient`](coefficient::Coefficient),
//!   [`ColorTriple`](triple::ColorTriple) and [`ColorChannel`](channel::ColorChannel))
//! - Colour space converters between device RGB and a working space
//! - Gamma tags recorded alongside images
//! - A bytestream reader and writer with endian aware reads and writes
//! - Image decoder and encoder options
//!
//! # Features
//!  - `serde`: Enables serializing of some of the data structures
//!     present in the crate
#![warn(clippy::correctness, clippy::perf)]
#![allow(clippy::excessive_precision)]

pub mod bytestream;
pub mod channel;
pub mod coefficient;
pub mod colorspace;
pub mod converters;
pub mod errors;
pub mod gamma;
pub mod options;
pub mod serde;
pub mod triple;
