/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and Encoder Options
//!
//! This module exposes structs through which decoders and encoders
//! get shared options.
//!
//! All supported options are put into one struct per direction so that the
//! same options can be handed to every codec.
pub use decoder::DecoderOptions;
pub use encoder::{EncoderOptions, RowFilter};

mod decoder;
mod encoder;
