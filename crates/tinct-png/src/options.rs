/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};

use crate::error::PngDecodeErrors;

/// Function called for every chunk the decoder does not interpret
///
/// Receives the chunk type, its data and the stored crc.
pub type UnknownChunkHandler =
    fn(chunk_type: [u8; 4], data: &[u8], crc: u32) -> Result<(), PngDecodeErrors>;

/// Skip the chunk with a warning
///
/// Unknown chunks are never fatal, including ones whose name marks
/// them as critical.
pub fn default_chunk_handler(
    chunk_type: [u8; 4], data: &[u8], _crc: u32
) -> Result<(), PngDecodeErrors> {
    let chunk_name = std::str::from_utf8(&chunk_type).unwrap_or("XXXX");

    if chunk_type[0] & (1 << 5) == 0 {
        warn!("Skipping unknown critical chunk {chunk_name}");
    } else {
        warn!("Skipping unknown chunk {chunk_name}");
    }
    trace!("Length of chunk {}", data.len());

    Ok(())
}
