/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use tinct_core::bytestream::ByteWriter;

use crate::crc::{calc_crc, calc_crc_with_bytes};
use crate::decoder::PngChunk;
use crate::encoder::PngEncoder;
use crate::enums::PngColor;

type ChunkSink<'a> = ByteWriter<&'a mut Vec<u8>>;

pub(crate) fn write_ihdr(ctx: &PngEncoder, output: &mut ChunkSink) -> std::io::Result<()> {
    output.write_u32_be(ctx.options.get_width() as u32)?;
    output.write_u32_be(ctx.options.get_height() as u32)?;
    // depth, always 8
    output.write_u8(8)?;
    output.write_u8(PngColor::from_colorspace(ctx.options.get_colorspace()).to_int())?;
    // compression method
    output.write_u8(0)?;
    // filter method
    output.write_u8(0)?;
    // interlace method, always standard
    output.write_u8(0)
}

pub(crate) fn write_gamma(ctx: &PngEncoder, writer: &mut ChunkSink) -> std::io::Result<()> {
    match ctx.gamma.to_png_value() {
        Some(value) => writer.write_u32_be(value),
        None => Ok(())
    }
}

// iend has no data
pub(crate) fn write_iend(_: &PngEncoder, _: &mut ChunkSink) -> std::io::Result<()> {
    Ok(())
}

/// Write the length, type, data and crc of a chunk whose
/// contents are produced by `func`
///
/// The length is only known after the data is written, so the chunk
/// is assembled in a temporary buffer first.
pub(crate) fn write_header_fn<W, F>(
    v: &PngEncoder, writer: &mut ByteWriter<W>, name: &[u8; 4], func: F
) -> std::io::Result<()>
where
    W: Write,
    F: Fn(&PngEncoder, &mut ChunkSink) -> std::io::Result<()>
{
    // length - chunk type - [data] -  crc chunk
    let mut temp_space = Vec::with_capacity(32);
    // space for length
    temp_space.extend_from_slice(&[0; 4]);

    let mut local_writer = ByteWriter::new(&mut temp_space);
    local_writer.write_all(name)?;
    (func)(v, &mut local_writer)?;

    let bytes_written = local_writer.bytes_written();
    // length excludes the chunk name
    temp_space[0..4].copy_from_slice(&(bytes_written as u32 - 4).to_be_bytes());
    // crc covers type and data, not the length
    let crc = calc_crc(&temp_space[4..]);
    temp_space.extend_from_slice(&crc.to_be_bytes());

    writer.write_all(&temp_space)
}

pub(crate) fn write_chunk<W: Write>(
    chunk: PngChunk, data: &[u8], writer: &mut ByteWriter<W>
) -> std::io::Result<()> {
    writer.write_u32_be(chunk.length as u32)?;
    writer.write_all(&chunk.chunk)?;
    writer.write_all(data)?;
    // same as crc(chunk name + data)
    let crc = calc_crc_with_bytes(&chunk.chunk, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);

    writer.write_u32_be(crc)
}
