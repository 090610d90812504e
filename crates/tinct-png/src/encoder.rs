/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::trace;
use tinct_core::bytestream::ByteWriter;
use tinct_core::gamma::Gamma;
use tinct_core::options::EncoderOptions;

use crate::constants::{IDAT_CHUNK_SIZE, PNG_SIGNATURE};
use crate::decoder::PngChunk;
use crate::enums::{FilterMethod, PngChunkType};
use crate::error::PngEncodeErrors;
use crate::filters::{choose_compression_filter, filter_scanline};
use crate::headers::writers::{write_chunk, write_gamma, write_header_fn, write_iend, write_ihdr};

/// A PNG encoder
///
/// Writes 8 bit, non-interlaced images in any of the
/// colour types [`EncoderOptions`] can describe.
pub struct PngEncoder<'a> {
    pub(crate) options:        EncoderOptions,
    pub(crate) data:           &'a [u8],
    pub(crate) encoded_chunks: Vec<u8>,
    pub(crate) gamma:          Gamma
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder for interleaved 8 bit samples laid out
    /// as the options' colorspace says
    pub fn new(data: &'a [u8], options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder {
            options,
            data,
            encoded_chunks: Vec::new(),
            gamma: Gamma::Unspecified
        }
    }

    /// Record a gamma to be written in a gAMA chunk
    ///
    /// [`Gamma::Unspecified`] writes no chunk
    pub fn set_gamma(&mut self, gamma: Gamma) {
        self.gamma = gamma;
    }

    fn encode_headers<W: Write>(&self, writer: &mut ByteWriter<W>) -> std::io::Result<()> {
        writer.write_u64_be(PNG_SIGNATURE)?;

        write_header_fn(self, writer, b"IHDR", write_ihdr)?;

        if self.gamma.is_specified() {
            write_header_fn(self, writer, b"gAMA", write_gamma)?;
        }
        Ok(())
    }

    /// Encode the image, writing it to `sink`
    ///
    /// Returns the number of bytes written
    ///
    /// # Errors
    /// - Zero dimensions
    /// - Data whose length is not `width * height * components`
    /// - A gamma exponent the gAMA chunk cannot hold
    /// - Errors from the sink
    pub fn encode<W: Write>(&mut self, sink: W) -> Result<usize, PngEncodeErrors> {
        let (width, height) = (self.options.get_width(), self.options.get_height());

        if width == 0 || height == 0 {
            return Err(PngEncodeErrors::Static("Width or height cannot be zero"));
        }
        if width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(PngEncodeErrors::Static("Dimensions do not fit in a PNG header"));
        }
        let expected_data_size = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(self.options.get_colorspace().num_components()))
            .ok_or(PngEncodeErrors::Static("Overflow calculating image size"))?;

        if self.data.len() != expected_data_size {
            return Err(PngEncodeErrors::WrongDataSize(
                self.data.len(),
                expected_data_size
            ));
        }
        if self.gamma.is_specified() && self.gamma.to_png_value().is_none() {
            return Err(PngEncodeErrors::Static("Gamma cannot be stored in a gAMA chunk"));
        }
        let mut writer = ByteWriter::new(sink);

        self.encode_headers(&mut writer)?;

        self.add_filters()?;

        self.write_idat_chunks(&mut writer)?;

        write_header_fn(self, &mut writer, b"IEND", write_iend)?;

        writer.flush()?;

        Ok(writer.bytes_written())
    }

    const fn calculate_scanline_size(&self) -> usize {
        self.options.get_width() * self.options.get_colorspace().num_components()
    }

    /// Filter every scanline and compress the result
    fn add_filters(&mut self) -> std::io::Result<()> {
        let scanline_size = self.calculate_scanline_size();
        let components = self.options.get_colorspace().num_components();
        let fixed_filter = FilterMethod::from_row_filter(self.options.png_get_row_filter());

        let mut filtered = vec![0; (scanline_size + 1) * self.options.get_height()];
        let mut scratch = Vec::new();

        // one row above the current processing row
        let mut previous_scanline: &[u8] = &[];

        for (i, filter_s) in filtered
            .chunks_exact_mut(scanline_size + 1)
            .take(self.options.get_height())
            .enumerate()
        {
            let (previous, current) = self.data.split_at(i * scanline_size);

            if i > 0 {
                previous_scanline = &previous[(i - 1) * scanline_size..];
            }
            let current_scanline = &current[0..scanline_size];

            let filter = match fixed_filter {
                Some(filter) => filter,
                None => choose_compression_filter(
                    previous_scanline,
                    current_scanline,
                    components,
                    &mut scratch
                )
            };
            filter_scanline(
                current_scanline,
                previous_scanline,
                filter_s,
                filter,
                components
            );
        }
        let effort = u32::from(self.options.get_effort());

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(effort));
        encoder.write_all(&filtered)?;
        self.encoded_chunks = encoder.finish()?;

        trace!(
            "Compressed {} filtered bytes to {}",
            filtered.len(),
            self.encoded_chunks.len()
        );
        Ok(())
    }

    fn write_idat_chunks<W: Write>(&self, writer: &mut ByteWriter<W>) -> std::io::Result<()> {
        for chunk in self.encoded_chunks.chunks(IDAT_CHUNK_SIZE) {
            let chunk_type = PngChunk {
                length:     chunk.len(),
                chunk_type: PngChunkType::IDAT,
                chunk:      *b"IDAT",
                crc:        0
            };
            write_chunk(chunk_type, chunk, writer)?;
        }
        Ok(())
    }
}
