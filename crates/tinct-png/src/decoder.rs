/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{info, trace, warn};
use tinct_core::bytestream::ByteReader;
use tinct_core::colorspace::ColorSpace;
use tinct_core::gamma::Gamma;
use tinct_core::options::DecoderOptions;
use zune_inflate::DeflateOptions;

use crate::constants::PNG_SIGNATURE;
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::defilter_scanline;
use crate::options::{default_chunk_handler, UnknownChunkHandler};

#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4],
    pub crc:        u32
}

/// Image information read from the headers
#[derive(Default, Debug, Copy, Clone)]
pub struct PngInfo {
    pub width:            usize,
    pub height:           usize,
    pub depth:            u8,
    pub color:            PngColor,
    pub component:        usize,
    pub interlace_method: InterlaceMethod,
    pub gamma:            Gamma
}

/// A PNG decoder instance
///
/// Only non-interlaced 8 bit images are decoded, all colour types
/// are supported.
pub struct PngDecoder<'a> {
    pub(crate) seen_hdr:      bool,
    pub(crate) seen_headers:  bool,
    pub(crate) seen_iend:     bool,
    pub(crate) stream:        ByteReader<'a>,
    pub(crate) options:       DecoderOptions,
    pub(crate) png_info:      PngInfo,
    pub(crate) palette:       Vec<[u8; 3]>,
    pub(crate) idat_chunks:   Vec<u8>,
    pub(crate) chunk_handler: UnknownChunkHandler
}

impl<'a> PngDecoder<'a> {
    /// Create a new decoder with default options
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder::new_with_options(data, DecoderOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            seen_hdr: false,
            seen_headers: false,
            seen_iend: false,
            stream: ByteReader::new(data),
            options,
            png_info: PngInfo::default(),
            palette: Vec::new(),
            idat_chunks: Vec::new(),
            chunk_handler: default_chunk_handler
        }
    }

    /// Replace the function called for chunks the decoder
    /// does not interpret
    pub fn set_chunk_handler(&mut self, handler: UnknownChunkHandler) {
        self.chunk_handler = handler;
    }

    /// Return image dimensions or none if headers
    /// aren't decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }
        Some((self.png_info.width, self.png_info.height))
    }

    /// Return the layout of samples returned by [`decode_raw`](Self::decode_raw)
    /// or none if headers aren't decoded
    pub const fn get_colorspace(&self) -> Option<ColorSpace> {
        if !self.seen_hdr {
            return None;
        }
        Some(self.png_info.color.output_colorspace())
    }

    /// Return the gamma recorded by a gAMA chunk
    ///
    /// Chunks after the image data are only seen once
    /// decoding finishes.
    pub const fn get_gamma(&self) -> Gamma {
        self.png_info.gamma
    }

    /// Return image information or none if headers aren't decoded
    pub const fn get_info(&self) -> Option<&PngInfo> {
        if !self.seen_hdr {
            return None;
        }
        Some(&self.png_info)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] -  crc chunk
        let chunk_length = self
            .stream
            .get_u32_be_err()
            .map_err(|_| PngDecodeErrors::CorruptData("No more chunks, missing IEND".into()))?
            as usize;
        let chunk = self
            .stream
            .get_u32_be_err()
            .map_err(|_| PngDecodeErrors::CorruptData("Truncated chunk header".into()))?
            .to_be_bytes();

        let chunk_type = PngChunkType::from_bytes(&chunk);

        if !self.stream.has(chunk_length + 4 /*crc stream*/) {
            let err = format!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                std::str::from_utf8(&chunk).unwrap_or("XXXX"),
                chunk_length + 4,
                self.stream.remaining()
            );

            return Err(PngDecodeErrors::CorruptData(err));
        }
        let crc_bytes = self
            .stream
            .peek_at(chunk_length, 4)
            .map_err(|_| PngDecodeErrors::CorruptData("Truncated crc".into()))?;

        let crc = u32::from_be_bytes([crc_bytes[0], crc_bytes[1], crc_bytes[2], crc_bytes[3]]);

        // Confirm the CRC here.
        #[cfg(feature = "crc")]
        {
            if self.options.png_get_confirm_crc() {
                use crate::crc::calc_crc_with_bytes;

                let data = self
                    .stream
                    .peek_at(0, chunk_length)
                    .map_err(|_| PngDecodeErrors::CorruptData("Truncated chunk".into()))?;

                // crc covers chunk type + chunk data
                let calc_crc = !calc_crc_with_bytes(data, calc_crc_with_bytes(&chunk, u32::MAX));

                if crc != calc_crc {
                    return Err(PngDecodeErrors::BadCrc(crc, calc_crc));
                }
            }
        }

        trace!(
            "Chunk {}, length {chunk_length}",
            std::str::from_utf8(&chunk).unwrap_or("XXXX")
        );

        Ok(PngChunk {
            length: chunk_length,
            chunk,
            chunk_type,
            crc
        })
    }

    /// Read the signature and all chunks up to the first IDAT chunk
    ///
    /// After this, image information can be queried
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_headers {
            return Ok(());
        }
        // READ PNG signature
        let signature = self
            .stream
            .get_u64_be_err()
            .map_err(|_| PngDecodeErrors::BadSignature)?;

        if signature != PNG_SIGNATURE {
            return Err(PngDecodeErrors::BadSignature);
        }

        // check if first chunk is ihdr here
        if self.stream.peek_at(4, 4).ok() != Some(b"IHDR".as_slice()) {
            return Err(PngDecodeErrors::GenericStatic(
                "First chunk not IHDR, Corrupt PNG"
            ));
        }
        loop {
            // stop at the first IDAT, decode_raw picks up from there
            if self.seen_hdr && self.stream.peek_at(4, 4).ok() == Some(b"IDAT".as_slice()) {
                break;
            }
            self.read_chunk()?;

            if self.seen_iend {
                break;
            }
        }
        self.seen_headers = true;

        Ok(())
    }

    /// Read, check and interpret a single chunk
    fn read_chunk(&mut self) -> Result<(), PngDecodeErrors> {
        let header = self.read_chunk_header()?;

        let data = self
            .stream
            .get_as_ref(header.length)
            .map_err(|_| PngDecodeErrors::CorruptData("Truncated chunk".into()))?;
        // skip crc
        self.stream.skip(4);

        match header.chunk_type {
            PngChunkType::IHDR => self.parse_ihdr(header, data)?,
            PngChunkType::PLTE => self.parse_plte(header, data)?,
            PngChunkType::IDAT => self.parse_idat(header, data)?,
            PngChunkType::gAMA => self.parse_gama(header, data)?,
            PngChunkType::IEND => self.seen_iend = true,
            PngChunkType::unkn => (self.chunk_handler)(header.chunk, data, header.crc)?
        }
        Ok(())
    }

    /// Decode PNG encoded images and return the vector of raw
    /// pixels
    ///
    /// Samples are laid out as given by [`get_colorspace`](Self::get_colorspace),
    /// palette entries are expanded to RGB.
    ///
    /// # Errors
    /// Any malformed, corrupt or unsupported input
    pub fn decode_raw(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        self.decode_headers()?;

        while !self.seen_iend {
            self.read_chunk()?;
        }

        if self.stream.remaining() > 0 {
            warn!("{} bytes of trailing data after IEND", self.stream.remaining());
        }
        if self.idat_chunks.is_empty() {
            return Err(PngDecodeErrors::CorruptData("No IDAT chunks".into()));
        }
        if self.png_info.color == PngColor::Palette && self.palette.is_empty() {
            return Err(PngDecodeErrors::EmptyPalette);
        }
        // go parse IDAT chunks returning the inflate
        let deflate_data = self.inflate()?;
        // remove idat chunks from memory
        // we are already done with them.
        self.idat_chunks = Vec::new();

        let out = self.create_png_image_raw(&deflate_data)?;

        if self.png_info.color == PngColor::Palette {
            return self.expand_palette(&out);
        }
        Ok(out)
    }

    /// Create the png data from post deflated data
    fn create_png_image_raw(&self, deflate_data: &[u8]) -> Result<Vec<u8>, PngDecodeErrors> {
        let info = &self.png_info;
        let components = info.component;

        // bytes per scanline, without the filter byte
        let width_stride = info.width * components;
        let image_len = width_stride * info.height;

        if deflate_data.len() < image_len + info.height {
            let msg = format!(
                "Not enough pixels, expected {} but found {}",
                image_len + info.height,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::CorruptData(msg));
        }
        let mut out = vec![0_u8; image_len];

        // each chunk is a width stride of unfiltered data
        let chunks = deflate_data.chunks_exact(width_stride + 1);

        for (i, in_stride) in chunks.take(info.height).enumerate() {
            // Split output into current and previous
            // current points to the start of the row where we are writing de-filtered output to
            // prev is all rows we already wrote output to.
            let (prev, current) = out.split_at_mut(i * width_stride);

            let prev_row = if i == 0 {
                None
            } else {
                Some(&prev[(i - 1) * width_stride..])
            };

            // take filter
            let filter_byte = in_stride[0];
            // raw image bytes
            let raw = &in_stride[1..];

            let filter = FilterMethod::from_int(filter_byte).ok_or_else(|| {
                PngDecodeErrors::CorruptData(format!("Unknown filter {filter_byte} in row {i}"))
            })?;

            defilter_scanline(
                filter,
                prev_row,
                raw,
                &mut current[..width_stride],
                components
            );
        }
        Ok(out)
    }

    /// Undo deflate decoding
    fn inflate(&self) -> Result<Vec<u8>, PngDecodeErrors> {
        // deflate doesn't store its uncompressed size,
        // so only hint the decoder
        let size_hint = (self.png_info.width * self.png_info.component + 1) * self.png_info.height;

        let option = DeflateOptions::default()
            .set_size_hint(size_hint)
            .set_limit(self.options.inflate_get_limit())
            .set_confirm_checksum(self.options.inflate_get_confirm_adler());

        let mut decoder = zune_inflate::DeflateDecoder::new_with_options(&self.idat_chunks, option);

        Ok(decoder.decode_zlib()?)
    }

    /// Expand a palettized image to RGB
    fn expand_palette(&self, data: &[u8]) -> Result<Vec<u8>, PngDecodeErrors> {
        let mut out = vec![0; data.len() * 3];

        for (px, entry) in out.chunks_exact_mut(3).zip(data) {
            let entry = self.palette.get(usize::from(*entry)).ok_or_else(|| {
                PngDecodeErrors::CorruptData(format!(
                    "Palette index {entry} out of range for a palette of {} entries",
                    self.palette.len()
                ))
            })?;

            px.copy_from_slice(entry);
        }
        Ok(out)
    }

    pub(crate) fn log_header_info(&self) {
        info!("Width: {}", self.png_info.width);
        info!("Height: {}", self.png_info.height);
        info!("Color type: {:?}", self.png_info.color);
        info!("Depth: {:?}", self.png_info.depth);
        info!("Interlace :{:?}", self.png_info.interlace_method);
    }
}
