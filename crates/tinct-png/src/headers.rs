/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::warn;
use tinct_core::gamma::Gamma;

use crate::decoder::PngChunk;
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

pub(crate) mod writers;

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::GenericStatic("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13 {
            return Err(PngDecodeErrors::GenericStatic("BAD IHDR length"));
        }

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

        if width == 0 || height == 0 {
            return Err(PngDecodeErrors::GenericStatic("Width or height cannot be zero"));
        }

        if width > self.options.get_max_width() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "width",
                self.options.get_max_width(),
                width
            ));
        }

        if height > self.options.get_max_height() {
            return Err(PngDecodeErrors::TooLargeDimensions(
                "height",
                self.options.get_max_height(),
                height
            ));
        }
        self.png_info.width = width;
        self.png_info.height = height;

        let depth = data[8];
        let color = data[9];

        self.png_info.color = PngColor::from_int(color)
            .ok_or_else(|| PngDecodeErrors::Generic(format!("Unknown color value {color}")))?;

        self.png_info.component = self.png_info.color.num_components();

        // verify colors plus bit depths
        match depth {
            8 => self.png_info.depth = depth,
            1 | 2 | 4 | 16 => {
                if depth == 16 && self.png_info.color == PngColor::Palette {
                    return Err(PngDecodeErrors::GenericStatic(
                        "Indexed colour cannot have 16 bit depth"
                    ));
                }
                return Err(PngDecodeErrors::Unsupported(format!(
                    "Bit depth {depth} is not supported, only 8 bit images can be decoded"
                )));
            }
            _ => return Err(PngDecodeErrors::Generic(format!("Unknown bit depth {depth}")))
        }

        if data[10] != 0 {
            return Err(PngDecodeErrors::GenericStatic("Unknown compression method"));
        }

        let filter_method = data[11];

        if filter_method != 0 {
            return Err(PngDecodeErrors::Generic(format!(
                "Unknown filter method {filter_method}"
            )));
        }

        let interlace_method = data[12];

        match InterlaceMethod::from_int(interlace_method) {
            Some(InterlaceMethod::Standard) => {
                self.png_info.interlace_method = InterlaceMethod::Standard;
            }
            Some(InterlaceMethod::Adam7) => {
                return Err(PngDecodeErrors::Unsupported(
                    "Adam7 interlaced images are not supported".into()
                ));
            }
            None => {
                return Err(PngDecodeErrors::Generic(format!(
                    "Unknown interlace method {interlace_method}"
                )));
            }
        }

        self.log_header_info();

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_plte(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if chunk.length % 3 != 0 {
            return Err(PngDecodeErrors::GenericStatic("Invalid PLTE length, corrupt PNG"));
        }
        if chunk.length > 256 * 3 {
            return Err(PngDecodeErrors::Generic(format!(
                "PLTE chunk with too many entries, {}",
                chunk.length / 3
            )));
        }

        self.palette = data
            .chunks_exact(3)
            .map(|entry| [entry[0], entry[1], entry[2]])
            .collect();

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, _: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        // push the chunk and decompress all of them later as a single stream
        self.idat_chunks.extend_from_slice(data);

        Ok(())
    }

    pub(crate) fn parse_gama(&mut self, chunk: PngChunk, data: &[u8]) -> Result<(), PngDecodeErrors> {
        if chunk.length != 4 {
            let error = format!("Gama chunk length is not 4 but {}", chunk.length);
            return Err(PngDecodeErrors::Generic(error));
        }

        let value = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);

        if value == 0 {
            warn!("Gamma value of 0 is invalid, ignoring it");
        }
        self.png_info.gamma = Gamma::from_png_value(value);

        Ok(())
    }
}
