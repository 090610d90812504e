/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use log::{info, warn};
use tinct_core::bytestream::ByteReader;
use tinct_core::colorspace::ColorSpace;
use tinct_core::options::DecoderOptions;

use crate::PnmVersions;

/// Errors possible when decoding portable maps
pub enum PnmDecodeErrors {
    /// The stream does not start with a `P` followed by a digit
    InvalidMagic(String),
    /// A digit other than one to six follows the `P`
    UnsupportedVersion(u8),
    /// A header or sample token is malformed
    InvalidHeader(String),
    /// Dimension name, configured maximum and found value
    LargeDimensions(&'static str, usize, usize),
    /// A sample is larger than the declared maximum value
    SampleOutOfRange(usize, u16),
    /// The stream ends before all pixels are read
    Truncated(String),
    /// Bytes left after the last pixel, only an error in strict mode
    TrailingData(usize)
}

impl Debug for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMagic(val) => writeln!(f, "Invalid magic bytes, {val}"),
            Self::UnsupportedVersion(version) => writeln!(
                f,
                "Unsupported portable map version P{}, supported versions are P1 to P6",
                *version as char
            ),
            Self::InvalidHeader(val) => writeln!(f, "Invalid header, reason: {val}"),
            Self::LargeDimensions(name, expected, found) => writeln!(
                f,
                "Too large {name}, expected a value less than {expected} but found {found}"
            ),
            Self::SampleOutOfRange(sample, max) => {
                writeln!(f, "Sample {sample} is greater than the maximum value {max}")
            }
            Self::Truncated(val) => writeln!(f, "Truncated data, {val}"),
            Self::TrailingData(len) => writeln!(f, "{len} bytes of trailing data after pixels")
        }
    }
}

impl Display for PnmDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmDecodeErrors {}

/// Decoded samples
///
/// Samples are interleaved, one per channel. Bi-level images decode
/// to one sample per pixel where `1` is white and `0` black.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PnmSamples {
    U8(Vec<u8>),
    U16(Vec<u16>)
}

impl PnmSamples {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(data) => data.len(),
            Self::U16(data) => data.len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the sample at `index` widened to 16 bits
    pub fn get(&self, index: usize) -> Option<u16> {
        match self {
            Self::U8(data) => data.get(index).map(|x| u16::from(*x)),
            Self::U16(data) => data.get(index).copied()
        }
    }

    /// Iterate over all samples widened to 16 bits
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}

/// A portable map decoder
///
/// Decodes all six variants, samples wider than 8 bits are
/// returned as [`PnmSamples::U16`]
pub struct PnmDecoder<'a> {
    width:           usize,
    height:          usize,
    max_value:       u16,
    version:         PnmVersions,
    decoded_headers: bool,
    reader:          ByteReader<'a>,
    options:         DecoderOptions
}

impl<'a> PnmDecoder<'a> {
    /// Create a new decoder with default options
    ///
    /// # Example
    /// ```
    /// use tinct_ppm::PnmDecoder;
    /// let mut decoder = PnmDecoder::new(b"NOT VALID PPM");
    ///
    /// assert!(decoder.decode().is_err());
    /// ```
    pub fn new(data: &'a [u8]) -> PnmDecoder<'a> {
        PnmDecoder::new_with_options(DecoderOptions::default(), data)
    }

    /// Create a new decoder with the specified options
    pub fn new_with_options(options: DecoderOptions, data: &'a [u8]) -> PnmDecoder<'a> {
        PnmDecoder {
            width: 0,
            height: 0,
            max_value: 1,
            version: PnmVersions::P6,
            decoded_headers: false,
            reader: ByteReader::new(data),
            options
        }
    }

    /// Read the magic bytes, dimensions and maximum value
    pub fn decode_headers(&mut self) -> Result<(), PnmDecodeErrors> {
        if self.decoded_headers {
            return Ok(());
        }
        let p = self
            .reader
            .get_u8_err()
            .map_err(|_| PnmDecodeErrors::InvalidMagic("empty stream".into()))?;

        if p != b'P' {
            let msg = format!("expected P as first byte but got {p:#04x}");
            return Err(PnmDecodeErrors::InvalidMagic(msg));
        }
        let digit = self
            .reader
            .get_u8_err()
            .map_err(|_| PnmDecodeErrors::InvalidMagic("no version after P".into()))?;

        if !digit.is_ascii_digit() {
            let msg = format!("expected a digit after P but got {digit:#04x}");
            return Err(PnmDecodeErrors::InvalidMagic(msg));
        }
        self.version = PnmVersions::from_digit(digit).ok_or(PnmDecodeErrors::UnsupportedVersion(digit))?;

        self.width = self.read_header_integer("width")?;
        self.height = self.read_header_integer("height")?;

        if self.width == 0 || self.height == 0 {
            return Err(PnmDecodeErrors::InvalidHeader(format!(
                "zero dimensions {}x{}",
                self.width, self.height
            )));
        }
        if self.width > self.options.get_max_width() {
            return Err(PnmDecodeErrors::LargeDimensions(
                "width",
                self.options.get_max_width(),
                self.width
            ));
        }
        if self.height > self.options.get_max_height() {
            return Err(PnmDecodeErrors::LargeDimensions(
                "height",
                self.options.get_max_height(),
                self.height
            ));
        }

        if self.version.is_bilevel() {
            self.max_value = 1;
        } else {
            let max_value = self.read_header_integer("maximum value")?;

            if max_value == 0 || max_value > usize::from(u16::MAX) {
                let msg = format!("maximum value {max_value} is not between 1 and 65535");
                return Err(PnmDecodeErrors::InvalidHeader(msg));
            }
            self.max_value = max_value as u16;
        }

        if !self.version.is_ascii() {
            // a single whitespace separates the header from the raster
            match self.reader.get_u8_err() {
                Ok(byte) if byte.is_ascii_whitespace() => (),
                Ok(byte) => {
                    let msg = format!("expected whitespace after header but got {byte:#04x}");
                    return Err(PnmDecodeErrors::InvalidHeader(msg));
                }
                Err(_) => return Err(PnmDecodeErrors::Truncated("no pixel data".into()))
            }
        }

        info!("Version: {}", self.version);
        info!("Width: {}, height: {}", self.width, self.height);
        info!("Maximum value: {}", self.max_value);

        self.decoded_headers = true;

        Ok(())
    }

    /// Skip whitespace and comments, then read a decimal integer
    /// terminated by whitespace, a comment or the end of the stream
    fn read_header_integer(&mut self, name: &str) -> Result<usize, PnmDecodeErrors> {
        skip_spaces(&mut self.reader);

        if self.reader.eof() {
            return Err(PnmDecodeErrors::Truncated(format!("no {name} in header")));
        }
        read_integer(&mut self.reader).map_err(|err| {
            PnmDecodeErrors::InvalidHeader(format!("could not read {name}, {err}"))
        })
    }

    /// Return image dimensions or none if headers
    /// are not decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            Some((self.width, self.height))
        } else {
            None
        }
    }

    /// Return the version read from the magic bytes or
    /// none if headers are not decoded
    pub const fn get_version(&self) -> Option<PnmVersions> {
        if self.decoded_headers {
            Some(self.version)
        } else {
            None
        }
    }

    /// Return the largest sample value, `1` for bi-level images
    pub const fn get_max_value(&self) -> Option<u16> {
        if self.decoded_headers {
            Some(self.max_value)
        } else {
            None
        }
    }

    pub const fn get_colorspace(&self) -> Option<ColorSpace> {
        if self.decoded_headers {
            Some(self.version.colorspace())
        } else {
            None
        }
    }

    /// Decode the image, returning interleaved samples
    ///
    /// # Errors
    /// Malformed headers or samples, truncated data and, in strict mode,
    /// trailing bytes
    pub fn decode(&mut self) -> Result<PnmSamples, PnmDecodeErrors> {
        self.decode_headers()?;

        let size = self.width * self.height * self.version.num_components();

        let samples = match self.version {
            PnmVersions::P1 => PnmSamples::U8(self.decode_plain_bilevel(size)?),
            PnmVersions::P4 => PnmSamples::U8(self.decode_packed_bilevel()?),
            PnmVersions::P2 | PnmVersions::P3 => self.decode_plain(size)?,
            PnmVersions::P5 | PnmVersions::P6 => self.decode_binary(size)?
        };

        if self.version.is_ascii() {
            skip_spaces(&mut self.reader);
        }
        let remaining = self.reader.remaining();

        if remaining > 0 {
            if self.options.pnm_get_reject_trailing() {
                return Err(PnmDecodeErrors::TrailingData(remaining));
            }
            warn!("{remaining} bytes of trailing data after pixels");
        }

        Ok(samples)
    }

    /// Fail before allocating when the input cannot hold `needed` more bytes
    fn ensure_available(&self, needed: usize, unit: &str) -> Result<(), PnmDecodeErrors> {
        let remaining = self.reader.remaining();

        if remaining < needed {
            let msg = format!("expected at least {needed} {unit} but only {remaining} bytes remain");
            return Err(PnmDecodeErrors::Truncated(msg));
        }
        Ok(())
    }

    fn decode_plain_bilevel(&mut self, size: usize) -> Result<Vec<u8>, PnmDecodeErrors> {
        // every pixel takes at least one digit
        self.ensure_available(size, "pixels")?;
        let mut data = vec![0; size];

        for (i, pixel) in data.iter_mut().enumerate() {
            skip_spaces(&mut self.reader);
            // digits need not be separated
            *pixel = match self.reader.get_u8_err() {
                Ok(b'0') => 1,
                Ok(b'1') => 0,
                Ok(byte) => {
                    let msg = format!("expected 0 or 1 for pixel {i} but got {byte:#04x}");
                    return Err(PnmDecodeErrors::InvalidHeader(msg));
                }
                Err(_) => {
                    let msg = format!("expected {size} pixels but found {i}");
                    return Err(PnmDecodeErrors::Truncated(msg));
                }
            };
        }
        Ok(data)
    }

    fn decode_packed_bilevel(&mut self) -> Result<Vec<u8>, PnmDecodeErrors> {
        let stride = self.width.div_ceil(8);
        self.ensure_available(stride * self.height, "bytes of packed rows")?;
        let mut data = vec![0; self.width * self.height];

        for (i, row) in data.chunks_exact_mut(self.width).enumerate() {
            let packed = self.reader.get_as_ref(stride).map_err(|_| {
                PnmDecodeErrors::Truncated(format!("expected {} rows but found {i}", self.height))
            })?;

            for (x, pixel) in row.iter_mut().enumerate() {
                let bit = (packed[x / 8] >> (7 - (x % 8))) & 1;
                // set bits are black
                *pixel = bit ^ 1;
            }
        }
        Ok(data)
    }

    fn decode_plain(&mut self, size: usize) -> Result<PnmSamples, PnmDecodeErrors> {
        self.ensure_available(size, "samples")?;
        let mut data = vec![0_u16; size];

        for (i, sample) in data.iter_mut().enumerate() {
            skip_spaces(&mut self.reader);

            if self.reader.eof() {
                let msg = format!("expected {size} samples but found {i}");
                return Err(PnmDecodeErrors::Truncated(msg));
            }
            let value = read_integer(&mut self.reader).map_err(|err| {
                PnmDecodeErrors::InvalidHeader(format!("could not read sample {i}, {err}"))
            })?;

            if value > usize::from(self.max_value) {
                return Err(PnmDecodeErrors::SampleOutOfRange(value, self.max_value));
            }
            *sample = value as u16;
        }

        if self.max_value <= 255 {
            return Ok(PnmSamples::U8(data.iter().map(|x| *x as u8).collect()));
        }
        Ok(PnmSamples::U16(data))
    }

    fn decode_binary(&mut self, size: usize) -> Result<PnmSamples, PnmDecodeErrors> {
        let wide = self.max_value > 255;
        let bytes = if wide { size * 2 } else { size };

        let raster = self.reader.get_as_ref(bytes).map_err(|_| {
            let msg = format!(
                "expected {bytes} bytes of pixels but found {}",
                self.reader.remaining()
            );
            PnmDecodeErrors::Truncated(msg)
        })?;

        if wide {
            // netpbm stores wide samples big endian
            let data = raster
                .chunks_exact(2)
                .map(|x| u16::from_be_bytes([x[0], x[1]]))
                .collect();
            return Ok(PnmSamples::U16(data));
        }
        Ok(PnmSamples::U8(raster.to_vec()))
    }
}

/// Skip all whitespace characters and comments
/// until one hits a character that isn't a space or
/// we reach eof
fn skip_spaces(byte_stream: &mut ByteReader) {
    while let Some(byte) = byte_stream.peek_u8() {
        if byte == b'#' {
            // comments run to the end of the line
            while let Ok(byte) = byte_stream.get_u8_err() {
                if byte == b'\n' || byte == b'\r' {
                    break;
                }
            }
        } else if byte.is_ascii_whitespace() {
            byte_stream.skip(1);
        } else {
            break;
        }
    }
}

/// Read ASCII digits up to whitespace, a comment or the end of the stream
fn read_integer(byte_stream: &mut ByteReader) -> Result<usize, String> {
    let mut value = 0_usize;
    let mut digits = 0;

    while let Some(byte) = byte_stream.peek_u8() {
        if byte.is_ascii_whitespace() || byte == b'#' {
            break;
        }
        if !byte.is_ascii_digit() {
            return Err(format!("unexpected byte {byte:#04x} in number"));
        }
        value = value
            .checked_mul(10)
            .and_then(|x| x.checked_add(usize::from(byte - b'0')))
            .ok_or_else(|| String::from("number too large"))?;

        digits += 1;
        byte_stream.skip(1);
    }
    if digits == 0 {
        return Err(String::from("no digits"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use tinct_core::options::DecoderOptions;

    use crate::{PnmDecodeErrors, PnmDecoder, PnmSamples, PnmVersions};

    #[test]
    fn test_comments_between_tokens() {
        let data = b"P2\n# a comment\n2 # width\n1\n# max\n255\n0 255\n";
        let mut decoder = PnmDecoder::new(data);
        let samples = decoder.decode().unwrap();

        assert_eq!(samples, PnmSamples::U8(vec![0, 255]));
        assert_eq!(decoder.get_dimensions(), Some((2, 1)));
        assert_eq!(decoder.get_version(), Some(PnmVersions::P2));
    }

    #[test]
    fn test_plain_bilevel_without_separators() {
        let mut decoder = PnmDecoder::new(b"P1 3 2\n010\n1 0 1");
        let samples = decoder.decode().unwrap();

        assert_eq!(samples, PnmSamples::U8(vec![1, 0, 1, 0, 1, 0]));
        assert_eq!(decoder.get_max_value(), Some(1));
    }

    #[test]
    fn test_packed_rows_are_padded() {
        // 10 pixels per row, two bytes per row
        let data = [b"P4\n10 2\n".as_slice(), &[0b1010_0000, 0b0100_0000, 0, 0b1100_0000]].concat();
        let samples = PnmDecoder::new(&data).decode().unwrap();

        let expected = [0, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0];
        assert_eq!(samples, PnmSamples::U8(expected.to_vec()));
    }

    #[test]
    fn test_sixteen_bit_binary() {
        let data = [b"P5 2 1 65535\n".as_slice(), &[0x12, 0x34, 0xFF, 0xFF]].concat();
        let samples = PnmDecoder::new(&data).decode().unwrap();

        assert_eq!(samples, PnmSamples::U16(vec![0x1234, 0xFFFF]));
    }

    #[test]
    fn test_header_errors() {
        let err = PnmDecoder::new(b"Q6 1 1 255\n").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::InvalidMagic(_)));

        let err = PnmDecoder::new(b"Px 1 1 255\n").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::InvalidMagic(_)));

        let err = PnmDecoder::new(b"P7\nWIDTH 1\n").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::UnsupportedVersion(b'7')));

        let err = PnmDecoder::new(b"P6 1a 1 255\n").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::InvalidHeader(_)));

        let err = PnmDecoder::new(b"P6 0 1 255\n").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::InvalidHeader(_)));
    }

    #[test]
    fn test_truncated_pixels() {
        let err = PnmDecoder::new(b"P6 2 2 255\n\x00\x01").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::Truncated(_)));

        let err = PnmDecoder::new(b"P3 1 1 255\n1 2").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::Truncated(_)));
    }

    #[test]
    fn test_large_header_without_pixels() {
        for header in [
            b"P1\n16384 16384\n".as_slice(),
            b"P2\n16384 16384\n255\n",
            b"P3\n16384 16384\n255\n1 2 3",
            b"P4\n16384 16384\n\x00"
        ] {
            let err = PnmDecoder::new(header).decode().unwrap_err();
            assert!(matches!(err, PnmDecodeErrors::Truncated(_)), "{err:?}");
        }
    }

    #[test]
    fn test_sample_above_max_value() {
        let err = PnmDecoder::new(b"P2 1 1 15\n16").decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::SampleOutOfRange(16, 15)));
    }

    #[test]
    fn test_limits_and_trailing_data() {
        let options = DecoderOptions::default().set_max_height(1);
        let err = PnmDecoder::new_with_options(options, b"P5 1 2 255\n\x00\x00")
            .decode()
            .unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::LargeDimensions("height", 1, 2)));

        let data = b"P5 1 1 255\n\x00junk";
        assert!(PnmDecoder::new(data).decode().is_ok());

        let options = DecoderOptions::default().pnm_set_reject_trailing(true);
        let err = PnmDecoder::new_with_options(options, data).decode().unwrap_err();
        assert!(matches!(err, PnmDecodeErrors::TrailingData(4)));
    }
}
