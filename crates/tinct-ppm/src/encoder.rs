/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};
use std::io::Write;

use tinct_core::bytestream::ByteWriter;

use crate::PnmVersions;

/// Errors possible during encoding
pub enum PnmEncodeErrors {
    Static(&'static str),
    /// Data length, expected length
    WrongDataSize(usize, usize),
    IoErrors(std::io::Error)
}

impl Debug for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(err) => writeln!(f, "{err}"),
            Self::WrongDataSize(found, expected) => writeln!(
                f,
                "Data length {found} does not match expected length {expected}"
            ),
            Self::IoErrors(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for PnmEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PnmEncodeErrors {}

impl From<std::io::Error> for PnmEncodeErrors {
    fn from(err: std::io::Error) -> Self {
        PnmEncodeErrors::IoErrors(err)
    }
}

/// A portable map encoder
///
/// Data is one byte per sample, interleaved. Bi-level versions take one
/// byte per pixel where zero is black and anything else white.
pub struct PnmEncoder {
    version: PnmVersions,
    width:   usize,
    height:  usize
}

impl PnmEncoder {
    pub fn new(version: PnmVersions, width: usize, height: usize) -> PnmEncoder {
        PnmEncoder {
            version,
            width,
            height
        }
    }

    fn write_headers<W: Write>(&self, writer: &mut ByteWriter<W>) -> std::io::Result<()> {
        let header = if self.version.is_bilevel() {
            format!("{}\n{} {}\n", self.version, self.width, self.height)
        } else {
            format!("{}\n{} {}\n255\n", self.version, self.width, self.height)
        };
        writer.write_all(header.as_bytes())
    }

    /// Encode `data`, writing it to `sink`
    ///
    /// Returns the number of bytes written
    pub fn encode<W: Write>(&self, data: &[u8], sink: W) -> Result<usize, PnmEncodeErrors> {
        if self.width == 0 || self.height == 0 {
            return Err(PnmEncodeErrors::Static("Width or height cannot be zero"));
        }
        let row_size = self.width * self.version.num_components();
        let expected = row_size * self.height;

        if data.len() != expected {
            return Err(PnmEncodeErrors::WrongDataSize(data.len(), expected));
        }
        let mut writer = ByteWriter::new(sink);

        self.write_headers(&mut writer)?;

        match self.version {
            PnmVersions::P1 => {
                let bits: Vec<u8> = data.iter().map(|x| u8::from(*x == 0)).collect();
                write_plain(&bits, row_size, &mut writer)?;
            }
            PnmVersions::P2 | PnmVersions::P3 => write_plain(data, row_size, &mut writer)?,
            PnmVersions::P4 => write_packed(data, row_size, &mut writer)?,
            PnmVersions::P5 | PnmVersions::P6 => writer.write_all(data)?
        }
        writer.flush()?;

        Ok(writer.bytes_written())
    }
}

/// Decimal samples, a space between samples and a newline after each row
fn write_plain<W: Write>(
    data: &[u8], row_size: usize, writer: &mut ByteWriter<W>
) -> std::io::Result<()> {
    let mut line = String::with_capacity(row_size * 4);

    for row in data.chunks_exact(row_size) {
        line.clear();

        for (i, sample) in row.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&sample.to_string());
        }
        line.push('\n');
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

/// Pack eight pixels per byte, most significant bit first, set bits black
fn write_packed<W: Write>(
    data: &[u8], row_size: usize, writer: &mut ByteWriter<W>
) -> std::io::Result<()> {
    let mut packed = vec![0_u8; row_size.div_ceil(8)];

    for row in data.chunks_exact(row_size) {
        packed.fill(0);

        for (x, pixel) in row.iter().enumerate() {
            if *pixel == 0 {
                packed[x / 8] |= 1 << (7 - (x % 8));
            }
        }
        writer.write_all(&packed)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{PnmEncoder, PnmVersions};

    fn encode(version: PnmVersions, width: usize, height: usize, data: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        let written = PnmEncoder::new(version, width, height)
            .encode(data, &mut out)
            .unwrap();
        assert_eq!(written, out.len());
        out
    }

    #[test]
    fn test_plain_layout() {
        let out = encode(PnmVersions::P3, 2, 1, &[1, 2, 3, 40, 50, 60]);
        assert_eq!(out, b"P3\n2 1\n255\n1 2 3 40 50 60\n");

        let out = encode(PnmVersions::P1, 2, 2, &[0, 255, 255, 0]);
        assert_eq!(out, b"P1\n2 2\n1 0\n0 1\n");
    }

    #[test]
    fn test_binary_layout() {
        let out = encode(PnmVersions::P5, 2, 1, &[7, 9]);
        assert_eq!(out, b"P5\n2 1\n255\n\x07\x09");

        let out = encode(PnmVersions::P4, 9, 1, &[0, 1, 1, 1, 1, 1, 1, 1, 0]);
        assert_eq!(out, b"P4\n9 1\n\x80\x80");
    }

    #[test]
    fn test_size_mismatch() {
        let mut out = vec![];
        assert!(PnmEncoder::new(PnmVersions::P6, 2, 2)
            .encode(&[0; 11], &mut out)
            .is_err());
        assert!(PnmEncoder::new(PnmVersions::P6, 0, 2)
            .encode(&[], &mut out)
            .is_err());
        assert!(out.is_empty());
    }
}
