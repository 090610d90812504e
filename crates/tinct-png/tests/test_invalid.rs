/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use tinct_png::crc::calc_crc;
use tinct_png::error::PngDecodeErrors;
use tinct_png::tinct_core::options::DecoderOptions;
use tinct_png::PngDecoder;

// offsets into a file whose first chunk is IHDR
const IHDR_DATA: usize = 16;
const IHDR_CRC: usize = 29;
const AFTER_IHDR: usize = 33;

fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let data = vec![128_u8; (width * height * 3) as usize];
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&data).unwrap();
    }
    out
}

fn fix_ihdr_crc(png: &mut [u8]) {
    let crc = calc_crc(&png[IHDR_DATA - 4..IHDR_CRC]);
    png[IHDR_CRC..AFTER_IHDR].copy_from_slice(&crc.to_be_bytes());
}

fn chunk(name: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(data);

    let crc = calc_crc(&out[4..]);
    out.extend_from_slice(&crc.to_be_bytes());
    out
}

#[test]
fn test_bad_signature() {
    let mut png = sample_png(4, 4);
    png[1] = b'Q';

    let err = PngDecoder::new(&png).decode_raw().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::BadSignature));
}

#[test]
fn test_bad_crc() {
    let mut png = sample_png(4, 4);
    png[IHDR_CRC] ^= 0xFF;

    let err = PngDecoder::new(&png).decode_raw().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::BadCrc(_, _)));

    // ignored when asked to
    let options = DecoderOptions::default().png_set_confirm_crc(false);
    assert!(PngDecoder::new_with_options(&png, options).decode_raw().is_ok());
}

#[test]
fn test_interlaced_is_unsupported() {
    let mut png = sample_png(4, 4);
    png[IHDR_DATA + 12] = 1;
    fix_ihdr_crc(&mut png);

    let err = PngDecoder::new(&png).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::Unsupported(_)));
}

#[test]
fn test_sixteen_bit_is_unsupported() {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 2, 2);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Sixteen);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0; 8]).unwrap();
    }
    let err = PngDecoder::new(&out).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::Unsupported(_)));
}

#[test]
fn test_bad_bit_depth_is_malformed() {
    let mut png = sample_png(4, 4);
    png[IHDR_DATA + 8] = 3;
    fix_ihdr_crc(&mut png);

    let err = PngDecoder::new(&png).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::Generic(_)));
}

#[test]
fn test_zero_width() {
    let mut png = sample_png(4, 4);
    png[IHDR_DATA..IHDR_DATA + 4].copy_from_slice(&[0; 4]);
    fix_ihdr_crc(&mut png);

    let err = PngDecoder::new(&png).decode_headers().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::GenericStatic(_)));
}

#[test]
fn test_dimension_limits() {
    let png = sample_png(16, 4);
    let options = DecoderOptions::default().set_max_width(8);

    let err = PngDecoder::new_with_options(&png, options)
        .decode_headers()
        .unwrap_err();
    assert!(matches!(
        err,
        PngDecodeErrors::TooLargeDimensions("width", 8, 16)
    ));
}

#[test]
fn test_unknown_chunks_are_skipped() {
    let png = sample_png(4, 4);
    let mut patched = png[..AFTER_IHDR].to_vec();
    patched.extend(chunk(b"teXt", b"hello"));
    patched.extend_from_slice(&png[AFTER_IHDR..]);

    let a = PngDecoder::new(&png).decode_raw().unwrap();
    let b = PngDecoder::new(&patched).decode_raw().unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_custom_chunk_handler_can_reject() {
    fn reject(chunk: [u8; 4], _: &[u8], _: u32) -> Result<(), PngDecodeErrors> {
        Err(PngDecodeErrors::Generic(format!("{chunk:?}")))
    }
    let png = sample_png(4, 4);
    let mut patched = png[..AFTER_IHDR].to_vec();
    patched.extend(chunk(b"prIv", &[1, 2, 3]));
    patched.extend_from_slice(&png[AFTER_IHDR..]);

    let mut decoder = PngDecoder::new(&patched);
    decoder.set_chunk_handler(reject);
    assert!(decoder.decode_raw().is_err());
}

#[test]
fn test_truncated_is_corrupt() {
    let png = sample_png(8, 8);

    for cut in [png.len() - 12, png.len() - 20, AFTER_IHDR + 3] {
        let err = PngDecoder::new(&png[..cut]).decode_raw().unwrap_err();
        assert!(
            matches!(err, PngDecodeErrors::CorruptData(_)),
            "cut at {cut}: {err:?}"
        );
    }
}

#[test]
fn test_first_chunk_must_be_ihdr() {
    let png = sample_png(4, 4);
    let mut patched = png[..8].to_vec();
    patched.extend(chunk(b"gAMA", &45455_u32.to_be_bytes()));
    patched.extend_from_slice(&png[8..]);

    assert!(PngDecoder::new(&patched).decode_headers().is_err());
}

#[test]
fn test_palette_image_without_palette() {
    let png = sample_png(4, 4);
    let mut patched = png.clone();
    // colour type 3 with RGB sized rows still fails on the missing PLTE
    patched[IHDR_DATA + 9] = 3;
    fix_ihdr_crc(&mut patched);

    let err = PngDecoder::new(&patched).decode_raw().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::EmptyPalette));
}

#[test]
fn test_palette_index_out_of_range() {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 2, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255, 0, 0]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 7]).unwrap();
    }

    let err = PngDecoder::new(&out).decode_raw().unwrap_err();
    assert!(matches!(err, PngDecodeErrors::CorruptData(_)), "{err:?}");

    // indices inside the palette still decode
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 2, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255, 0, 0, 0, 255, 0]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 1]).unwrap();
    }
    let data = PngDecoder::new(&out).decode_raw().unwrap();
    assert_eq!(data, [255, 0, 0, 0, 255, 0]);
}
