/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use tinct_core::converters::Converter;
use tinct_core::gamma::Gamma;
use tinct_core::options::{EncoderOptions, RowFilter};
use tinct_core::triple::ColorTriple;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ErrorKind;

fn checkerboard(converter: Converter) -> PortableBitmap {
    let (dark, light) = match converter {
        Converter::BlackAndWhite => (ColorTriple::BLACK, ColorTriple::WHITE),
        Converter::Greyscale => (
            ColorTriple::from_bytes([40; 3]),
            ColorTriple::from_bytes([200; 3])
        ),
        _ => (
            ColorTriple::from_bytes([200, 30, 10]),
            ColorTriple::from_bytes([5, 90, 250])
        )
    };
    PortableBitmap::from_fn(2, 2, converter, |x, y| if (x + y) % 2 == 0 { dark } else { light })
        .unwrap()
}

fn random_rgb(width: usize, height: usize) -> PortableBitmap {
    let mut rand = WyRand::new_seed(7);

    PortableBitmap::from_fn(width, height, Converter::Rgb, |_, _| {
        let mut bytes = [0_u8; 3];
        rand.fill(&mut bytes);
        ColorTriple::from_bytes(bytes)
    })
    .unwrap()
}

#[test]
fn test_pnm_round_trip_all_types() {
    for converter in [Converter::BlackAndWhite, Converter::Greyscale, Converter::Rgb] {
        let image = checkerboard(converter);

        let mut binary = vec![];
        image.save_pnm_binary(&mut binary).unwrap();
        let mut plain = vec![];
        image.save_pnm_plain(&mut plain).unwrap();

        let expected = match converter {
            Converter::BlackAndWhite => (b"P4", b"P1"),
            Converter::Greyscale => (b"P5", b"P2"),
            _ => (b"P6", b"P3")
        };
        assert_eq!(&binary[..2], expected.0);
        assert_eq!(&plain[..2], expected.1);

        for encoded in [binary, plain] {
            let decoded = PortableBitmap::decode(&encoded, converter).unwrap();
            assert_eq!(decoded, image, "{converter}");
        }
    }
}

#[test]
fn test_plain_rgb_layout() {
    let image = checkerboard(Converter::Rgb);
    let mut plain = vec![];
    image.save_pnm_plain(&mut plain).unwrap();

    let text = String::from_utf8(plain).unwrap();
    assert_eq!(text, "P3\n2 2\n255\n200 30 10 5 90 250\n5 90 250 200 30 10\n");
}

#[test]
fn test_single_visible_channel_writes_greymap() {
    let mut image = checkerboard(Converter::Rgb);
    image.toggle_first_channel();
    image.toggle_second_channel();

    let mut binary = vec![];
    image.save_pnm_binary(&mut binary).unwrap();

    assert_eq!(binary, b"P5\n2 2\n255\n\x0a\xfa\xfa\x0a");
}

#[test]
fn test_png_round_trip() {
    let image = random_rgb(33, 17);

    for filter in [RowFilter::None, RowFilter::Paeth, RowFilter::Adaptive] {
        let mut encoded = vec![];
        let options = EncoderOptions::default().png_set_row_filter(filter);
        image
            .save_png_with_options(&mut encoded, Gamma::Unspecified, options)
            .unwrap();

        let decoded = PortableBitmap::decode(&encoded, Converter::Rgb).unwrap();
        assert_eq!(decoded, image);
    }
}

#[test]
fn test_png_grey_and_bilevel() {
    for converter in [Converter::Greyscale, Converter::BlackAndWhite] {
        let image = checkerboard(converter);

        let mut encoded = vec![];
        image.save_png(&mut encoded, Gamma::Unspecified).unwrap();
        // colour type 0
        assert_eq!(encoded[25], 0);

        let decoded = PortableBitmap::decode(&encoded, converter).unwrap();
        assert_eq!(decoded, image);
    }
}

#[test]
fn test_png_gamma_tag() {
    let image = checkerboard(Converter::Rgb);

    for gamma in [
        Gamma::Unspecified,
        Gamma::InverseSrgb,
        Gamma::Srgb,
        Gamma::Exponent(0.8)
    ] {
        let mut encoded = vec![];
        image.save_png(&mut encoded, gamma).unwrap();

        let decoded = PortableBitmap::decode(&encoded, Converter::Rgb).unwrap();
        assert_eq!(decoded.gamma(), gamma);
    }
}

#[test]
fn test_decode_into_working_space() {
    let image = random_rgb(8, 8);
    let mut encoded = vec![];
    image.save_pnm_binary(&mut encoded).unwrap();

    let decoded = PortableBitmap::decode(&encoded, Converter::YCoCg).unwrap();
    assert_eq!(decoded.converter(), Converter::YCoCg);

    for (a, b) in decoded.to_rgb_pixels().iter().zip(image.pixels()) {
        assert!(a.approx_eq(b, 1e-4));
    }
}

#[test]
fn test_decode_errors_have_kinds() {
    let err = PortableBitmap::decode(b"P9 1 1 255\n", Converter::Rgb).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedFeature);

    let err = PortableBitmap::decode(b"Pq", Converter::Rgb).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let err = PortableBitmap::decode(b"P6 2 2 255\n\x00", Converter::Rgb).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptData);

    let err = PortableBitmap::decode(b"\x00\x01", Converter::Rgb).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let mut png = vec![];
    checkerboard(Converter::Rgb)
        .save_png(&mut png, Gamma::Unspecified)
        .unwrap();
    let last = png.len() - 1;
    png[last] ^= 1;
    let err = PortableBitmap::decode(&png, Converter::Rgb).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CorruptData);

    // grey pixels are not black and white
    let mut pgm = vec![];
    checkerboard(Converter::Greyscale)
        .save_pnm_binary(&mut pgm)
        .unwrap();
    let err = PortableBitmap::decode(&pgm, Converter::BlackAndWhite).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedValue);
}

#[test]
fn test_files() {
    let dir = std::env::temp_dir();
    let image = random_rgb(5, 4);

    for name in ["tinct-test.png", "tinct-test.ppm"] {
        let path = dir.join(name);
        image.save(&path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let read = PortableBitmap::read_from(file, Converter::Rgb).unwrap();
        let opened = PortableBitmap::open(&path, Converter::Rgb).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(read, image);
        assert_eq!(opened, image);
    }
    assert!(image.save(dir.join("tinct-test.bmp")).is_err());
}
