/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::{Rng, WyRand};
use tinct_ppm::{PnmDecoder, PnmEncoder, PnmSamples, PnmVersions};

fn round_trip(version: PnmVersions, width: usize, height: usize, data: &[u8]) -> PnmSamples {
    let mut encoded = vec![];
    PnmEncoder::new(version, width, height)
        .encode(data, &mut encoded)
        .unwrap();

    let mut decoder = PnmDecoder::new(&encoded);
    let samples = decoder.decode().unwrap();

    assert_eq!(decoder.get_version(), Some(version));
    assert_eq!(decoder.get_dimensions(), Some((width, height)));
    samples
}

#[test]
fn test_all_versions_round_trip() {
    let (width, height) = (13, 5);
    let mut rand = WyRand::new_seed(42);

    for version in [
        PnmVersions::P1,
        PnmVersions::P2,
        PnmVersions::P3,
        PnmVersions::P4,
        PnmVersions::P5,
        PnmVersions::P6
    ] {
        let mut data = vec![0_u8; width * height * version.num_components()];
        rand.fill(&mut data);

        if version.is_bilevel() {
            // decoded bi-level pixels are 0 for black, 1 for white
            data.iter_mut().for_each(|x| *x &= 1);
        }
        let samples = round_trip(version, width, height, &data);
        assert_eq!(samples, PnmSamples::U8(data), "{version}");
    }
}

#[test]
fn test_checkerboard() {
    let board = [0, 1, 1, 0];

    for version in [PnmVersions::P1, PnmVersions::P4] {
        assert_eq!(
            round_trip(version, 2, 2, &board),
            PnmSamples::U8(board.to_vec())
        );
    }
    let board = [0, 255, 255, 0];

    for version in [PnmVersions::P2, PnmVersions::P5] {
        assert_eq!(
            round_trip(version, 2, 2, &board),
            PnmSamples::U8(board.to_vec())
        );
    }
}
