/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! RGB to Hue Saturation Lightness and back
//!
//! Hue is stored in `[0,1)`, one sixth per hexagon sector.
use crate::triple::ColorTriple;

/// Hue in `[0,1)` from the max component and chroma of an RGB triple
///
/// Returns 0 for zero chroma, where hue is undefined.
#[inline]
pub(crate) fn hue(r: f32, g: f32, b: f32, max_c: f32, chroma: f32) -> f32 {
    if chroma <= 0.0 {
        return 0.0;
    }
    let sector = if r == max_c {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if g == max_c {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    let h = sector / 6.0;
    // rem_euclid can land exactly on 6 for tiny negative inputs
    if h >= 1.0 {
        0.0
    } else {
        h
    }
}

/// Place chroma `c`, intermediate `x` and zero on the hexagon sector of `h`
/// and add the offset `m`
#[inline]
pub(crate) fn sector_to_rgb(h: f32, c: f32, m: f32) -> ColorTriple {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let x = c * (1.0 - ((h6 % 2.0) - 1.0).abs());

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match h6 as usize {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x)
    };
    ColorTriple::clamped(r + m, g + m, b + m)
}

pub(crate) fn rgb_to_hsl(r: f32, g: f32, b: f32) -> ColorTriple {
    let max_c = r.max(g).max(b);
    let min_c = r.min(g).min(b);
    let chroma = max_c - min_c;

    let l = (max_c + min_c) / 2.0;

    let s = if l <= 0.0 || l >= 1.0 {
        0.0
    } else {
        chroma / (1.0 - (2.0 * l - 1.0).abs())
    };

    ColorTriple::clamped(hue(r, g, b, max_c, chroma), s, l)
}

pub(crate) fn hsl_to_rgb(h: f32, s: f32, l: f32) -> ColorTriple {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let m = l - c / 2.0;

    sector_to_rgb(h, c, m)
}
