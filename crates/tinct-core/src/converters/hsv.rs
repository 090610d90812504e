/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! RGB to Hue Saturation Value and back
use crate::converters::hsl::{hue, sector_to_rgb};
use crate::triple::ColorTriple;

pub(crate) fn rgb_to_hsv(r: f32, g: f32, b: f32) -> ColorTriple {
    let max_c = r.max(g).max(b);
    let min_c = r.min(g).min(b);
    let chroma = max_c - min_c;

    let s = if max_c <= 0.0 { 0.0 } else { chroma / max_c };

    ColorTriple::clamped(hue(r, g, b, max_c, chroma), s, max_c)
}

pub(crate) fn hsv_to_rgb(h: f32, s: f32, v: f32) -> ColorTriple {
    let c = v * s;

    sector_to_rgb(h, c, v - c)
}
