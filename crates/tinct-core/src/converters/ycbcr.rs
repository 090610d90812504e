/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Full range luma/chroma conversion
//!
//! Chroma is centred at 0.5, so neutral colours carry `Cb = Cr = 0.5`.
use crate::triple::ColorTriple;

/// Red and blue luma weights of a standard, green is the remainder
#[derive(Copy, Clone)]
pub(crate) struct LumaWeights {
    kr: f32,
    kb: f32
}

pub(crate) const BT601: LumaWeights = LumaWeights { kr: 0.299, kb: 0.114 };
pub(crate) const BT709: LumaWeights = LumaWeights {
    kr: 0.2126,
    kb: 0.0722
};

pub(crate) fn rgb_to_ycbcr(weights: LumaWeights, r: f32, g: f32, b: f32) -> ColorTriple {
    let LumaWeights { kr, kb } = weights;
    let kg = 1.0 - kr - kb;

    let y = kr * r + kg * g + kb * b;
    let cb = 0.5 + (b - y) / (2.0 * (1.0 - kb));
    let cr = 0.5 + (r - y) / (2.0 * (1.0 - kr));

    ColorTriple::clamped(y, cb, cr)
}

pub(crate) fn ycbcr_to_rgb(weights: LumaWeights, y: f32, cb: f32, cr: f32) -> ColorTriple {
    let LumaWeights { kr, kb } = weights;
    let kg = 1.0 - kr - kb;

    let r = y + 2.0 * (1.0 - kr) * (cr - 0.5);
    let b = y + 2.0 * (1.0 - kb) * (cb - 0.5);
    let g = (y - kr * r - kb * b) / kg;

    ColorTriple::clamped(r, g, b)
}
