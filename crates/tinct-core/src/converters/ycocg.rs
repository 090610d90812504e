/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Reversible luma, chroma orange, chroma green transform
use crate::triple::ColorTriple;

pub(crate) fn rgb_to_ycocg(r: f32, g: f32, b: f32) -> ColorTriple {
    let y = 0.25 * r + 0.5 * g + 0.25 * b;
    let co = 0.5 + 0.5 * r - 0.5 * b;
    let cg = 0.5 - 0.25 * r + 0.5 * g - 0.25 * b;

    ColorTriple::clamped(y, co, cg)
}

pub(crate) fn ycocg_to_rgb(y: f32, co: f32, cg: f32) -> ColorTriple {
    let co = co - 0.5;
    let cg = cg - 0.5;

    let tmp = y - cg;

    ColorTriple::clamped(tmp + co, y + cg, tmp - co)
}
