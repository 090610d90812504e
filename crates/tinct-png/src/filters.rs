/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Scanline filters
//!
//! De-filtering reconstructs a row in place from its filtered bytes and the
//! already reconstructed row above it, filtering does the reverse on encode.
//!
//! `components` is the number of bytes per pixel, the distance
//! to the left neighbour of a byte.
use crate::enums::FilterMethod;

pub fn handle_avg(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    // handle leftmost byte explicitly
    for i in 0..components {
        current[i] = raw[i].wrapping_add(prev_row[i] >> 1);
    }
    // raw length is one row,so always keep it in check
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let a = current[i - components];
        let b = prev_row[i];

        // find average, with overflow handling
        // from standford bit-hacks.
        let c = (a & b) + ((a ^ b) >> 1);

        current[i] = raw[i].wrapping_add(c);
    }
}

pub fn handle_avg_first(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    // the row above is zero, so the first pixel is copied
    current[..components].copy_from_slice(&raw[..components]);

    let end = current.len().min(raw.len());

    for i in components..end {
        let avg = current[i - components] >> 1;
        current[i] = raw[i].wrapping_add(avg);
    }
}

pub fn handle_sub(raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components {
        return;
    }
    // no left neighbour for the first pixel
    current[..components].copy_from_slice(&raw[..components]);

    let end = current.len().min(raw.len());

    for i in components..end {
        current[i] = raw[i].wrapping_add(current[i - components]);
    }
}

pub fn handle_up(prev_row: &[u8], raw: &[u8], current: &mut [u8]) {
    for ((filt, recon_b), out_px) in raw.iter().zip(prev_row).zip(current) {
        *out_px = filt.wrapping_add(*recon_b);
    }
}

pub fn handle_paeth(prev_row: &[u8], raw: &[u8], current: &mut [u8], components: usize) {
    if raw.len() < components || current.len() < components || prev_row.len() < components {
        return;
    }
    // handle leftmost byte explicitly, a and c are zero there
    for i in 0..components {
        current[i] = raw[i].wrapping_add(paeth(0, prev_row[i], 0));
    }
    let end = current.len().min(raw.len()).min(prev_row.len());

    for i in components..end {
        let paeth_res = paeth(current[i - components], prev_row[i], prev_row[i - components]);

        current[i] = raw[i].wrapping_add(paeth_res);
    }
}

pub fn handle_paeth_first(raw: &[u8], current: &mut [u8], components: usize) {
    // with the row above zero, paeth always picks the left byte
    handle_sub(raw, current, components);
}

/// The Paeth predictor
///
/// Returns whichever of a(left), b(above) or c(upper left) is closest
/// to `a + b - c`, ties broken in the order a, b, c
#[inline(always)]
pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        return a as u8;
    }
    if pb <= pc {
        return b as u8;
    }
    c as u8
}

/// Reconstruct one row
///
/// `prev_row` is the reconstructed row above, pass `None` for the
/// first row of an image.
pub fn defilter_scanline(
    filter: FilterMethod, prev_row: Option<&[u8]>, raw: &[u8], current: &mut [u8],
    components: usize
) {
    let (filter, prev_row) = match prev_row {
        Some(row) => (filter, row),
        None => (filter.first_row_variant(), &[][..])
    };

    match filter {
        FilterMethod::None => current.copy_from_slice(raw),
        FilterMethod::Sub => handle_sub(raw, current, components),
        FilterMethod::Up => handle_up(prev_row, raw, current),
        FilterMethod::Average => handle_avg(prev_row, raw, current, components),
        FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components),
        FilterMethod::AvgFirst => handle_avg_first(raw, current, components),
        FilterMethod::PaethFirst => handle_paeth_first(raw, current, components)
    }
}

/// Filter a row for compression
///
/// `output` receives the filter type byte followed by the residuals, so it
/// must be one byte longer than `input`. An empty `previous` means
/// the row above is zero.
pub fn filter_scanline(
    input: &[u8], previous: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
) {
    let (filter_byte, out) = output.split_at_mut(1);
    filter_byte[0] = filter.to_int();

    let above = |i: usize| previous.get(i).copied().unwrap_or(0);
    let left = |i: usize| {
        if i >= components {
            input[i - components]
        } else {
            0
        }
    };
    let upper_left = |i: usize| {
        if i >= components {
            above(i - components)
        } else {
            0
        }
    };

    for (i, (out_px, in_px)) in out.iter_mut().zip(input).enumerate() {
        let prediction = match filter {
            FilterMethod::None => 0,
            FilterMethod::Sub => left(i),
            FilterMethod::Up => above(i),
            FilterMethod::Average | FilterMethod::AvgFirst => {
                ((u16::from(left(i)) + u16::from(above(i))) >> 1) as u8
            }
            FilterMethod::Paeth | FilterMethod::PaethFirst => {
                paeth(left(i), above(i), upper_left(i))
            }
        };
        *out_px = in_px.wrapping_sub(prediction);
    }
}

/// Choose the filter whose residuals have the smallest sum of
/// absolute values when read as signed bytes
pub fn choose_compression_filter(
    previous: &[u8], current: &[u8], components: usize, scratch: &mut Vec<u8>
) -> FilterMethod {
    const CANDIDATES: [FilterMethod; 5] = [
        FilterMethod::None,
        FilterMethod::Sub,
        FilterMethod::Up,
        FilterMethod::Average,
        FilterMethod::Paeth
    ];
    scratch.resize(current.len() + 1, 0);

    let mut best = FilterMethod::None;
    let mut best_sum = u64::MAX;

    for candidate in CANDIDATES {
        filter_scanline(current, previous, scratch, candidate, components);

        let sum: u64 = scratch[1..]
            .iter()
            .map(|x| u64::from((*x as i8).unsigned_abs()))
            .sum();

        if sum < best_sum {
            best_sum = sum;
            best = candidate;
        }
    }
    best
}
