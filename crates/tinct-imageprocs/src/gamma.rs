/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gamma correction
//!
//! Components are corrected in device RGB. The output image's gamma tag
//! records the transfer that was applied.
use log::trace;
use tinct_core::gamma::Gamma;
use tinct_image::bitmap::PortableBitmap;
use tinct_image::errors::ImageErrors;
use tinct_image::traits::OperationsTrait;

use crate::utils::{check_positive, to_image, DevicePixels};

/// Linear values at or below this use the linear segment of the sRGB curve
pub const SRGB_BREAKPOINT: f32 = 0.003_130_8;

const SRGB_SLOPE: f32 = 12.92;

/// Apply a transfer function to every component of an image
#[derive(Copy, Clone, Debug)]
pub struct GammaCorrection {
    transfer: Gamma
}

impl GammaCorrection {
    #[must_use]
    pub fn new(transfer: Gamma) -> GammaCorrection {
        GammaCorrection { transfer }
    }

    /// Create from the float tag encoding, `+inf` selects the sRGB curve
    /// and `0` its inverse
    #[must_use]
    pub fn from_tag(tag: f32) -> GammaCorrection {
        GammaCorrection::new(Gamma::from_tag(tag))
    }
}

impl OperationsTrait for GammaCorrection {
    fn name(&self) -> &'static str {
        "Gamma correction"
    }

    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        *image = gamma(image, self.transfer)?;
        Ok(())
    }
}

/// sRGB encode curve, linear to encoded
#[must_use]
pub fn srgb_encode(value: f32) -> f32 {
    if value <= SRGB_BREAKPOINT {
        value * SRGB_SLOPE
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Inverse of [`srgb_encode`], encoded to linear
#[must_use]
pub fn srgb_decode(value: f32) -> f32 {
    if value <= SRGB_BREAKPOINT * SRGB_SLOPE {
        value / SRGB_SLOPE
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Return a copy of `image` with `transfer` applied to every component
///
/// - [`Gamma::Exponent`] raises each component to the exponent
/// - [`Gamma::Srgb`] applies [`srgb_encode`]
/// - [`Gamma::InverseSrgb`] applies [`srgb_decode`]
/// - [`Gamma::Unspecified`] returns an unchanged copy
///
/// # Errors
/// If the exponent is not a positive finite number
pub fn gamma(image: &PortableBitmap, transfer: Gamma) -> Result<PortableBitmap, ImageErrors> {
    if let Gamma::Exponent(exponent) = transfer {
        check_positive("gamma", "exponent", exponent)?;
    }
    if transfer == Gamma::Unspecified {
        return Ok(image.clone());
    }
    trace!("Applying {transfer} transfer");

    let apply = |value: f32| match transfer {
        Gamma::Srgb => srgb_encode(value),
        Gamma::InverseSrgb => srgb_decode(value),
        Gamma::Exponent(exponent) => value.powf(exponent),
        Gamma::Unspecified => value
    };

    let mut source = DevicePixels::from_image(image);

    for pixel in &mut source.pixels {
        for value in pixel.iter_mut() {
            *value = apply(*value);
        }
    }
    let mut output = to_image(image, source.width, source.height, &source.pixels)?;
    output.set_gamma(transfer);

    Ok(output)
}
