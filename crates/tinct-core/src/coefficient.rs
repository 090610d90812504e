/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A single normalized colour component
use std::fmt::{Display, Formatter};

use crate::errors::ColorErrors;

/// A colour component normalized to the closed range `[0,1]`
///
/// The value is independent of the bit depth it was read from or
/// will be written to, [`normalize`](Coefficient::normalize) and
/// [`denormalize`](Coefficient::denormalize) move between it and
/// 8 bit samples.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Coefficient(f32);

impl Coefficient {
    pub const ZERO: Coefficient = Coefficient(0.0);
    pub const HALF: Coefficient = Coefficient(0.5);
    pub const ONE: Coefficient = Coefficient(1.0);

    /// Create a new coefficient
    ///
    /// # Errors
    /// [`ColorErrors::OutOfRange`] if `value` is outside `[0,1]` or NaN
    pub fn new(value: f32) -> Result<Coefficient, ColorErrors> {
        if (0.0..=1.0).contains(&value) {
            Ok(Coefficient(value))
        } else {
            Err(ColorErrors::OutOfRange(value))
        }
    }

    /// Create a coefficient, truncating `value` into `[0,1]`
    ///
    /// NaN becomes zero.
    pub fn clamped(value: f32) -> Coefficient {
        if value.is_nan() {
            return Coefficient::ZERO;
        }
        Coefficient(value.clamp(0.0, 1.0))
    }

    /// Map an 8 bit sample to a coefficient by dividing by 255
    pub fn normalize(byte: u8) -> Coefficient {
        Coefficient(f32::from(byte) / 255.0)
    }

    /// Map the coefficient back to an 8 bit sample
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn denormalize(self) -> u8 {
        (self.0 * 255.0).round() as u8
    }

    /// Map a sample with an arbitrary maximum value to a coefficient
    ///
    /// A `max_value` of zero maps everything to zero.
    pub fn from_sample(sample: u16, max_value: u16) -> Coefficient {
        if max_value == 0 {
            return Coefficient::ZERO;
        }
        Coefficient::clamped(f32::from(sample) / f32::from(max_value))
    }

    /// Map the coefficient to a sample with maximum value `max_value`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_sample(self, max_value: u16) -> u16 {
        (self.0 * f32::from(max_value)).round() as u16
    }

    #[inline]
    pub const fn get(self) -> f32 {
        self.0
    }
}

impl TryFrom<f32> for Coefficient {
    type Error = ColorErrors;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Coefficient::new(value)
    }
}

impl From<u8> for Coefficient {
    fn from(value: u8) -> Self {
        Coefficient::normalize(value)
    }
}

impl From<Coefficient> for f32 {
    fn from(value: Coefficient) -> Self {
        value.0
    }
}

impl Display for Coefficient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
