/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Gamma tags
//!
//! Images carry a tag describing the transfer their samples were
//! stored with. The tag maps to and from a float encoding where
//! `-1` means unspecified, `0` the inverse sRGB transfer, `+inf` the sRGB
//! transfer and any other value a plain power exponent.
use std::fmt::{Display, Formatter};

/// PNG stores gamma as a fixed point value scaled by this much
pub const PNG_GAMMA_SCALE: f32 = 100_000.0;

/// gAMA value written for [`Gamma::InverseSrgb`]
pub const PNG_INVERSE_SRGB: u32 = 45455;

/// gAMA value written for [`Gamma::Srgb`]
pub const PNG_SRGB: u32 = 220_000;

/// Transfer tag recorded alongside an image
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gamma {
    /// No transfer information
    #[default]
    Unspecified,
    /// Samples went through the inverse of the sRGB curve
    InverseSrgb,
    /// Samples went through the sRGB curve
    Srgb,
    /// Samples went through `pow(value, exponent)`
    Exponent(f32)
}

impl Gamma {
    /// Decode the float tag encoding
    ///
    /// Negative values and NaN read as unspecified.
    pub fn from_tag(tag: f32) -> Gamma {
        if tag.is_nan() || tag < 0.0 {
            Gamma::Unspecified
        } else if tag == 0.0 {
            Gamma::InverseSrgb
        } else if tag.is_infinite() {
            Gamma::Srgb
        } else {
            Gamma::Exponent(tag)
        }
    }

    /// Encode the tag as a float
    pub const fn to_tag(self) -> f32 {
        match self {
            Gamma::Unspecified => -1.0,
            Gamma::InverseSrgb => 0.0,
            Gamma::Srgb => f32::INFINITY,
            Gamma::Exponent(value) => value
        }
    }

    /// Interpret the contents of a PNG gAMA chunk
    ///
    /// The values 45454 to 45456 are the usual roundings of `1/2.2` and read
    /// as [`Gamma::InverseSrgb`], zero reads as unspecified.
    pub fn from_png_value(value: u32) -> Gamma {
        match value {
            0 => Gamma::Unspecified,
            45454..=45456 => Gamma::InverseSrgb,
            PNG_SRGB => Gamma::Srgb,
            _ => Gamma::Exponent(value as f32 / PNG_GAMMA_SCALE)
        }
    }

    /// The value to store in a PNG gAMA chunk
    ///
    /// Returns `None` for [`Gamma::Unspecified`] and for exponents the
    /// chunk cannot hold: NaN, infinite, negative, too large or rounding
    /// to zero, since zero reads back as unspecified.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_png_value(self) -> Option<u32> {
        match self {
            Gamma::Unspecified => None,
            Gamma::InverseSrgb => Some(PNG_INVERSE_SRGB),
            Gamma::Srgb => Some(PNG_SRGB),
            Gamma::Exponent(value) => {
                let scaled = (value * PNG_GAMMA_SCALE).round();

                (1.0..=u32::MAX as f32)
                    .contains(&scaled)
                    .then_some(scaled as u32)
            }
        }
    }

    pub const fn is_specified(self) -> bool {
        !matches!(self, Gamma::Unspecified)
    }
}

impl Display for Gamma {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Gamma::Unspecified => write!(f, "unspecified"),
            Gamma::InverseSrgb => write!(f, "inverse sRGB"),
            Gamma::Srgb => write!(f, "sRGB"),
            Gamma::Exponent(value) => write!(f, "{value}")
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::gamma::Gamma;

    #[test]
    fn test_tags() {
        assert_eq!(Gamma::from_tag(-1.0), Gamma::Unspecified);
        assert_eq!(Gamma::from_tag(0.0), Gamma::InverseSrgb);
        assert_eq!(Gamma::from_tag(f32::INFINITY), Gamma::Srgb);
        assert_eq!(Gamma::from_tag(2.2), Gamma::Exponent(2.2));

        for gamma in [
            Gamma::Unspecified,
            Gamma::InverseSrgb,
            Gamma::Srgb,
            Gamma::Exponent(0.8)
        ] {
            assert_eq!(Gamma::from_tag(gamma.to_tag()), gamma);
        }
    }

    #[test]
    fn test_png_values() {
        assert_eq!(Gamma::from_png_value(45454), Gamma::InverseSrgb);
        assert_eq!(Gamma::from_png_value(45455), Gamma::InverseSrgb);
        assert_eq!(Gamma::from_png_value(45456), Gamma::InverseSrgb);
        assert_eq!(Gamma::from_png_value(100_000), Gamma::Exponent(1.0));
        assert_eq!(Gamma::Unspecified.to_png_value(), None);
        assert_eq!(Gamma::InverseSrgb.to_png_value(), Some(45455));
        assert_eq!(Gamma::Exponent(0.5).to_png_value(), Some(50000));
        assert_eq!(
            Gamma::from_png_value(Gamma::Srgb.to_png_value().unwrap()),
            Gamma::Srgb
        );
    }

    #[test]
    fn test_unstorable_exponents() {
        for value in [0.0, 1e-6, -2.2, f32::NAN, f32::INFINITY, 1e30] {
            assert_eq!(Gamma::Exponent(value).to_png_value(), None, "{value}");
        }
        assert_eq!(Gamma::Exponent(1e-5).to_png_value(), Some(1));
    }
}
