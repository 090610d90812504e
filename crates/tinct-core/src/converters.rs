/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colour space converters
//!
//! A converter maps a [`ColorTriple`] between device RGB and a working
//! colour space. Every variant is a stateless value, so a converter can be
//! copied freely and shared across threads.
//!
//! All arithmetic happens on normalized floats, results are truncated
//! back into `[0,1]` instead of failing. The only failure is a device
//! colour that a variant cannot represent at all, see
//! [`Converter::BlackAndWhite`].
//!
//! # Round trips
//! `from_rgb(to_rgb(x))` reproduces `x` up to floating point error, except
//! - `Hsl`/`Hsv`: hue is undefined when chroma is zero and reads back as 0
//! - `Greyscale`/`BlackAndWhite`: only the first component carries information
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::coefficient::Coefficient;
use crate::errors::ColorErrors;
use crate::triple::ColorTriple;

mod hsl;
mod hsv;
mod ycbcr;
mod ycocg;

/// BT.601 luma weights, used for greyscale conversion
pub(crate) const LUMA_R: f32 = 0.299;
pub(crate) const LUMA_G: f32 = 0.587;
pub(crate) const LUMA_B: f32 = 0.114;

/// All supported colour space converters
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Converter {
    /// Identity, components are red, green and blue
    #[default]
    Rgb,
    /// A single intensity stored in all three components
    Greyscale,
    /// Pure black or pure white only
    BlackAndWhite,
    /// Cyan, magenta, yellow
    Cmy,
    /// Hue, saturation, lightness
    Hsl,
    /// Hue, saturation, value
    Hsv,
    /// Luma and chroma with BT.601 weights
    YCbCr601,
    /// Luma and chroma with BT.709 weights
    YCbCr709,
    /// Luma, chroma orange, chroma green
    YCoCg
}

impl Converter {
    /// Every converter, in declaration order
    pub const ALL: [Converter; 9] = [
        Converter::Rgb,
        Converter::Greyscale,
        Converter::BlackAndWhite,
        Converter::Cmy,
        Converter::Hsl,
        Converter::Hsv,
        Converter::YCbCr601,
        Converter::YCbCr709,
        Converter::YCoCg
    ];

    /// Convert a triple in this working space to device RGB
    pub fn to_rgb(self, color: ColorTriple) -> ColorTriple {
        let [a, b, c] = color.to_array();

        match self {
            Converter::Rgb => color,
            Converter::Greyscale | Converter::BlackAndWhite => {
                ColorTriple::splat(color.get(0))
            }
            Converter::Cmy => ColorTriple::clamped(1.0 - a, 1.0 - b, 1.0 - c),
            Converter::Hsl => hsl::hsl_to_rgb(a, b, c),
            Converter::Hsv => hsv::hsv_to_rgb(a, b, c),
            Converter::YCbCr601 => ycbcr::ycbcr_to_rgb(ycbcr::BT601, a, b, c),
            Converter::YCbCr709 => ycbcr::ycbcr_to_rgb(ycbcr::BT709, a, b, c),
            Converter::YCoCg => ycocg::ycocg_to_rgb(a, b, c)
        }
    }

    /// Convert a device RGB triple into this working space
    ///
    /// # Errors
    /// [`ColorErrors::UnsupportedValue`] for [`Converter::BlackAndWhite`]
    /// when `rgb` is neither pure black nor pure white
    pub fn from_rgb(self, rgb: ColorTriple) -> Result<ColorTriple, ColorErrors> {
        let [r, g, b] = rgb.to_array();

        let color = match self {
            Converter::Rgb => rgb,
            // neutral colours keep their exact intensity
            Converter::Greyscale if r == g && g == b => ColorTriple::splat(rgb.get(0)),
            Converter::Greyscale => ColorTriple::splat(Coefficient::clamped(luma(r, g, b))),
            Converter::BlackAndWhite => {
                if rgb == ColorTriple::BLACK || rgb == ColorTriple::WHITE {
                    rgb
                } else {
                    return Err(ColorErrors::UnsupportedValue(self, rgb));
                }
            }
            Converter::Cmy => ColorTriple::clamped(1.0 - r, 1.0 - g, 1.0 - b),
            Converter::Hsl => hsl::rgb_to_hsl(r, g, b),
            Converter::Hsv => hsv::rgb_to_hsv(r, g, b),
            Converter::YCbCr601 => ycbcr::rgb_to_ycbcr(ycbcr::BT601, r, g, b),
            Converter::YCbCr709 => ycbcr::rgb_to_ycbcr(ycbcr::BT709, r, g, b),
            Converter::YCoCg => ycocg::rgb_to_ycocg(r, g, b)
        };
        Ok(color)
    }

    /// The value read in place of a hidden channel
    pub const fn default_value(self) -> ColorTriple {
        let half = Coefficient::HALF;
        let zero = Coefficient::ZERO;

        match self {
            Converter::Rgb | Converter::Greyscale | Converter::BlackAndWhite | Converter::Cmy => {
                ColorTriple::BLACK
            }
            Converter::Hsl => ColorTriple::from_coefficients([zero, zero, half]),
            Converter::Hsv => ColorTriple::from_coefficients([zero, zero, Coefficient::ONE]),
            Converter::YCbCr601 | Converter::YCbCr709 | Converter::YCoCg => {
                ColorTriple::splat(half)
            }
        }
    }

    /// Whether only the first component carries information
    pub const fn is_single_channel(self) -> bool {
        matches!(self, Converter::Greyscale | Converter::BlackAndWhite)
    }

    /// The grey intensity of `color`
    ///
    /// Single channel converters return their stored intensity, every
    /// other converter returns the BT.601 luma of the device colour.
    pub fn grey_value(self, color: ColorTriple) -> f32 {
        if self.is_single_channel() {
            return color.first();
        }
        let [r, g, b] = self.to_rgb(color).to_array();
        luma(r, g, b).clamp(0.0, 1.0)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Converter::Rgb => "RGB",
            Converter::Greyscale => "Greyscale",
            Converter::BlackAndWhite => "BlackAndWhite",
            Converter::Cmy => "CMY",
            Converter::Hsl => "HSL",
            Converter::Hsv => "HSV",
            Converter::YCbCr601 => "YCbCr601",
            Converter::YCbCr709 => "YCbCr709",
            Converter::YCoCg => "YCoCg"
        }
    }
}

#[inline]
pub(crate) fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

impl Display for Converter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Converter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Converter::ALL
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("Unknown converter `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::converters::Converter;
    use crate::triple::ColorTriple;

    fn unit(rand: &mut nanorand::WyRand) -> f32 {
        rand.generate_range(0_u32..=10_000) as f32 / 10_000.0
    }

    fn random_triple(rand: &mut nanorand::WyRand) -> ColorTriple {
        let mut bytes = [0_u8; 3];
        rand.fill(&mut bytes);
        ColorTriple::from_bytes(bytes)
    }

    #[test]
    fn test_lossless_round_trip() {
        let mut rand = nanorand::WyRand::new_seed(0x7131);

        for converter in [
            Converter::Rgb,
            Converter::Cmy,
            Converter::YCbCr601,
            Converter::YCbCr709,
            Converter::YCoCg
        ] {
            for _ in 0..1000 {
                let rgb = random_triple(&mut rand);
                let working = converter.from_rgb(rgb).unwrap();
                let back = converter.to_rgb(working);

                assert!(
                    back.approx_eq(&rgb, 1e-4),
                    "{converter}: {rgb:?} came back as {back:?}"
                );
            }
        }
    }

    #[test]
    fn test_working_space_round_trip() {
        // from_rgb(to_rgb(x)) == x for working space values with defined hue
        let mut rand = nanorand::WyRand::new_seed(0xacdc);

        for _ in 0..1000 {
            let h = unit(&mut rand) * 0.999;
            let s = 0.05 + unit(&mut rand) * 0.95;
            let l = 0.05 + unit(&mut rand) * 0.9;
            let hsl = ColorTriple::new(h, s, l).unwrap();
            let back = Converter::Hsl.from_rgb(Converter::Hsl.to_rgb(hsl)).unwrap();
            assert!(back.approx_eq(&hsl, 1e-3), "{hsl:?} vs {back:?}");

            let v = 0.05 + unit(&mut rand) * 0.95;
            let hsv = ColorTriple::new(h, s, v).unwrap();
            let back = Converter::Hsv.from_rgb(Converter::Hsv.to_rgb(hsv)).unwrap();
            assert!(back.approx_eq(&hsv, 1e-3), "{hsv:?} vs {back:?}");
        }
    }

    #[test]
    fn test_hue_singularity() {
        let grey = ColorTriple::new(0.4, 0.4, 0.4).unwrap();

        let hsl = Converter::Hsl.from_rgb(grey).unwrap();
        assert_eq!(hsl.first(), 0.0);
        assert_eq!(hsl.second(), 0.0);
        assert!((hsl.third() - 0.4).abs() < 1e-6);

        let hsv = Converter::Hsv.from_rgb(ColorTriple::BLACK).unwrap();
        assert_eq!(hsv.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_black_and_white() {
        let bw = Converter::BlackAndWhite;

        assert_eq!(bw.from_rgb(ColorTriple::WHITE).unwrap(), ColorTriple::WHITE);
        assert_eq!(bw.from_rgb(ColorTriple::BLACK).unwrap(), ColorTriple::BLACK);
        assert!(bw.from_rgb(ColorTriple::new(0.5, 0.5, 0.5).unwrap()).is_err());
        assert!(bw.from_rgb(ColorTriple::new(1.0, 1.0, 0.0).unwrap()).is_err());
    }

    #[test]
    fn test_greyscale() {
        let grey = Converter::Greyscale
            .from_rgb(ColorTriple::new(1.0, 0.0, 0.0).unwrap())
            .unwrap();
        assert!((grey.first() - 0.299).abs() < 1e-6);
        assert_eq!(grey.first(), grey.third());

        let rgb = Converter::Greyscale.to_rgb(grey);
        assert_eq!(rgb.to_array(), [grey.first(); 3]);
    }

    #[test]
    fn test_known_values() {
        let red = ColorTriple::new(1.0, 0.0, 0.0).unwrap();

        let hsv = Converter::Hsv.from_rgb(red).unwrap();
        assert!(hsv.approx_eq(&ColorTriple::new(0.0, 1.0, 1.0).unwrap(), 1e-6));

        let hsl = Converter::Hsl.from_rgb(red).unwrap();
        assert!(hsl.approx_eq(&ColorTriple::new(0.0, 1.0, 0.5).unwrap(), 1e-6));

        let green = ColorTriple::new(0.0, 1.0, 0.0).unwrap();
        let hsl = Converter::Hsl.from_rgb(green).unwrap();
        assert!((hsl.first() - 1.0 / 3.0).abs() < 1e-6);

        let cmy = Converter::Cmy.from_rgb(red).unwrap();
        assert_eq!(cmy.to_array(), [0.0, 1.0, 1.0]);

        let white = Converter::YCbCr601.from_rgb(ColorTriple::WHITE).unwrap();
        assert!(white.approx_eq(&ColorTriple::new(1.0, 0.5, 0.5).unwrap(), 1e-5));

        let ycocg = Converter::YCoCg.from_rgb(red).unwrap();
        assert!(ycocg.approx_eq(&ColorTriple::new(0.25, 1.0, 0.25).unwrap(), 1e-6));
    }

    #[test]
    fn test_outputs_clamped() {
        // chroma far from the luma produces out of gamut rgb
        let odd = ColorTriple::new(1.0, 1.0, 1.0).unwrap();

        for converter in Converter::ALL {
            let rgb = converter.to_rgb(odd);
            for value in rgb.to_array() {
                assert!((0.0..=1.0).contains(&value), "{converter} produced {value}");
            }
        }
    }

    #[test]
    fn test_names() {
        for converter in Converter::ALL {
            assert_eq!(converter.name().parse::<Converter>().unwrap(), converter);
        }
        assert!("LAB".parse::<Converter>().is_err());
    }
}
