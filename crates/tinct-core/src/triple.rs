/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Three component colour values
//!
//! A [`ColorTriple`] carries no colour space of its own, the meaning
//! of each component (R/G/B, H/S/L, Y/Cb/Cr ...) is given by the
//! [`Converter`](crate::converters::Converter) of the image holding it.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::coefficient::Coefficient;
use crate::errors::ColorErrors;

/// Three independent coefficients
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ColorTriple {
    components: [Coefficient; 3]
}

impl ColorTriple {
    pub const BLACK: ColorTriple = ColorTriple::from_coefficients([Coefficient::ZERO; 3]);
    pub const WHITE: ColorTriple = ColorTriple::from_coefficients([Coefficient::ONE; 3]);

    /// Create a new triple, checking each component
    ///
    /// # Errors
    /// [`ColorErrors::OutOfRange`] naming the first component outside `[0,1]`
    pub fn new(first: f32, second: f32, third: f32) -> Result<ColorTriple, ColorErrors> {
        Ok(ColorTriple {
            components: [
                Coefficient::new(first)?,
                Coefficient::new(second)?,
                Coefficient::new(third)?
            ]
        })
    }

    /// Create a triple, truncating every component into `[0,1]`
    pub fn clamped(first: f32, second: f32, third: f32) -> ColorTriple {
        ColorTriple {
            components: [
                Coefficient::clamped(first),
                Coefficient::clamped(second),
                Coefficient::clamped(third)
            ]
        }
    }

    pub const fn from_coefficients(components: [Coefficient; 3]) -> ColorTriple {
        ColorTriple { components }
    }

    /// A triple whose three components hold the same value
    pub const fn splat(value: Coefficient) -> ColorTriple {
        ColorTriple::from_coefficients([value; 3])
    }

    /// Create a triple from three 8 bit samples
    pub fn from_bytes(bytes: [u8; 3]) -> ColorTriple {
        ColorTriple {
            components: bytes.map(Coefficient::normalize)
        }
    }

    /// Return the three components as 8 bit samples
    pub fn to_bytes(&self) -> [u8; 3] {
        self.components.map(Coefficient::denormalize)
    }

    pub fn to_array(&self) -> [f32; 3] {
        self.components.map(Coefficient::get)
    }

    pub const fn components(&self) -> [Coefficient; 3] {
        self.components
    }

    /// Return component `index`
    ///
    /// # Panics
    /// If `index` is greater than 2
    pub const fn get(&self, index: usize) -> Coefficient {
        self.components[index]
    }

    pub const fn first(&self) -> f32 {
        self.components[0].get()
    }

    pub const fn second(&self) -> f32 {
        self.components[1].get()
    }

    pub const fn third(&self) -> f32 {
        self.components[2].get()
    }

    /// Return a copy with component `index` replaced
    ///
    /// # Panics
    /// If `index` is greater than 2
    #[must_use]
    pub fn with_component(mut self, index: usize, value: Coefficient) -> ColorTriple {
        self.components[index] = value;
        self
    }

    /// Whether each component lies within `tolerance` of `other`
    pub fn approx_eq(&self, other: &ColorTriple, tolerance: f32) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| (a.get() - b.get()).abs() <= tolerance)
    }
}

impl From<[u8; 3]> for ColorTriple {
    fn from(value: [u8; 3]) -> Self {
        ColorTriple::from_bytes(value)
    }
}

/// Writes the three 8 bit samples separated by a single space
impl Display for ColorTriple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.to_bytes();
        write!(f, "{a} {b} {c}")
    }
}

/// Reads three whitespace separated 8 bit samples
impl FromStr for ColorTriple {
    type Err = ColorErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0_u8; 3];
        let mut tokens = s.split_ascii_whitespace();

        for (position, byte) in bytes.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                ColorErrors::Malformed(format!("expected 3 components, found {position}"))
            })?;

            *byte = token
                .parse()
                .map_err(|_| ColorErrors::Malformed(format!("`{token}` is not a byte value")))?;
        }
        if let Some(extra) = tokens.next() {
            return Err(ColorErrors::Malformed(format!(
                "unexpected trailing component `{extra}`"
            )));
        }
        Ok(ColorTriple::from_bytes(bytes))
    }
}
