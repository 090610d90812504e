/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors raised while constructing or converting colour values
use std::fmt::{Debug, Display, Formatter};

use crate::converters::Converter;
use crate::triple::ColorTriple;

/// Errors possible when building colour values or moving
/// them between colour spaces
pub enum ColorErrors {
    /// A value fell outside the closed `[0,1]` range
    /// or was not a number
    OutOfRange(f32),
    /// A device colour that the converter cannot represent
    UnsupportedValue(Converter, ColorTriple),
    /// A textual triple could not be parsed
    Malformed(String)
}

impl Debug for ColorErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(value) => {
                writeln!(f, "Value {value} is outside the range [0,1]")
            }
            Self::UnsupportedValue(converter, color) => {
                writeln!(
                    f,
                    "Colour {color} cannot be represented by the {} converter",
                    converter.name()
                )
            }
            Self::Malformed(reason) => writeln!(f, "Malformed colour triple: {reason}")
        }
    }
}

impl Display for ColorErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ColorErrors {}
