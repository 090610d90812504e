/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Display, Formatter};

use tinct_core::colorspace::ColorSpace;

/// The portable map variants, named after their magic bytes
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PnmVersions {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6
}

impl PnmVersions {
    /// Map the digit after `P` to a version
    pub const fn from_digit(digit: u8) -> Option<PnmVersions> {
        match digit {
            b'1' => Some(Self::P1),
            b'2' => Some(Self::P2),
            b'3' => Some(Self::P3),
            b'4' => Some(Self::P4),
            b'5' => Some(Self::P5),
            b'6' => Some(Self::P6),
            _ => None
        }
    }

    pub const fn to_digit(self) -> u8 {
        match self {
            Self::P1 => b'1',
            Self::P2 => b'2',
            Self::P3 => b'3',
            Self::P4 => b'4',
            Self::P5 => b'5',
            Self::P6 => b'6'
        }
    }

    /// True for the whitespace separated decimal variants
    pub const fn is_ascii(self) -> bool {
        matches!(self, Self::P1 | Self::P2 | Self::P3)
    }

    /// True for the one bit per pixel variants, which carry no maximum value
    pub const fn is_bilevel(self) -> bool {
        matches!(self, Self::P1 | Self::P4)
    }

    /// Samples per pixel
    pub const fn num_components(self) -> usize {
        match self {
            Self::P3 | Self::P6 => 3,
            _ => 1
        }
    }

    /// Layout of decoded samples
    pub const fn colorspace(self) -> ColorSpace {
        match self {
            Self::P3 | Self::P6 => ColorSpace::RGB,
            _ => ColorSpace::Luma
        }
    }

    /// The ASCII variant carrying the same contents
    pub const fn to_plain(self) -> PnmVersions {
        match self {
            Self::P1 | Self::P4 => Self::P1,
            Self::P2 | Self::P5 => Self::P2,
            Self::P3 | Self::P6 => Self::P3
        }
    }

    /// The binary variant carrying the same contents
    pub const fn to_binary(self) -> PnmVersions {
        match self {
            Self::P1 | Self::P4 => Self::P4,
            Self::P2 | Self::P5 => Self::P5,
            Self::P3 | Self::P6 => Self::P6
        }
    }
}

impl Display for PnmVersions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.to_digit() as char)
    }
}

#[cfg(test)]
mod tests {
    use crate::PnmVersions;

    #[test]
    fn test_digits() {
        for digit in b'1'..=b'6' {
            let version = PnmVersions::from_digit(digit).unwrap();
            assert_eq!(version.to_digit(), digit);
            assert_eq!(version.to_plain().to_binary(), version.to_binary());
        }
        assert_eq!(PnmVersions::from_digit(b'7'), None);
        assert_eq!(PnmVersions::P4.to_string(), "P4");
    }
}
