/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per pixel channel hiding
//!
//! A [`ColorChannel`] lets a caller mute one component of a single colour
//! for preview without discarding its data. It is independent of the
//! image wide visibility flags kept by the pixel store.
use crate::coefficient::Coefficient;
use crate::converters::Converter;
use crate::triple::ColorTriple;

/// A coefficient plus a visibility flag
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorChannel {
    value:   Coefficient,
    visible: bool
}

impl ColorChannel {
    /// Create a visible channel
    pub const fn new(value: Coefficient) -> ColorChannel {
        ColorChannel {
            value,
            visible: true
        }
    }

    /// Create a hidden channel, the stored value is kept
    pub const fn hidden(value: Coefficient) -> ColorChannel {
        ColorChannel {
            value,
            visible: false
        }
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// The stored value, regardless of visibility
    pub const fn stored(&self) -> Coefficient {
        self.value
    }

    /// The stored value when visible, `default` otherwise
    pub const fn read(&self, default: Coefficient) -> Coefficient {
        if self.visible {
            self.value
        } else {
            default
        }
    }

    /// Split a triple into three visible channels
    pub fn split(color: ColorTriple) -> [ColorChannel; 3] {
        color.components().map(ColorChannel::new)
    }

    /// Assemble channels into a triple, hidden channels read as the
    /// matching component of `converter`'s default value
    pub fn assemble(channels: &[ColorChannel; 3], converter: Converter) -> ColorTriple {
        let defaults = converter.default_value();

        ColorTriple::from_coefficients([
            channels[0].read(defaults.get(0)),
            channels[1].read(defaults.get(1)),
            channels[2].read(defaults.get(2))
        ])
    }
}
