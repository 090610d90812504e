/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde")]

use serde::ser::*;

use crate::colorspace::ColorSpace;
use crate::converters::Converter;
use crate::gamma::Gamma;
use crate::options::RowFilter;
use crate::triple::ColorTriple;

impl Serialize for Converter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for Gamma {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // keep the float tag so readers can rebuild the gamma
        serializer.serialize_f32(self.to_tag())
    }
}

impl Serialize for ColorSpace {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // colorspace serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for RowFilter {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl Serialize for ColorTriple {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut tuple = serializer.serialize_tuple(3)?;
        for value in self.to_array() {
            tuple.serialize_element(&value)?;
        }
        tuple.end()
    }
}
