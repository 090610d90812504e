/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![cfg(feature = "serde-support")]

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::bitmap::PortableBitmap;
use crate::codecs::ImageFormat;

/// Serializes image information, not pixels
impl Serialize for PortableBitmap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        const STRUCT_FIELDS: usize = 5;
        let mut state = serializer.serialize_struct("PortableBitmap", STRUCT_FIELDS)?;

        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.serialize_field("converter", &self.converter())?;
        state.serialize_field("gamma", &self.gamma())?;
        state.serialize_field("visible_channels", &self.visible_channels())?;

        state.end()
    }
}

impl Serialize for ImageFormat {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        serializer.serialize_str(&format!("{self:?}"))
    }
}
