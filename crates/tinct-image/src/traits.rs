/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;

use crate::bitmap::PortableBitmap;
use crate::errors::ImageErrors;

/// This encapsulates an image operation.
///
/// Operations replace the image they are executed on with their
/// result.
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Execute the operation, manipulating the image
    ///
    /// Implementations should not be called directly,
    /// use [`execute`](OperationsTrait::execute) which logs and leaves
    /// the image untouched on failure.
    fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors>;

    /// Execute the operation on an image
    ///
    /// # Errors
    /// Any operations error will be propagated to the caller, in that case
    /// the image is unchanged
    ///
    /// # Example
    /// ```
    /// use tinct_core::converters::Converter;
    /// use tinct_image::bitmap::PortableBitmap;
    /// use tinct_image::errors::ImageErrors;
    /// use tinct_image::traits::OperationsTrait;
    ///
    /// struct Invert;
    ///
    /// impl OperationsTrait for Invert {
    ///     fn name(&self) -> &'static str {
    ///         "invert"
    ///     }
    ///     fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
    ///         image.convert_to(Converter::Cmy)?;
    ///         image.convert_to(Converter::Rgb)
    ///     }
    /// }
    /// let mut image = PortableBitmap::new(2, 2, Converter::Rgb).unwrap();
    /// Invert.execute(&mut image).unwrap();
    /// ```
    fn execute(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
        trace!("Running operation {}", self.name());

        let mut working = image.clone();
        self.execute_impl(&mut working)?;
        *image = working;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tinct_core::converters::Converter;

    use crate::bitmap::PortableBitmap;
    use crate::errors::ImageErrors;
    use crate::traits::OperationsTrait;

    struct HalfDone;

    impl OperationsTrait for HalfDone {
        fn name(&self) -> &'static str {
            "half done"
        }

        fn execute_impl(&self, image: &mut PortableBitmap) -> Result<(), ImageErrors> {
            image.toggle_first_channel();
            Err(ImageErrors::InvalidParameter(self.name(), "always fails".into()))
        }
    }

    #[test]
    fn test_failed_operation_leaves_image() {
        let mut image = PortableBitmap::new(2, 2, Converter::Rgb).unwrap();
        assert!(HalfDone.execute(&mut image).is_err());
        assert_eq!(image.visible_channels(), [true; 3]);
    }
}
