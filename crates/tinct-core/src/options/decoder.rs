/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

/// Decoder options that are flags
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
struct DecoderFlags {
    /// Whether the inflate decoder should confirm adler checksums
    inflate_confirm_adler: bool,
    /// Whether the PNG decoder should confirm crc
    png_confirm_crc:       bool,
    /// Whether the PNM decoder should reject trailing data
    pnm_reject_trailing:   bool
}

fn decoder_strict_mode() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler: true,
        png_confirm_crc:       true,
        pnm_reject_trailing:   true
    }
}

/// Skip all checksum work
fn fast_options() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler: false,
        png_confirm_crc:       false,
        pnm_reject_trailing:   false
    }
}

/// Decoder options
///
/// Not all options are respected by all decoders,
/// each option lists decoders that respect it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:    usize,
    /// Maximum size for inflated data.
    ///
    /// - Default value: 1 GiB
    /// - Respected by: `png`
    deflate_limit: usize,
    /// Boolean flags that influence decoding
    flags:         DecoderFlags
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 14,
            max_height:    1 << 14,
            deflate_limit: 1 << 30,
            flags:         DecoderFlags {
                inflate_confirm_adler: true,
                png_confirm_crc:       true,
                pnm_reject_trailing:   false
            }
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create options that check everything they can
    ///
    /// This is the same as `default` except that trailing data
    /// after a PNM image is rejected
    pub fn new_strict() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(decoder_strict_mode())
    }

    /// Create options that skip checksum confirmation
    pub fn new_fast() -> DecoderOptions {
        DecoderOptions::default().set_decoder_flags(fast_options())
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true whether the decoder should be in strict mode
    /// And reject most errors
    pub const fn get_strict_mode(&self) -> bool {
        self.flags.png_confirm_crc
            && self.flags.inflate_confirm_adler
            && self.flags.pnm_reject_trailing
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    #[must_use]
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    #[must_use]
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This turns every checksum and conformance check on or off at once
    #[must_use]
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        self.flags.png_confirm_crc = yes;
        self.flags.inflate_confirm_adler = yes;
        self.flags.pnm_reject_trailing = yes;
        self
    }
}

/// PNG specific options
impl DecoderOptions {
    /// Whether the inflate decoder should confirm
    /// adler checksums
    pub const fn inflate_get_confirm_adler(&self) -> bool {
        self.flags.inflate_confirm_adler
    }

    /// Set whether the inflate decoder should confirm
    /// adler checksums
    #[must_use]
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.flags.inflate_confirm_adler = yes;
        self
    }

    /// Get the inflate limit beyond which the decoder
    /// will not try to decompress further
    pub const fn inflate_get_limit(&self) -> usize {
        self.deflate_limit
    }

    /// Set the inflate limit
    #[must_use]
    pub fn inflate_set_limit(mut self, limit: usize) -> Self {
        self.deflate_limit = limit;
        self
    }

    /// Whether the png decoder should confirm
    /// crc 32 checksums
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.flags.png_confirm_crc
    }

    /// Set whether the png decoder should confirm
    /// CRC 32 checksums
    #[must_use]
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.flags.png_confirm_crc = yes;
        self
    }
}

/// PNM specific options
impl DecoderOptions {
    /// Whether bytes after the last pixel are an error
    pub const fn pnm_get_reject_trailing(&self) -> bool {
        self.flags.pnm_reject_trailing
    }

    /// Set whether bytes after the last pixel are an error
    #[must_use]
    pub fn pnm_set_reject_trailing(mut self, yes: bool) -> Self {
        self.flags.pnm_reject_trailing = yes;
        self
    }
}
