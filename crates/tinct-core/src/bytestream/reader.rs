/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

static ERROR_MSG: &str = "No more bytes";

/// An encapsulation of a byte slice with a read position
///
/// Reads ending in `_err` report running out of data, the other
/// reads return zero instead and should be paired with [`has`](Self::has).
pub struct ByteReader<'a> {
    /// Data stream
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

impl<'a> ByteReader<'a> {
    /// Create a new reader positioned at the start of `buf`
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Skip `num` bytes ahead of the stream.
    ///
    /// Skipping past the end leaves the reader at eof
    pub fn skip(&mut self, num: usize) {
        self.position = self.position.saturating_add(num).min(self.stream.len());
    }

    /// Move the position back by `num` bytes
    pub fn rewind(&mut self, num: usize) {
        self.position = self.position.saturating_sub(num);
    }

    /// Return true if the stream holds at least `num` more bytes
    pub const fn has(&self, num: usize) -> bool {
        self.position.saturating_add(num) <= self.stream.len()
    }

    /// Number of bytes not yet read
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    pub const fn eof(&self) -> bool {
        self.position >= self.stream.len()
    }

    pub const fn get_position(&self) -> usize {
        self.position
    }

    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Read a single byte, returning zero at eof
    #[inline(always)]
    pub fn get_u8(&mut self) -> u8 {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                *byte
            }
            None => 0
        }
    }

    /// Read a single byte or error out at eof
    #[inline(always)]
    pub fn get_u8_err(&mut self) -> Result<u8, &'static str> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ERROR_MSG)
        }
    }

    /// Return the next byte without consuming it
    pub fn peek_u8(&self) -> Option<u8> {
        self.stream.get(self.position).copied()
    }

    /// Look `position` bytes ahead and return `num_bytes` from there
    /// without moving the reader
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], &'static str> {
        let start = self.position.checked_add(position).ok_or(ERROR_MSG)?;
        let end = start.checked_add(num_bytes).ok_or(ERROR_MSG)?;

        self.stream.get(start..end).ok_or(ERROR_MSG)
    }

    /// Return a reference to the next `num_bytes` and move past them
    pub fn get_as_ref(&mut self, num_bytes: usize) -> Result<&'a [u8], &'static str> {
        let bytes = self.peek_at(0, num_bytes)?;
        self.position += num_bytes;
        Ok(bytes)
    }

    /// Return everything not yet read and move to eof
    pub fn get_remaining(&mut self) -> &'a [u8] {
        let bytes = &self.stream[self.position.min(self.stream.len())..];
        self.position = self.stream.len();
        bytes
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$name4:tt,$name5:tt,$name6:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a> {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> $int_type {
                self.$name2(mode).unwrap_or(0)
            }

            #[inline(always)]
            fn $name2(&mut self, mode: Mode) -> Result<$int_type, &'static str> {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let mut space = [0; SIZE_OF_VAL];

                match self.stream.get(self.position..self.position + SIZE_OF_VAL) {
                    Some(position) => {
                        space.copy_from_slice(position);
                        self.position += SIZE_OF_VAL;

                        match mode {
                            Mode::LE => Ok($int_type::from_le_bytes(space)),
                            Mode::BE => Ok($int_type::from_be_bytes(space))
                        }
                    }
                    None => Err(ERROR_MSG)
                }
            }

            pub fn $name3(&mut self) -> Result<$int_type, &'static str> {
                self.$name2(Mode::BE)
            }

            pub fn $name4(&mut self) -> Result<$int_type, &'static str> {
                self.$name2(Mode::LE)
            }

            pub fn $name5(&mut self) -> $int_type {
                self.$name(Mode::BE)
            }

            pub fn $name6(&mut self) -> $int_type {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(
    get_u16_inner_or_default,
    get_u16_inner_or_die,
    get_u16_be_err,
    get_u16_le_err,
    get_u16_be,
    get_u16_le,
    u16
);
get_single_type!(
    get_u32_inner_or_default,
    get_u32_inner_or_die,
    get_u32_be_err,
    get_u32_le_err,
    get_u32_be,
    get_u32_le,
    u32
);
get_single_type!(
    get_u64_inner_or_default,
    get_u64_inner_or_die,
    get_u64_be_err,
    get_u64_le_err,
    get_u64_be,
    get_u64_le,
    u64
);
