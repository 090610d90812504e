/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::Write;

/// Encapsulates a byte sink with support for
/// endian aware writes
///
/// Every write goes straight to the underlying sink, the writer only
/// keeps count of how many bytes were written.
pub struct ByteWriter<W: Write> {
    sink:          W,
    bytes_written: usize
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$int_type:tt) => {
        impl<W: Write> ByteWriter<W> {
            #[doc = concat!("Write a big endian `", stringify!($int_type), "`")]
            pub fn $name(&mut self, value: $int_type) -> std::io::Result<()> {
                self.write_all(&value.to_be_bytes())
            }

            #[doc = concat!("Write a little endian `", stringify!($int_type), "`")]
            pub fn $name2(&mut self, value: $int_type) -> std::io::Result<()> {
                self.write_all(&value.to_le_bytes())
            }
        }
    };
}

impl<W: Write> ByteWriter<W> {
    pub fn new(sink: W) -> ByteWriter<W> {
        ByteWriter {
            sink,
            bytes_written: 0
        }
    }

    /// Write all of `buf` to the sink
    pub fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.sink.write_all(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    pub fn write_u8(&mut self, byte: u8) -> std::io::Result<()> {
        self.write_all(&[byte])
    }

    /// Return the number of bytes the writer has written
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.sink.flush()
    }

    /// Destroy this writer returning the underlying sink
    pub fn consume(self) -> W {
        self.sink
    }
}

write_single_type!(write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_be, write_u32_le, u32);
write_single_type!(write_u64_be, write_u64_le, u64);

#[cfg(test)]
mod tests {
    use crate::bytestream::ByteWriter;

    #[test]
    fn test_writes_are_counted() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);

        writer.write_u32_be(0x0102_0304).unwrap();
        writer.write_u16_le(0x0506).unwrap();
        writer.write_u8(7).unwrap();
        assert_eq!(writer.bytes_written(), 7);

        assert_eq!(sink, [1, 2, 3, 4, 6, 5, 7]);
    }
}
