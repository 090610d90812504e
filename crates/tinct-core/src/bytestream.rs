/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader works on an in memory slice, the writer wraps any
//! [`std::io::Write`] sink and counts what went through it.
pub use reader::ByteReader;
pub use writer::ByteWriter;

mod reader;
mod writer;
