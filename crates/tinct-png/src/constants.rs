/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// The eight bytes every png file starts with
pub const PNG_SIGNATURE: u64 = 0x8950_4E47_0D0A_1A0A;

/// Size of IDAT chunks written by the encoder
pub const IDAT_CHUNK_SIZE: usize = 8192;
