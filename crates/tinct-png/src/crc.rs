/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png and zlib
//!
//! Reflected polynomial `0xEDB88320`, initial value and final xor of `0xFFFFFFFF`.

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            c = if c & 1 == 1 {
                0xEDB8_8320 ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

static CRC_TABLE: [u32; 256] = make_crc_table();

/// Update a running crc with `data`
///
/// The running value is not inverted, start with `u32::MAX` and
/// invert the final result.
pub fn calc_crc_with_bytes(data: &[u8], crc: u32) -> u32 {
    let mut c = crc;

    for byte in data {
        c = CRC_TABLE[((c ^ u32::from(*byte)) & 0xFF) as usize] ^ (c >> 8);
    }
    c
}

/// Calculate the crc of `data`
pub fn calc_crc(data: &[u8]) -> u32 {
    !calc_crc_with_bytes(data, u32::MAX)
}

#[cfg(test)]
mod tests {
    use crate::crc::{calc_crc, calc_crc_with_bytes};

    #[test]
    fn test_check_value() {
        assert_eq!(calc_crc(b"123456789"), 0xCBF4_3926);
        assert_eq!(calc_crc(b""), 0);
    }

    #[test]
    fn test_iend_crc() {
        // every png ends with this crc
        assert_eq!(calc_crc(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn test_continuation() {
        let whole = calc_crc(b"IHDRdata");
        let split = !calc_crc_with_bytes(b"data", calc_crc_with_bytes(b"IHDR", u32::MAX));

        assert_eq!(whole, split);
    }
}
