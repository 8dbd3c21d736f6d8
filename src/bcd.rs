// Copyright (c) 2017-2025 Rene van der Meer
//
// Permission is hereby granted, free of charge, to any person obtaining a
// copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL
// THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
// DEALINGS IN THE SOFTWARE.

//! Packed-decimal (BCD) conversion.
//!
//! The DS3231 stores each time field as two decimal digits packed into a
//! single byte, with the tens digit in the high nibble and the units digit in
//! the low nibble.

/// Converts a decimal value in the range 0-99 to a packed-decimal byte.
///
/// Values above 99 don't have a packed-decimal representation. `encode` is
/// only called with values that passed [`WallClock`] validation.
///
/// [`WallClock`]: ../datetime/struct.WallClock.html
pub fn encode(dec: u8) -> u8 {
    debug_assert!(dec <= 99, "{} can't be packed into a single BCD byte", dec);

    ((dec / 10) << 4) | (dec % 10)
}

/// Converts a packed-decimal byte to its decimal value.
pub fn decode(bcd: u8) -> u8 {
    (((bcd & 0xF0) >> 4) * 10) + (bcd & 0x0F)
}

/// Returns `true` if both nibbles of `bcd` hold a decimal digit.
pub fn is_valid(bcd: u8) -> bool {
    (bcd >> 4) <= 9 && (bcd & 0x0F) <= 9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_values() {
        assert_eq!(encode(0), 0x00);
        assert_eq!(encode(7), 0x07);
        assert_eq!(encode(59), 0x59);
        assert_eq!(encode(99), 0x99);
    }

    #[test]
    fn decode_known_values() {
        assert_eq!(decode(0x00), 0);
        assert_eq!(decode(0x17), 17);
        assert_eq!(decode(0x25), 25);
        assert_eq!(decode(0x99), 99);
    }

    #[test]
    fn decode_inverts_encode() {
        for dec in 0..=99 {
            assert_eq!(decode(encode(dec)), dec);
        }
    }

    #[test]
    fn rejects_non_decimal_nibbles() {
        assert!(is_valid(0x59));
        assert!(!is_valid(0x5A));
        assert!(!is_valid(0xA0));
        assert!(!is_valid(0xFF));
    }
}
