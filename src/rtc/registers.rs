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

use crate::bcd;
use crate::config::BASE_YEAR;
use crate::datetime::{Error, Result, WallClock};

// DS3231 timekeeping register addresses
pub const REG_SECONDS: u8 = 0x00;
pub const REG_MINUTES: u8 = 0x01;
pub const REG_HOURS: u8 = 0x02;
pub const REG_WEEKDAY: u8 = 0x03;
pub const REG_DAY: u8 = 0x04;
pub const REG_MONTH: u8 = 0x05;
pub const REG_YEAR: u8 = 0x06;

/// Number of timekeeping registers, starting at `REG_SECONDS`.
pub const FRAME_LEN: usize = 7;

// The weekday isn't tracked. It's written as Monday, and ignored on reads.
const WEEKDAY_PLACEHOLDER: u8 = 0x01;

// Hours register: bit 6 selects 12-hour mode, in which bit 5 is set for PM
const HOURS_12H: u8 = 1 << 6;
const HOURS_PM: u8 = 1 << 5;

// Masks for the value bits of each register
const MASK_SECONDS: u8 = 0x7F;
const MASK_MINUTES: u8 = 0x7F;
const MASK_HOURS_24H: u8 = 0x3F;
const MASK_HOURS_12H: u8 = 0x1F;
const MASK_DAY: u8 = 0x3F;
// Bit 7 is the century flag
const MASK_MONTH: u8 = 0x1F;

/// Contents of the seven timekeeping registers, in register order.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct RegisterFrame {
    bytes: [u8; FRAME_LEN],
}

impl RegisterFrame {
    /// Wraps the raw register contents read from the peripheral.
    pub fn new(bytes: [u8; FRAME_LEN]) -> RegisterFrame {
        RegisterFrame { bytes }
    }

    /// Encodes `time` using the 24-hour format.
    pub fn from_wall_clock(time: &WallClock) -> RegisterFrame {
        RegisterFrame {
            bytes: [
                bcd::encode(time.second()),
                bcd::encode(time.minute()),
                bcd::encode(time.hour()),
                WEEKDAY_PLACEHOLDER,
                bcd::encode(time.day()),
                bcd::encode(time.month()),
                bcd::encode((time.year() - BASE_YEAR) as u8),
            ],
        }
    }

    /// Decodes the register contents.
    ///
    /// The weekday register and the century flag are ignored. Both 12-hour
    /// and 24-hour formats are accepted.
    pub fn to_wall_clock(&self) -> Result<WallClock> {
        let second = self.field(REG_SECONDS, MASK_SECONDS)?;
        let minute = self.field(REG_MINUTES, MASK_MINUTES)?;
        let hour = self.hour()?;
        let day = self.field(REG_DAY, MASK_DAY)?;
        let month = self.field(REG_MONTH, MASK_MONTH)?;
        let year = self.field(REG_YEAR, 0xFF)?;

        WallClock::new(
            hour,
            minute,
            second,
            day,
            month,
            BASE_YEAR + u16::from(year),
        )
    }

    /// Returns the raw register contents.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.bytes
    }

    fn field(&self, register: u8, mask: u8) -> Result<u8> {
        let value = self.bytes[register as usize] & mask;
        if !bcd::is_valid(value) {
            return Err(Error::InvalidRegister {
                register,
                value: self.bytes[register as usize],
            });
        }

        Ok(bcd::decode(value))
    }

    fn hour(&self) -> Result<u8> {
        let raw = self.bytes[REG_HOURS as usize];
        if raw & HOURS_12H == 0 {
            return self.field(REG_HOURS, MASK_HOURS_24H);
        }

        // 12 AM is midnight, 12 PM is noon
        let hour = self.field(REG_HOURS, MASK_HOURS_12H)?;
        if hour == 0 || hour > 12 {
            return Err(Error::InvalidRegister {
                register: REG_HOURS,
                value: raw,
            });
        }

        if raw & HOURS_PM > 0 {
            Ok(hour % 12 + 12)
        } else {
            Ok(hour % 12)
        }
    }
}

impl From<&WallClock> for RegisterFrame {
    fn from(time: &WallClock) -> RegisterFrame {
        RegisterFrame::from_wall_clock(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_wall_clock() {
        let time = WallClock::new(17, 54, 0, 29, 7, 2025).unwrap();

        assert_eq!(
            RegisterFrame::from_wall_clock(&time).as_bytes(),
            &[0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25]
        );
    }

    #[test]
    fn decodes_frame() {
        let frame = RegisterFrame::new([0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25]);

        assert_eq!(
            frame.to_wall_clock(),
            WallClock::new(17, 54, 0, 29, 7, 2025)
        );
    }

    #[test]
    fn ignores_weekday() {
        let frame = RegisterFrame::new([0x30, 0x15, 0x08, 0x05, 0x01, 0x01, 0x00]);

        assert_eq!(frame.to_wall_clock(), WallClock::new(8, 15, 30, 1, 1, 2000));
    }

    #[test]
    fn masks_century_flag() {
        let frame = RegisterFrame::new([0x00, 0x54, 0x17, 0x01, 0x29, 0x87, 0x25]);

        assert_eq!(frame.to_wall_clock().unwrap().month(), 7);
    }

    #[test]
    fn decodes_12_hour_format() {
        // 12 AM, 12 PM, 5 AM, 5 PM
        let cases = [(0x52, 0), (0x72, 12), (0x45, 5), (0x65, 17)];

        for &(raw, hour) in cases.iter() {
            let frame = RegisterFrame::new([0x00, 0x00, raw, 0x01, 0x01, 0x01, 0x25]);

            assert_eq!(frame.to_wall_clock().unwrap().hour(), hour);
        }
    }

    #[test]
    fn rejects_invalid_registers() {
        let frame = RegisterFrame::new([0x00, 0x5A, 0x17, 0x01, 0x29, 0x07, 0x25]);
        assert_eq!(
            frame.to_wall_clock(),
            Err(Error::InvalidRegister {
                register: REG_MINUTES,
                value: 0x5A
            })
        );

        // 12-hour mode, hour 13
        let frame = RegisterFrame::new([0x00, 0x00, 0x53, 0x01, 0x01, 0x01, 0x25]);
        assert_eq!(
            frame.to_wall_clock(),
            Err(Error::InvalidRegister {
                register: REG_HOURS,
                value: 0x53
            })
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        // Seconds register holds 60
        let frame = RegisterFrame::new([0x60, 0x00, 0x00, 0x01, 0x01, 0x01, 0x25]);

        assert!(matches!(
            frame.to_wall_clock(),
            Err(Error::OutOfRange { .. })
        ));
    }
}
