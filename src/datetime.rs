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

//! Calendar date and time of day as kept by the RTC.
//!
//! The DS3231 counts years within a single century. [`WallClock`] limits the
//! year to 2000-2099, which is also the range over which the peripheral's
//! leap-year handling is correct.
//!
//! [`WallClock`]: struct.WallClock.html

use std::error;
use std::fmt;
use std::result;

use crate::config::BASE_YEAR;

/// Fields of a [`WallClock`].
///
/// [`WallClock`]: struct.WallClock.html
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Field {
    Hour,
    Minute,
    Second,
    Day,
    Month,
    Year,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Field::Hour => write!(f, "hour"),
            Field::Minute => write!(f, "minute"),
            Field::Second => write!(f, "second"),
            Field::Day => write!(f, "day"),
            Field::Month => write!(f, "month"),
            Field::Year => write!(f, "year"),
        }
    }
}

/// Errors that can occur when constructing or decoding a [`WallClock`].
///
/// [`WallClock`]: struct.WallClock.html
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Error {
    /// A field holds a value outside of its valid range.
    ///
    /// For [`Field::Day`], the valid range depends on the month and year.
    ///
    /// [`Field::Day`]: enum.Field.html#variant.Day
    OutOfRange { field: Field, value: u16 },
    /// A register read from the peripheral doesn't contain a packed-decimal
    /// value.
    ///
    /// This typically means the RTC lost power without a backup battery, or
    /// the device at the configured address isn't a DS3231.
    InvalidRegister { register: u8, value: u8 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::OutOfRange { field, value } => write!(f, "Invalid {}: {}", field, value),
            Error::InvalidRegister { register, value } => write!(
                f,
                "Invalid value in register 0x{:02X}: 0x{:02X}",
                register, value
            ),
        }
    }
}

impl error::Error for Error {}

/// Result type returned from methods that can have `datetime::Error`s.
pub type Result<T> = result::Result<T, Error>;

/// Wall-clock date and time, with one-second resolution.
///
/// A `WallClock` is always valid. The only way to construct one is through
/// [`new`], which rejects out-of-range fields and days that don't exist in the
/// given month.
///
/// [`new`]: #method.new
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct WallClock {
    hour: u8,
    minute: u8,
    second: u8,
    day: u8,
    month: u8,
    year: u16,
}

impl WallClock {
    /// Constructs a new `WallClock`.
    ///
    /// `hour` uses the 24-hour format (0-23). `year` must lie within
    /// 2000-2099.
    pub fn new(
        hour: u8,
        minute: u8,
        second: u8,
        day: u8,
        month: u8,
        year: u16,
    ) -> Result<WallClock> {
        check(Field::Hour, hour.into(), 0, 23)?;
        check(Field::Minute, minute.into(), 0, 59)?;
        check(Field::Second, second.into(), 0, 59)?;
        check(Field::Month, month.into(), 1, 12)?;
        check(Field::Year, year, BASE_YEAR, BASE_YEAR + 99)?;
        check(Field::Day, day.into(), 1, days_in_month(month, year).into())?;

        Ok(WallClock {
            hour,
            minute,
            second,
            day,
            month,
            year,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second (0-59).
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Returns the day of the month (1-31).
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns the year (2000-2099).
    pub fn year(&self) -> u16 {
        self.year
    }
}

impl fmt::Display for WallClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}  Date: {:02}/{:02}/{}",
            self.hour, self.minute, self.second, self.day, self.month, self.year
        )
    }
}

fn check(field: Field, value: u16, min: u16, max: u16) -> Result<()> {
    if value < min || value > max {
        return Err(Error::OutOfRange { field, value });
    }

    Ok(())
}

// Only called with a validated month and year
fn days_in_month(month: u8, year: u16) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_fields() {
        let time = WallClock::new(17, 54, 0, 29, 7, 2025).unwrap();

        assert_eq!(time.hour(), 17);
        assert_eq!(time.minute(), 54);
        assert_eq!(time.second(), 0);
        assert_eq!(time.day(), 29);
        assert_eq!(time.month(), 7);
        assert_eq!(time.year(), 2025);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_eq!(
            WallClock::new(24, 0, 0, 1, 1, 2025),
            Err(Error::OutOfRange {
                field: Field::Hour,
                value: 24
            })
        );
        assert_eq!(
            WallClock::new(0, 60, 0, 1, 1, 2025),
            Err(Error::OutOfRange {
                field: Field::Minute,
                value: 60
            })
        );
        assert_eq!(
            WallClock::new(0, 0, 60, 1, 1, 2025),
            Err(Error::OutOfRange {
                field: Field::Second,
                value: 60
            })
        );
        assert_eq!(
            WallClock::new(0, 0, 0, 0, 1, 2025),
            Err(Error::OutOfRange {
                field: Field::Day,
                value: 0
            })
        );
        assert_eq!(
            WallClock::new(0, 0, 0, 1, 13, 2025),
            Err(Error::OutOfRange {
                field: Field::Month,
                value: 13
            })
        );
        assert_eq!(
            WallClock::new(0, 0, 0, 1, 1, 1999),
            Err(Error::OutOfRange {
                field: Field::Year,
                value: 1999
            })
        );
        assert_eq!(
            WallClock::new(0, 0, 0, 1, 1, 2100),
            Err(Error::OutOfRange {
                field: Field::Year,
                value: 2100
            })
        );
    }

    #[test]
    fn day_depends_on_month_and_year() {
        assert!(WallClock::new(0, 0, 0, 31, 4, 2025).is_err());
        assert!(WallClock::new(0, 0, 0, 30, 4, 2025).is_ok());
        assert!(WallClock::new(0, 0, 0, 29, 2, 2025).is_err());
        assert!(WallClock::new(0, 0, 0, 29, 2, 2024).is_ok());
        assert!(WallClock::new(0, 0, 0, 29, 2, 2000).is_ok());
    }

    #[test]
    fn display_format() {
        let time = WallClock::new(7, 4, 9, 1, 2, 2030).unwrap();

        assert_eq!(time.to_string(), "07:04:09  Date: 01/02/2030");
    }
}
