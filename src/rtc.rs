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

//! Driver for the Maxim Integrated DS3231 real-time clock.
//!
//! [`Ds3231`] reads and writes the seven timekeeping registers over any bus
//! that implements the `embedded-hal` [`I2c`] trait, such as
//! [`i2c::I2c`].
//!
//! ## Transactions
//!
//! Setting the time takes a single transaction, which moves the register
//! pointer to the Seconds register and overwrites all seven timekeeping
//! registers.
//!
//! Reading the time takes two transactions. The first one moves the register
//! pointer to the Seconds register, the second one reads all seven registers.
//! The read is only issued if the first transaction succeeds.
//!
//! Neither operation retries a failed transaction. Timeouts are enforced by
//! the bus, and are reported as [`Error::Bus`].
//!
//! [`Ds3231`]: struct.Ds3231.html
//! [`I2c`]: https://docs.rs/embedded-hal/1/embedded_hal/i2c/trait.I2c.html
//! [`i2c::I2c`]: ../i2c/struct.I2c.html
//! [`Error::Bus`]: enum.Error.html#variant.Bus

use std::error;
use std::fmt;
use std::result;

use embedded_hal::i2c::I2c;
use log::{debug, warn};

use crate::config::DS3231_ADDRESS;
use crate::datetime::{self, WallClock};

pub mod registers;

use self::registers::{RegisterFrame, FRAME_LEN, REG_SECONDS};

/// Errors that can occur when accessing the DS3231.
#[derive(Debug)]
pub enum Error<E> {
    /// Bus transaction failed.
    ///
    /// Contains the error returned by the bus, which includes transactions
    /// that exceeded the bus timeout, or weren't acknowledged.
    Bus(E),
    /// The timekeeping registers contain an invalid date or time.
    DateTime(datetime::Error),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Bus(ref err) => write!(f, "Bus error: {:?}", err),
            Error::DateTime(ref err) => write!(f, "Date/time error: {}", err),
        }
    }
}

impl<E: fmt::Debug> error::Error for Error<E> {}

impl<E> From<datetime::Error> for Error<E> {
    fn from(err: datetime::Error) -> Error<E> {
        Error::DateTime(err)
    }
}

/// Result type returned from methods that can have `rtc::Error`s.
pub type Result<T, E> = result::Result<T, Error<E>>;

/// Provides access to a DS3231 RTC.
///
/// `Ds3231` takes ownership of the bus. Use [`release`] to get it back.
///
/// [`release`]: #method.release
#[derive(Debug)]
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Ds3231<I2C> {
    /// Constructs a new `Ds3231` using the default slave address `0x68`.
    pub fn new(i2c: I2C) -> Ds3231<I2C> {
        Ds3231::with_address(i2c, DS3231_ADDRESS)
    }

    /// Constructs a new `Ds3231` using the specified 7-bit slave address.
    ///
    /// The DS3231's address is fixed, but boards with an address translator
    /// in front of the RTC may expose it elsewhere.
    pub fn with_address(i2c: I2C, address: u8) -> Ds3231<I2C> {
        Ds3231 { i2c, address }
    }

    /// Returns the 7-bit slave address.
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Sets the date and time.
    ///
    /// The RTC is switched to the 24-hour format. The weekday register is
    /// overwritten with a placeholder value.
    ///
    /// Sequence: START → Address + Write Bit → 0x00 → 7 Outgoing Bytes → STOP
    pub fn set_time(&mut self, time: &WallClock) -> Result<(), I2C::Error> {
        self.write_frame(&RegisterFrame::from_wall_clock(time))
    }

    /// Reads the current date and time.
    ///
    /// Sequence: START → Address + Write Bit → 0x00 → STOP, followed by
    /// START → Address + Read Bit → 7 Incoming Bytes → STOP
    pub fn time(&mut self) -> Result<WallClock, I2C::Error> {
        let frame = self.read_frame()?;

        Ok(frame.to_wall_clock()?)
    }

    /// Writes `frame` to the timekeeping registers.
    pub fn write_frame(&mut self, frame: &RegisterFrame) -> Result<(), I2C::Error> {
        let mut buffer = [0u8; FRAME_LEN + 1];
        buffer[0] = REG_SECONDS;
        buffer[1..].copy_from_slice(frame.as_bytes());

        debug!("Writing {:02X?} to 0x{:02X}", frame.as_bytes(), self.address);

        self.i2c.write(self.address, &buffer).map_err(|err| {
            warn!("Writing timekeeping registers failed: {:?}", err);
            Error::Bus(err)
        })
    }

    /// Reads the timekeeping registers.
    pub fn read_frame(&mut self) -> Result<RegisterFrame, I2C::Error> {
        let mut buffer = [0u8; FRAME_LEN];

        self.i2c
            .write(self.address, &[REG_SECONDS])
            .and_then(|_| self.i2c.read(self.address, &mut buffer))
            .map_err(|err| {
                warn!("Reading timekeeping registers failed: {:?}", err);
                Error::Bus(err)
            })?;

        debug!("Read {:02X?} from 0x{:02X}", buffer, self.address);

        Ok(RegisterFrame::new(buffer))
    }

    /// Consumes the `Ds3231`, returning the bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x68;
    const FRAME: [u8; 7] = [0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25];

    #[test]
    fn set_time_writes_frame() {
        let expectations = [I2cTransaction::write(
            ADDR,
            vec![0x00, 0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25],
        )];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        rtc.set_time(&WallClock::new(17, 54, 0, 29, 7, 2025).unwrap())
            .unwrap();

        rtc.release().done();
    }

    #[test]
    fn time_reads_frame() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, FRAME.to_vec()),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        assert_eq!(
            rtc.time().unwrap(),
            WallClock::new(17, 54, 0, 29, 7, 2025).unwrap()
        );

        rtc.release().done();
    }

    #[test]
    fn time_masks_century_flag() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, vec![0x00, 0x54, 0x17, 0x01, 0x29, 0x87, 0x25]),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        assert_eq!(rtc.time().unwrap().month(), 7);

        rtc.release().done();
    }

    #[test]
    fn custom_address() {
        let expectations = [
            I2cTransaction::write(0x57, vec![0x00]),
            I2cTransaction::read(0x57, FRAME.to_vec()),
        ];
        let mut rtc = Ds3231::with_address(I2cMock::new(&expectations), 0x57);

        assert_eq!(rtc.address(), 0x57);
        assert_eq!(rtc.read_frame().unwrap().as_bytes(), &FRAME);

        rtc.release().done();
    }

    #[test]
    fn set_time_reports_bus_error() {
        let expectations = [I2cTransaction::write(
            ADDR,
            vec![0x00, 0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25],
        )
        .with_error(ErrorKind::Other)];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        let result = rtc.set_time(&WallClock::new(17, 54, 0, 29, 7, 2025).unwrap());
        assert!(matches!(result, Err(Error::Bus(ErrorKind::Other))));

        rtc.release().done();
    }

    #[test]
    fn time_skips_read_when_pointer_write_fails() {
        let expectations =
            [I2cTransaction::write(ADDR, vec![0x00]).with_error(ErrorKind::Other)];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        assert!(matches!(rtc.time(), Err(Error::Bus(ErrorKind::Other))));

        rtc.release().done();
    }

    #[test]
    fn time_reports_read_error() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, FRAME.to_vec()).with_error(ErrorKind::Other),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        assert!(matches!(rtc.time(), Err(Error::Bus(ErrorKind::Other))));

        rtc.release().done();
    }

    #[test]
    fn time_reports_invalid_registers() {
        let expectations = [
            I2cTransaction::write(ADDR, vec![0x00]),
            I2cTransaction::read(ADDR, vec![0xFF; 7]),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));

        assert!(matches!(
            rtc.time(),
            Err(Error::DateTime(datetime::Error::InvalidRegister { .. }))
        ));

        rtc.release().done();
    }
}
