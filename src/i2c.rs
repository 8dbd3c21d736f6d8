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

//! Interface for the I2C bus the RTC is connected to.
//!
//! [`I2c`] communicates with the bus master through the Linux `i2cdev`
//! device interface, and acts as the bus for the [`Ds3231`] driver through
//! its `embedded-hal` [`I2c`][hal-i2c] trait implementation.
//!
//! ## Bus configuration
//!
//! The bus isn't configured from user space. Hardware buses are enabled with
//! `dtparam=i2c_arm=on`, and a bit-banged software bus on any available GPIO
//! pins can be added through the `i2c-gpio` device tree overlay. Both are set
//! in `/boot/config.txt`. The clock frequency is selected the same way, and
//! [`with_config`] only verifies it against the expected value.
//!
//! ## Troubleshooting
//!
//! ### Permission denied
//!
//! If [`with_bus`] or [`with_config`] returns an `io::ErrorKind::PermissionDenied`
//! error, make sure the file permissions for `/dev/i2c-N` are correct, and the
//! current user is a member of the `i2c` group.
//!
//! ### Timed out
//!
//! Transactions return an `io::ErrorKind::TimedOut` error when their duration
//! exceeds the timeout value. You can change the timeout using [`set_timeout`].
//!
//! [`I2c`]: struct.I2c.html
//! [`Ds3231`]: ../rtc/struct.Ds3231.html
//! [hal-i2c]: https://docs.rs/embedded-hal/1/embedded_hal/i2c/trait.I2c.html
//! [`with_bus`]: struct.I2c.html#method.with_bus
//! [`with_config`]: struct.I2c.html#method.with_config
//! [`set_timeout`]: struct.I2c.html#method.set_timeout

use std::error;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::os::unix::io::AsRawFd;
use std::result;

use libc::c_ulong;
use log::{debug, warn};

use crate::config::BusConfig;

mod hal;
mod ioctl;

pub use self::ioctl::Capabilities;

/// Errors that can occur when accessing the I2C bus.
#[derive(Debug)]
pub enum Error {
    /// I/O error.
    Io(io::Error),
    /// Invalid slave address.
    ///
    /// Only 7-bit addresses are supported. Several 7-bit addresses
    /// are reserved, and can't be used as slave addresses. A list of
    /// those reserved addresses can be found [here].
    ///
    /// [here]: https://en.wikipedia.org/wiki/I%C2%B2C#Reserved_addresses_in_7-bit_address_space
    InvalidSlaveAddress(u16),
    /// I2C feature not supported.
    ///
    /// The underlying drivers don't support plain I2C transfers.
    FeatureNotSupported,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "I/O error: {}", err),
            Error::InvalidSlaveAddress(address) => write!(f, "Invalid slave address: {}", address),
            Error::FeatureNotSupported => write!(f, "I2C feature not supported"),
        }
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

/// Result type returned from methods that can have `i2c::Error`s.
pub type Result<T> = result::Result<T, Error>;

/// Provides access to an I2C bus.
///
/// Every [`read`] and [`write`] is a separate transaction, framed by a START
/// and a STOP condition. The final byte of a read isn't acknowledged by the
/// bus master.
///
/// [`read`]: #method.read
/// [`write`]: #method.write
#[derive(Debug)]
pub struct I2c {
    bus: u8,
    funcs: Capabilities,
    i2cdev: File,
    address: u16,
    // The not_sync field is a workaround to force !Sync. I2c isn't safe for
    // Sync because of ioctl() and the underlying drivers. This avoids needing
    // #![feature(optin_builtin_traits)] to manually add impl !Sync for I2c.
    not_sync: PhantomData<*const ()>,
}

impl I2c {
    /// Constructs a new `I2c` using the specified bus.
    ///
    /// `bus` selects `/dev/i2c-{bus}`. Any 8-bit bus ID could potentially be
    /// configured for bit banging I2C using `i2c-gpio`.
    pub fn with_bus(bus: u8) -> Result<I2c> {
        let i2cdev = OpenOptions::new()
            .read(true)
            .write(true)
            .open(format!("/dev/i2c-{}", bus))?;

        let capabilities = ioctl::funcs(i2cdev.as_raw_fd())?;

        if !capabilities.i2c() {
            return Err(Error::FeatureNotSupported);
        }

        // Disable 10-bit addressing if it's supported
        if capabilities.addr_10bit() {
            ioctl::set_addr_10bit(i2cdev.as_raw_fd(), 0)?;
        }

        // Disable PEC if it's supported
        if capabilities.smbus_pec() {
            ioctl::set_pec(i2cdev.as_raw_fd(), 0)?;
        }

        Ok(I2c {
            bus,
            funcs: capabilities,
            i2cdev,
            address: 0,
            not_sync: PhantomData,
        })
    }

    /// Constructs a new `I2c` based on `config`.
    ///
    /// Sets the transaction timeout, and disables retries. Logs a warning if
    /// the bus clock frequency doesn't match `config.clock_speed`.
    pub fn with_config(config: &BusConfig) -> Result<I2c> {
        let i2c = I2c::with_bus(config.bus)?;

        i2c.set_timeout(config.timeout_ms)?;
        i2c.set_retries(0)?;

        match i2c.clock_speed() {
            Ok(clock_speed) if clock_speed != config.clock_speed => warn!(
                "I2C bus {} runs at {} Hz, expected {} Hz",
                config.bus, clock_speed, config.clock_speed
            ),
            Ok(_) => {}
            Err(err) => debug!("Can't read clock frequency of I2C bus {}: {}", config.bus, err),
        }

        debug!(
            "Opened I2C bus {} (SCL: GPIO {}, SDA: GPIO {}, timeout: {} ms)",
            config.bus, config.scl_pin, config.sda_pin, config.timeout_ms
        );

        Ok(i2c)
    }

    /// Returns information on the functionality supported by the underlying drivers.
    pub fn capabilities(&self) -> Capabilities {
        self.funcs
    }

    /// Returns the I2C bus ID.
    pub fn bus(&self) -> u8 {
        self.bus
    }

    /// Returns the clock frequency in hertz (Hz).
    pub fn clock_speed(&self) -> Result<u32> {
        let mut buffer = [0u8; 4];

        File::open(format!(
            "/sys/class/i2c-adapter/i2c-{}/of_node/clock-frequency",
            self.bus
        ))?
        .read_exact(&mut buffer)?;

        Ok(u32::from_be_bytes(buffer))
    }

    /// Sets a 7-bit slave address.
    ///
    /// `slave_address` refers to the slave device you're communicating with.
    /// The specified address shouldn't include the R/W bit.
    pub fn set_slave_address(&mut self, slave_address: u16) -> Result<()> {
        if !is_valid_address(slave_address) {
            return Err(Error::InvalidSlaveAddress(slave_address));
        }

        // Skip the ioctl() when the address hasn't changed
        if slave_address == self.address {
            return Ok(());
        }

        ioctl::set_slave_address(self.i2cdev.as_raw_fd(), c_ulong::from(slave_address))?;

        self.address = slave_address;

        Ok(())
    }

    /// Sets the maximum duration of a transaction in milliseconds (ms).
    ///
    /// Transactions that take longer than `timeout` return an
    /// `io::ErrorKind::TimedOut` error.
    ///
    /// `timeout` has a resolution of 10ms, and is rounded up.
    pub fn set_timeout(&self, timeout: u32) -> Result<()> {
        ioctl::set_timeout(self.i2cdev.as_raw_fd(), timeout_ticks(timeout))?;

        Ok(())
    }

    fn set_retries(&self, retries: u32) -> Result<()> {
        ioctl::set_retries(self.i2cdev.as_raw_fd(), retries as c_ulong)?;

        Ok(())
    }

    /// Receives incoming data from the slave device and writes it to `buffer`.
    ///
    /// `read` reads as many bytes as can fit in `buffer`.
    ///
    /// Sequence: START → Address + Read Bit → Incoming Bytes → STOP
    ///
    /// Returns how many bytes were read.
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        Ok(self.i2cdev.read(buffer)?)
    }

    /// Sends the outgoing data contained in `buffer` to the slave device.
    ///
    /// Sequence: START → Address + Write Bit → Outgoing Bytes → STOP
    ///
    /// Returns how many bytes were written.
    pub fn write(&mut self, buffer: &[u8]) -> Result<usize> {
        Ok(self.i2cdev.write(buffer)?)
    }
}

// Send is safe for I2c, but we're marked !Send because of the dummy pointer that's
// needed to force !Sync.
unsafe impl Send for I2c {}

// Filters out reserved and 10-bit addresses
fn is_valid_address(address: u16) -> bool {
    (0x08..=0x77).contains(&address)
}

// i2cdev expects the timeout in units of 10ms
fn timeout_ticks(timeout: u32) -> c_ulong {
    c_ulong::from(timeout / 10 + u32::from(timeout % 10 != 0))
}
