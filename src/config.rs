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

//! Compile-time configuration.
//!
//! The DS3231 is wired to a bit-banged I2C bus configured through the
//! `i2c-gpio` device tree overlay, for example by adding
//! `dtoverlay=i2c-gpio,i2c_gpio_scl=16,i2c_gpio_sda=15,bus=1` to
//! `/boot/config.txt`. The constants below describe that wiring. Pins and bit
//! rate are fixed by the overlay, and are only used here to verify and log
//! the bus setup.

/// I2C bus ID (`/dev/i2c-N`) the DS3231 is connected to.
pub const I2C_BUS: u8 = 1;
/// GPIO pin used for SCL.
pub const I2C_SCL_PIN: u8 = 16;
/// GPIO pin used for SDA.
pub const I2C_SDA_PIN: u8 = 15;
/// Bus clock frequency in hertz (Hz).
pub const I2C_CLOCK_SPEED: u32 = 100_000;
/// Maximum duration of a single bus transaction in milliseconds (ms).
pub const I2C_TIMEOUT_MS: u32 = 1000;

/// DS3231 7-bit slave address.
pub const DS3231_ADDRESS: u8 = 0x68;
/// Year represented by a value of 0 in the Year register.
pub const BASE_YEAR: u16 = 2000;

/// Time between two consecutive reads in milliseconds (ms).
pub const POLL_INTERVAL_MS: u32 = 1000;

/// Bus settings used by [`I2c::with_config`].
///
/// [`I2c::with_config`]: ../i2c/struct.I2c.html#method.with_config
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct BusConfig {
    pub bus: u8,
    pub scl_pin: u8,
    pub sda_pin: u8,
    pub clock_speed: u32,
    pub timeout_ms: u32,
}

impl Default for BusConfig {
    fn default() -> BusConfig {
        BusConfig {
            bus: I2C_BUS,
            scl_pin: I2C_SCL_PIN,
            sda_pin: I2C_SDA_PIN,
            clock_speed: I2C_CLOCK_SPEED,
            timeout_ms: I2C_TIMEOUT_MS,
        }
    }
}
