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

//! RTClock sets and reads the wall-clock time of a battery-backed Maxim
//! Integrated DS3231 real-time clock connected over I2C.
//!
//! The crate is split into a hardware-independent core, a bus-generic
//! driver, and a Linux bus implementation:
//!
//! * [`bcd`], [`datetime`] and [`rtc::registers`] convert between
//!   [`WallClock`] values and the DS3231's packed-decimal timekeeping
//!   registers.
//! * [`rtc::Ds3231`] issues the register transactions over any bus that
//!   implements the `embedded-hal` `I2c` trait.
//! * [`i2c::I2c`] provides such a bus through the Linux `i2cdev` interface.
//! * [`poll::Poller`] reads the time at a fixed interval.
//!
//! [`bcd`]: bcd/index.html
//! [`datetime`]: datetime/index.html
//! [`rtc::registers`]: rtc/registers/index.html
//! [`WallClock`]: datetime/struct.WallClock.html
//! [`rtc::Ds3231`]: rtc/struct.Ds3231.html
//! [`i2c::I2c`]: i2c/struct.I2c.html
//! [`poll::Poller`]: poll/struct.Poller.html

pub mod bcd;
pub mod config;
pub mod datetime;
pub mod hal;
pub mod i2c;
pub mod poll;
pub mod rtc;
