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

//! Periodic readout of the RTC.
//!
//! The polling cadence lives here rather than in the driver, so the interval
//! can be changed without touching any bus code.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{error, info};

use crate::datetime::WallClock;
use crate::rtc::Ds3231;

/// Reads the time at a fixed interval, and logs the result.
#[derive(Debug)]
pub struct Poller<D> {
    delay: D,
    interval_ms: u32,
}

impl<D: DelayNs> Poller<D> {
    /// Constructs a new `Poller` that waits `interval_ms` milliseconds between
    /// reads.
    pub fn new(delay: D, interval_ms: u32) -> Poller<D> {
        Poller { delay, interval_ms }
    }

    /// Returns the interval in milliseconds (ms).
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Reads and logs the current time, then waits for one interval.
    ///
    /// A failed read is logged and returns `None`. It's never retried.
    pub fn tick<I2C: I2c>(&mut self, rtc: &mut Ds3231<I2C>) -> Option<WallClock> {
        let time = match rtc.time() {
            Ok(time) => {
                info!("Time: {}", time);
                Some(time)
            }
            Err(err) => {
                error!("Failed to read time: {}", err);
                None
            }
        };

        self.delay.delay_ms(self.interval_ms);

        time
    }

    /// Calls [`tick`] forever.
    ///
    /// [`tick`]: #method.tick
    pub fn run<I2C: I2c>(&mut self, rtc: &mut Ds3231<I2C>) -> ! {
        loop {
            self.tick(rtc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    // Records requested delays instead of sleeping
    #[derive(Debug, Default)]
    struct RecordingDelay {
        total_ns: u64,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn tick_returns_time_and_waits() {
        let expectations = [
            I2cTransaction::write(0x68, vec![0x00]),
            I2cTransaction::read(0x68, vec![0x00, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25]),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));
        let mut poller = Poller::new(RecordingDelay::default(), 1000);

        assert_eq!(
            poller.tick(&mut rtc),
            Some(WallClock::new(17, 54, 0, 29, 7, 2025).unwrap())
        );
        assert_eq!(poller.delay.total_ns, 1_000_000_000);

        rtc.release().done();
    }

    #[test]
    fn tick_survives_bus_errors() {
        let expectations = [
            I2cTransaction::write(0x68, vec![0x00]).with_error(ErrorKind::Other),
            I2cTransaction::write(0x68, vec![0x00]),
            I2cTransaction::read(0x68, vec![0x05, 0x54, 0x17, 0x01, 0x29, 0x07, 0x25]),
        ];
        let mut rtc = Ds3231::new(I2cMock::new(&expectations));
        let mut poller = Poller::new(RecordingDelay::default(), 250);

        assert_eq!(poller.tick(&mut rtc), None);
        assert_eq!(poller.tick(&mut rtc).map(|time| time.second()), Some(5));
        assert_eq!(poller.delay.total_ns, 500_000_000);

        rtc.release().done();
    }
}
