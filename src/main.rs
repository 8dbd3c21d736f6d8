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

// Sets the time on a DS3231 RTC once, and then logs the current time every
// second.

use std::error::Error;

use env_logger::Env;
use log::{error, info};

use rtclock::config::{BusConfig, POLL_INTERVAL_MS};
use rtclock::datetime::WallClock;
use rtclock::hal::Delay;
use rtclock::i2c::I2c;
use rtclock::poll::Poller;
use rtclock::rtc::Ds3231;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let i2c = I2c::with_config(&BusConfig::default())?;
    let mut rtc = Ds3231::new(i2c);

    // 17:54:00 29/07/2025
    let initial = WallClock::new(17, 54, 0, 29, 7, 2025)?;
    match rtc.set_time(&initial) {
        Ok(()) => info!("Time Set: {}", initial),
        Err(err) => error!("Failed to set time: {}", err),
    }

    Poller::new(Delay::new(), POLL_INTERVAL_MS).run(&mut rtc)
}
