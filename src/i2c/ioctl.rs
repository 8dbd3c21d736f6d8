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

use libc::{c_int, c_ulong, ioctl};
use std::io;
use std::result;

pub type Result<T> = result::Result<T, io::Error>;

fn parse_retval(retval: c_int) -> Result<i32> {
    if retval == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(retval)
    }
}

// Based on i2c.h, i2c-dev.h and the documentation at https://www.kernel.org/doc/Documentation/i2c

// Capabilities returned by REQ_FUNCS
const FUNC_I2C: c_ulong = 0x01;
const FUNC_10BIT_ADDR: c_ulong = 0x02;
const FUNC_SMBUS_PEC: c_ulong = 0x08;

/// Lists the features supported by the underlying drivers.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Capabilities {
    funcs: c_ulong,
}

impl Capabilities {
    fn new(funcs: c_ulong) -> Capabilities {
        Capabilities { funcs }
    }

    /// Indicates whether plain I2C transfers are supported.
    pub fn i2c(&self) -> bool {
        (self.funcs & FUNC_I2C) > 0
    }

    /// Indicates whether 10-bit addresses are supported.
    pub fn addr_10bit(&self) -> bool {
        (self.funcs & FUNC_10BIT_ADDR) > 0
    }

    /// Indicates whether SMBus Packet Error Checking is supported.
    pub fn smbus_pec(&self) -> bool {
        (self.funcs & FUNC_SMBUS_PEC) > 0
    }
}

// ioctl() requests supported by i2cdev
const REQ_RETRIES: c_ulong = 0x0701; // How many retries when waiting for an ACK
const REQ_TIMEOUT: c_ulong = 0x0702; // Timeout in 10ms units
const REQ_SLAVE: c_ulong = 0x0706; // Set slave address
const REQ_TENBIT: c_ulong = 0x0704; // Use 10-bit slave addresses
const REQ_FUNCS: c_ulong = 0x0705; // Read I2C bus capabilities
const REQ_PEC: c_ulong = 0x0708; // SMBus: Use Packet Error Checking

// All ioctl commands take an unsigned long parameter, except for REQ_FUNCS

pub fn set_slave_address(fd: c_int, value: c_ulong) -> Result<i32> {
    parse_retval(unsafe { ioctl(fd, REQ_SLAVE, value) })
}

pub fn set_addr_10bit(fd: c_int, value: c_ulong) -> Result<i32> {
    parse_retval(unsafe { ioctl(fd, REQ_TENBIT, value) })
}

pub fn set_pec(fd: c_int, value: c_ulong) -> Result<i32> {
    parse_retval(unsafe { ioctl(fd, REQ_PEC, value) })
}

pub fn set_timeout(fd: c_int, value: c_ulong) -> Result<i32> {
    parse_retval(unsafe { ioctl(fd, REQ_TIMEOUT, value) })
}

pub fn set_retries(fd: c_int, value: c_ulong) -> Result<i32> {
    parse_retval(unsafe { ioctl(fd, REQ_RETRIES, value) })
}

pub fn funcs(fd: c_int) -> Result<Capabilities> {
    let mut funcs: c_ulong = 0;

    parse_retval(unsafe { ioctl(fd, REQ_FUNCS, &mut funcs) })?;

    Ok(Capabilities::new(funcs))
}
