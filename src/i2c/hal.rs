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

use embedded_hal::i2c::{self, ErrorType, I2c as I2cHal, NoAcknowledgeSource, Operation};

use super::{Error, I2c};

impl ErrorType for I2c {
    type Error = Error;
}

impl i2c::Error for Error {
    fn kind(&self) -> i2c::ErrorKind {
        match self {
            Error::Io(e) => io_error_kind(e.raw_os_error()),
            _ => i2c::ErrorKind::Other,
        }
    }
}

// Maps the errno values returned by the i2cdev drivers. ETIMEDOUT has no
// matching ErrorKind.
fn io_error_kind(errno: Option<i32>) -> i2c::ErrorKind {
    match errno {
        Some(libc::ENXIO) | Some(libc::EREMOTEIO) => {
            i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
        }
        Some(libc::EAGAIN) => i2c::ErrorKind::ArbitrationLoss,
        Some(libc::EIO) => i2c::ErrorKind::Bus,
        _ => i2c::ErrorKind::Other,
    }
}

/// `I2c` trait implementation for `embedded-hal` v1.0.0.
///
/// Operations are executed as separate transactions, each with its own START
/// and STOP condition.
impl I2cHal for I2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.set_slave_address(u16::from(address))?;
        for op in operations {
            match op {
                Operation::Read(buff) => {
                    I2c::read(self, buff)?;
                }
                Operation::Write(buff) => {
                    I2c::write(self, buff)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use embedded_hal::i2c::Error as _;
    use std::io;

    #[test]
    fn maps_errno_to_error_kind() {
        assert_eq!(
            io_error_kind(Some(libc::ENXIO)),
            i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
        );
        assert_eq!(
            io_error_kind(Some(libc::EREMOTEIO)),
            i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown)
        );
        assert_eq!(
            io_error_kind(Some(libc::EAGAIN)),
            i2c::ErrorKind::ArbitrationLoss
        );
        assert_eq!(io_error_kind(Some(libc::EIO)), i2c::ErrorKind::Bus);
        assert_eq!(
            io_error_kind(Some(libc::ETIMEDOUT)),
            i2c::ErrorKind::Other
        );
        assert_eq!(io_error_kind(None), i2c::ErrorKind::Other);
    }

    #[test]
    fn timeout_is_reported_as_other() {
        let err = Error::Io(io::Error::from_raw_os_error(libc::ETIMEDOUT));

        assert_eq!(err.kind(), i2c::ErrorKind::Other);
        assert_eq!(
            Error::InvalidSlaveAddress(0x03).kind(),
            i2c::ErrorKind::Other
        );
    }
}
