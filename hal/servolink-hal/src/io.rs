//! Adapter for `embedded-io` byte streams
//!
//! Lets any blocking [`embedded_io::Read`] + [`embedded_io::Write`] device
//! (a HAL UART, a USB-serial bridge, a loopback buffer) act as a servolink
//! transport.

use crate::uart::{ErrorType, UartRx, UartTx};

/// Error from an [`IoUart`] transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError<E> {
    /// Underlying stream error
    Io(E),
    /// The stream accepted no bytes
    WriteZero,
}

/// UART transport over an `embedded-io` stream
#[derive(Debug)]
pub struct IoUart<T> {
    inner: T,
}

impl<T> IoUart<T> {
    /// Wrap a stream
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Access the wrapped stream
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the stream
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: embedded_io::ErrorType> ErrorType for IoUart<T> {
    type Error = IoError<T::Error>;
}

impl<T: embedded_io::Write> UartTx for IoUart<T> {
    fn write_blocking(&mut self, mut data: &[u8]) -> Result<(), Self::Error> {
        while !data.is_empty() {
            match self.inner.write(data).map_err(IoError::Io)? {
                0 => return Err(IoError::WriteZero),
                n => data = &data[n..],
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush().map_err(IoError::Io)
    }
}

impl<T: embedded_io::Read> UartRx for IoUart<T> {
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]).map_err(IoError::Io)? {
                // End of stream
                0 => break,
                n => filled += n,
            }
        }
        Ok(filled)
    }
}
